use thiserror::Error;

/// Errors raised when constructing math values.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("cannot build a direction from the zero vector")]
    ZeroVector,
}
