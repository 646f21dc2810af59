use lumen_math::MathError;
use thiserror::Error;

/// Errors raised by [`crate::CameraBuilder::build`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("missing rendering data: {0}")]
    Missing(&'static str),

    #[error("camera 'to' and 'up' vectors must be orthogonal")]
    NotOrthogonal,

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("invalid camera vector: {0}")]
    Math(#[from] MathError),

    #[error("thread count must be at least 1")]
    NoThreads,
}

/// Invalid [`crate::TracerConfig`] values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TracerConfigError {
    #[error("max depth must be at least 1")]
    ZeroDepth,

    #[error("min contribution must be in (0, 1], got {0}")]
    InvalidContribution(f32),
}

/// Errors raised while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
