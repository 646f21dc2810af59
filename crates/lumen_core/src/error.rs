use lumen_math::MathError;
use thiserror::Error;

/// Errors raised when a surface is constructed from invalid parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid vector: {0}")]
    Math(#[from] MathError),

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f32),

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("points are collinear and do not define a plane")]
    CollinearPoints,

    #[error("vertex {0} does not lie in the polygon's plane")]
    NonCoplanar(usize),

    #[error("polygon is not convex at vertex {0}")]
    NonConvex(usize),
}
