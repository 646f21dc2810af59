// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod error;
mod interval;
mod ray;
mod util;

pub use aabb::Aabb;
pub use error::MathError;
pub use interval::Interval;
pub use ray::Ray;
pub use util::{align_zero, direction, is_zero, EPSILON};

/// Color type alias (RGB intensities, 0-255 scale before clamping)
pub type Color = Vec3;
