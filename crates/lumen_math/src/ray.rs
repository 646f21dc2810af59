use crate::{direction, MathError, Vec3};

/// A ray in 3D space: an origin and a unit-length direction.
///
/// The direction is normalized on construction, so `t` in [`Ray::at`] is a
/// true distance from the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Offset applied to secondary ray origins by [`Ray::with_bias`].
    pub const BIAS: f32 = 1e-3;

    /// Create a new ray, normalizing `direction`.
    ///
    /// `direction` must be non-zero; use [`Ray::try_new`] for unchecked input.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(direction != Vec3::ZERO, "ray direction must be non-zero");
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a new ray, rejecting a zero direction.
    pub fn try_new(origin: Vec3, dir: Vec3) -> Result<Self, MathError> {
        Ok(Self {
            origin,
            direction: direction(dir)?,
        })
    }

    /// Create a secondary ray leaving a surface.
    ///
    /// The origin is pushed off `point` along `normal` by [`Ray::BIAS`], towards
    /// the side `direction` points to, so the ray cannot hit the surface it
    /// starts on. `direction` must already be normalized.
    pub fn with_bias(point: Vec3, direction: Vec3, normal: Vec3) -> Self {
        let nv = normal.dot(direction);
        let offset = normal * if nv > 0.0 { Self::BIAS } else { -Self::BIAS };
        Self {
            origin: point + offset,
            direction,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 3.0, 4.0));

        assert_eq!(ray.origin(), Vec3::new(1.0, 2.0, 3.0));
        assert!((ray.direction().length() - 1.0).abs() < 1e-6);
        assert!((ray.direction() - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_ray_try_new_zero() {
        assert_eq!(
            Ray::try_new(Vec3::ZERO, Vec3::ZERO),
            Err(MathError::ZeroVector)
        );
        assert!(Ray::try_new(Vec3::ZERO, Vec3::X).is_ok());
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.5), Vec3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn test_ray_bias_follows_direction() {
        let p = Vec3::new(1.0, 1.0, 0.0);

        // Leaving along the normal side
        let up = Ray::with_bias(p, Vec3::Z, Vec3::Z);
        assert!(up.origin().z > 0.0);
        assert_eq!(up.direction(), Vec3::Z);

        // Passing through to the other side
        let down = Ray::with_bias(p, -Vec3::Z, Vec3::Z);
        assert!(down.origin().z < 0.0);
        assert!((down.origin().z + Ray::BIAS).abs() < 1e-6);
    }
}
