//! Sphere primitive.

use super::{in_range, Surface};
use crate::GeometryError;
use lumen_math::{align_zero, Aabb, Ray, Vec3};

/// A sphere given by center and radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Vec3, radius: f32) -> Result<Self, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Surface for Sphere {
    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }

    fn intersect(&self, ray: &Ray, max_distance: f32) -> Vec<f32> {
        // From the center every direction leaves through exactly one point
        if ray.origin() == self.center {
            return if in_range(self.radius, max_distance) {
                vec![self.radius]
            } else {
                Vec::new()
            };
        }

        let v = self.center - ray.origin();
        let tm = align_zero(ray.direction().dot(v));
        let d2 = align_zero(v.length_squared() - tm * tm);
        let th2 = align_zero(self.radius * self.radius - d2);

        // Miss, or tangent
        if th2 <= 0.0 {
            return Vec::new();
        }

        let th = th2.sqrt();
        [align_zero(tm - th), align_zero(tm + th)]
            .into_iter()
            .filter(|&t| in_range(t, max_distance))
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let rvec = Vec3::splat(self.radius);
        Some(Aabb::from_points(self.center - rvec, self.center + rvec))
    }
}
