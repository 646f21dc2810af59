//! Infinite plane primitive.

use super::{in_range, Surface};
use crate::GeometryError;
use lumen_math::{align_zero, direction, Aabb, Ray, Vec3};

/// An infinite plane through a reference point with a unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    q: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Create a plane from a point on it and its normal (normalized here).
    pub fn new(point: Vec3, normal: Vec3) -> Result<Self, GeometryError> {
        Ok(Self {
            q: point,
            normal: direction(normal)?,
        })
    }

    /// Create the plane through three points.
    ///
    /// The normal follows the right-hand rule over `p1 -> p2 -> p3`.
    pub fn from_points(p1: Vec3, p2: Vec3, p3: Vec3) -> Result<Self, GeometryError> {
        let normal = direction((p2 - p1).cross(p3 - p1))
            .map_err(|_| GeometryError::CollinearPoints)?;
        Ok(Self { q: p1, normal })
    }

    /// Reference point.
    pub fn point(&self) -> Vec3 {
        self.q
    }

    /// Unit normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Surface for Plane {
    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn intersect(&self, ray: &Ray, max_distance: f32) -> Vec<f32> {
        if ray.origin() == self.q {
            return Vec::new();
        }

        // Parallel to the plane
        let denom = align_zero(self.normal.dot(ray.direction()));
        if denom == 0.0 {
            return Vec::new();
        }

        let t = align_zero(self.normal.dot(self.q - ray.origin()) / denom);
        if in_range(t, max_distance) {
            vec![t]
        } else {
            Vec::new()
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}
