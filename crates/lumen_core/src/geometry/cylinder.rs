//! Finite capped cylinder.

use super::{in_range, Surface, Tube};
use crate::GeometryError;
use lumen_math::{align_zero, Aabb, Ray, Vec3};

/// A tube cut to `height` along its axis and closed by two discs.
///
/// The bottom cap is centered on the axis origin, the top cap `height`
/// further along the axis direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f32,
}

impl Cylinder {
    /// Create a cylinder. Radius and height must be positive.
    pub fn new(axis: Ray, radius: f32, height: f32) -> Result<Self, GeometryError> {
        let tube = Tube::new(axis, radius)?;
        if !(height > 0.0) {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        Ok(Self { tube, height })
    }

    pub fn axis(&self) -> &Ray {
        self.tube.axis()
    }

    pub fn radius(&self) -> f32 {
        self.tube.radius()
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn cap_centers(&self) -> [Vec3; 2] {
        let axis = self.tube.axis();
        [axis.origin(), axis.at(self.height)]
    }

    /// Hit with the disc of radius `r` centered at `center`, perpendicular
    /// to the axis. Points on the rim belong to the lateral surface.
    fn cap_hit(&self, center: Vec3, ray: &Ray, max_distance: f32) -> Option<f32> {
        let d = self.tube.axis().direction();
        let denom = align_zero(d.dot(ray.direction()));
        if denom == 0.0 {
            return None;
        }

        let t = align_zero(d.dot(center - ray.origin()) / denom);
        if !in_range(t, max_distance) {
            return None;
        }

        let r = self.tube.radius();
        let offset = ray.at(t) - center;
        (align_zero(offset.length_squared() - r * r) < 0.0).then_some(t)
    }
}

impl Surface for Cylinder {
    fn normal_at(&self, point: Vec3) -> Vec3 {
        let axial = self.tube.axial(point);
        if axial == 0.0 || align_zero(axial - self.height) == 0.0 {
            let r = self.tube.radius();
            let offset = point - self.tube.axis().at(axial);
            // Rim points belong to the lateral surface
            if align_zero(offset.length_squared() - r * r) < 0.0 {
                return self.tube.axis().direction();
            }
        }
        self.tube.normal_at(point)
    }

    fn intersect(&self, ray: &Ray, max_distance: f32) -> Vec<f32> {
        let mut hits = Vec::with_capacity(2);

        if let Some((t1, t2)) = self.tube.lateral_roots(ray) {
            for t in [t1, t2] {
                if !in_range(t, max_distance) {
                    continue;
                }
                let axial = self.tube.axial(ray.at(t));
                if axial > 0.0 && align_zero(axial - self.height) < 0.0 {
                    hits.push(t);
                }
            }
        }

        for center in self.cap_centers() {
            if let Some(t) = self.cap_hit(center, ray, max_distance) {
                hits.push(t);
            }
        }

        hits
    }

    fn bounding_box(&self) -> Option<Aabb> {
        let d = self.tube.axis().direction();
        let r = self.tube.radius();
        // Half extent of a disc perpendicular to `d`, per axis
        let extent = Vec3::new(
            r * (1.0 - d.x * d.x).max(0.0).sqrt(),
            r * (1.0 - d.y * d.y).max(0.0).sqrt(),
            r * (1.0 - d.z * d.z).max(0.0).sqrt(),
        );
        let [bottom, top] = self.cap_centers();
        Some(Aabb::from_points(
            bottom.min(top) - extent,
            bottom.max(top) + extent,
        ))
    }
}
