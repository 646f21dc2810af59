//! Infinite tube (cylinder without caps or height).

use super::{in_range, Surface};
use crate::GeometryError;
use lumen_math::{align_zero, Aabb, Ray, Vec3};

/// An infinite tube of constant radius around an axis ray.
#[derive(Debug, Clone, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f32,
}

impl Tube {
    /// Create a tube. The radius must be positive.
    pub fn new(axis: Ray, radius: f32) -> Result<Self, GeometryError> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { axis, radius })
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Signed distance of `point`'s projection along the axis from its origin.
    #[inline]
    pub(crate) fn axial(&self, point: Vec3) -> f32 {
        align_zero(self.axis.direction().dot(point - self.axis.origin()))
    }

    /// Ray parameters where the ray crosses the infinite lateral surface,
    /// nearest first, unfiltered.
    ///
    /// Solves the circle equation on the components perpendicular to the
    /// axis. `None` when the ray is parallel to the axis, misses, or touches
    /// the surface tangentially.
    pub(crate) fn lateral_roots(&self, ray: &Ray) -> Option<(f32, f32)> {
        let d = self.axis.direction();
        let v = ray.direction();
        let dp = ray.origin() - self.axis.origin();

        let u = v - d * v.dot(d);
        let w = dp - d * dp.dot(d);

        let a = align_zero(u.length_squared());
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * u.dot(w);
        let c = w.length_squared() - self.radius * self.radius;

        let disc = align_zero(b * b - 4.0 * a * c);
        if disc <= 0.0 {
            return None;
        }

        let sq = disc.sqrt();
        Some((
            align_zero((-b - sq) / (2.0 * a)),
            align_zero((-b + sq) / (2.0 * a)),
        ))
    }
}

impl Surface for Tube {
    fn normal_at(&self, point: Vec3) -> Vec3 {
        let t = self.axial(point);
        let o = if t == 0.0 {
            self.axis.origin()
        } else {
            self.axis.at(t)
        };
        (point - o).normalize()
    }

    fn intersect(&self, ray: &Ray, max_distance: f32) -> Vec<f32> {
        match self.lateral_roots(ray) {
            Some((t1, t2)) => [t1, t2]
                .into_iter()
                .filter(|&t| in_range(t, max_distance))
                .collect(),
            None => Vec::new(),
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z_tube() -> Tube {
        Tube::new(Ray::new(Vec3::ZERO, Vec3::Z), 1.0).unwrap()
    }

    #[test]
    fn test_tube_normal() {
        let tube = Tube::new(Ray::new(Vec3::ZERO, Vec3::Y), 1.0).unwrap();
        let n = tube.normal_at(Vec3::new(1.0, 5.0, 0.0));
        assert!((n - Vec3::X).length() < 1e-6);

        // Level with the axis origin
        let n = tube.normal_at(Vec3::new(0.0, 0.0, -1.0));
        assert!((n + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_tube_rejects_bad_radius() {
        let axis = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(
            Tube::new(axis, 0.0),
            Err(GeometryError::NonPositiveRadius(0.0))
        );
    }

    #[test]
    fn test_tube_crossing() {
        let tube = z_tube();
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 3.0), Vec3::X);
        let mut points: Vec<Vec3> = tube
            .intersect(&ray, f32::INFINITY)
            .into_iter()
            .map(|t| ray.at(t))
            .collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));

        assert_eq!(points.len(), 2);
        assert!((points[0] - Vec3::new(-1.0, 0.0, 3.0)).length() < 1e-4);
        assert!((points[1] - Vec3::new(1.0, 0.0, 3.0)).length() < 1e-4);
    }

    #[test]
    fn test_tube_oblique_hits_lie_on_surface() {
        let tube = z_tube();
        let ray = Ray::new(Vec3::new(-4.0, 0.3, -2.0), Vec3::new(1.0, 0.0, 0.7));
        let hits = tube.intersect(&ray, f32::INFINITY);

        assert_eq!(hits.len(), 2);
        for t in hits {
            let p = ray.at(t);
            assert!((p.truncate().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tube_degenerate_rays() {
        let tube = z_tube();

        // Parallel to the axis, inside and outside
        assert!(tube
            .intersect(&Ray::new(Vec3::new(0.5, 0.0, 0.0), Vec3::Z), f32::INFINITY)
            .is_empty());
        assert!(tube
            .intersect(&Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::Z), f32::INFINITY)
            .is_empty());

        // Tangent
        assert!(tube
            .intersect(&Ray::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::X), f32::INFINITY)
            .is_empty());

        // Pointing away
        assert!(tube
            .intersect(&Ray::new(Vec3::new(-5.0, 0.0, 0.0), -Vec3::X), f32::INFINITY)
            .is_empty());
    }

    #[test]
    fn test_tube_from_inside() {
        let tube = z_tube();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::X);
        let hits = tube.intersect(&ray, f32::INFINITY);

        assert_eq!(hits.len(), 1);
        assert!((ray.at(hits[0]) - Vec3::new(1.0, 0.0, 5.0)).length() < 1e-4);
        assert!(tube.intersect(&ray, 0.5).is_empty());
    }
}
