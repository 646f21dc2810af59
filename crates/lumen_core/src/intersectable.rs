//! Intersectable trait and GeoPoint for ray-surface intersection.

use std::fmt;

use crate::Geometry;
use lumen_math::{align_zero, Aabb, Ray, Vec3};

/// A point where a ray meets a surface.
///
/// The surface is borrowed from the scene that owns it; a `GeoPoint` never
/// outlives the scene it was found in.
#[derive(Clone, Copy)]
pub struct GeoPoint<'a> {
    /// Surface that was hit
    pub geometry: &'a Geometry,
    /// Point of intersection
    pub point: Vec3,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a Geometry, point: Vec3) -> Self {
        Self { geometry, point }
    }

    /// Distance from `origin` to the hit point.
    #[inline]
    pub fn distance_from(&self, origin: Vec3) -> f32 {
        origin.distance(self.point)
    }
}

impl PartialEq for GeoPoint<'_> {
    /// Same surface (by identity) and same point.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.geometry, other.geometry) && self.point == other.point
    }
}

impl fmt::Debug for GeoPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeoPoint")
            .field("geometry", &(self.geometry as *const Geometry))
            .field("point", &self.point)
            .finish()
    }
}

/// Returns true if `point` is no farther than `max_distance` from the ray origin.
#[inline]
pub(crate) fn within_distance(ray: &Ray, point: Vec3, max_distance: f32) -> bool {
    align_zero(ray.origin().distance(point) - max_distance) <= 0.0
}

/// Pick the hit closest to the ray origin.
pub fn closest_geo_point<'a>(ray: &Ray, points: Vec<GeoPoint<'a>>) -> Option<GeoPoint<'a>> {
    let origin = ray.origin();
    points.into_iter().min_by(|a, b| {
        a.distance_from(origin)
            .partial_cmp(&b.distance_from(origin))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Trait for anything a ray can be tested against: single surfaces and
/// composites of them.
pub trait Intersectable: Send + Sync + fmt::Debug {
    /// Find every forward hit no farther than `max_distance` along the ray.
    ///
    /// Hits are unordered. An empty vector means no intersection.
    fn find_geo_intersections<'a>(&'a self, ray: &Ray, max_distance: f32) -> Vec<GeoPoint<'a>>;

    /// Axis-aligned bounding box, or `None` for unbounded surfaces.
    fn bounding_box(&self) -> Option<Aabb>;

    /// Hit points without their surfaces, unlimited distance.
    fn find_intersections(&self, ray: &Ray) -> Vec<Vec3> {
        self.find_geo_intersections(ray, f32::INFINITY)
            .into_iter()
            .map(|gp| gp.point)
            .collect()
    }

    /// Nearest hit along the ray, unlimited distance.
    fn find_closest_intersection<'a>(&'a self, ray: &Ray) -> Option<GeoPoint<'a>> {
        closest_geo_point(ray, self.find_geo_intersections(ray, f32::INFINITY))
    }
}
