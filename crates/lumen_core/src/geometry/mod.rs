//! Primitive surfaces and the `Geometry` wrapper that gives them a material.
//!
//! Shapes form a closed set ([`Shape`]); each implements [`Surface`] and the
//! enum dispatches to them with a `match`.

mod cylinder;
mod plane;
mod polygon;
mod sphere;
mod tube;

pub use cylinder::Cylinder;
pub use plane::Plane;
pub use polygon::Polygon;
pub use sphere::Sphere;
pub use tube::Tube;

use crate::{GeoPoint, Intersectable, Material};
use lumen_math::{align_zero, Aabb, Color, Ray, Vec3};

/// Geometric capability shared by every primitive.
pub trait Surface {
    /// Unit normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Ray parameters of every forward hit no farther than `max_distance`.
    fn intersect(&self, ray: &Ray, max_distance: f32) -> Vec<f32>;

    /// Axis-aligned bounds, `None` for unbounded shapes.
    fn bounding_box(&self) -> Option<Aabb>;
}

/// Accept a ray parameter if it is in front of the origin and within range.
///
/// `t` must already be zero-aligned.
#[inline]
pub(crate) fn in_range(t: f32, max_distance: f32) -> bool {
    t > 0.0 && align_zero(t - max_distance) <= 0.0
}

/// The closed set of primitive shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Surface for Shape {
    fn normal_at(&self, point: Vec3) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Plane(s) => s.normal_at(point),
            Shape::Polygon(s) => s.normal_at(point),
            Shape::Tube(s) => s.normal_at(point),
            Shape::Cylinder(s) => s.normal_at(point),
        }
    }

    fn intersect(&self, ray: &Ray, max_distance: f32) -> Vec<f32> {
        match self {
            Shape::Sphere(s) => s.intersect(ray, max_distance),
            Shape::Plane(s) => s.intersect(ray, max_distance),
            Shape::Polygon(s) => s.intersect(ray, max_distance),
            Shape::Tube(s) => s.intersect(ray, max_distance),
            Shape::Cylinder(s) => s.intersect(ray, max_distance),
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        match self {
            Shape::Sphere(s) => s.bounding_box(),
            Shape::Plane(s) => s.bounding_box(),
            Shape::Polygon(s) => s.bounding_box(),
            Shape::Tube(s) => s.bounding_box(),
            Shape::Cylinder(s) => s.bounding_box(),
        }
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape!(Sphere, Plane, Polygon, Tube, Cylinder);

/// A shape with its material and emission.
///
/// The bounding box is computed once here and never changes.
#[derive(Debug, Clone)]
pub struct Geometry {
    shape: Shape,
    material: Material,
    emission: Color,
    bbox: Option<Aabb>,
}

impl Geometry {
    /// Wrap a shape with the default (black, non-reflective) material.
    pub fn new(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let bbox = shape.bounding_box();
        Self {
            shape,
            material: Material::default(),
            emission: Color::ZERO,
            bbox,
        }
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set the emitted color.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    /// Unit surface normal at `point`.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        self.shape.normal_at(point)
    }
}

impl Intersectable for Geometry {
    fn find_geo_intersections<'a>(&'a self, ray: &Ray, max_distance: f32) -> Vec<GeoPoint<'a>> {
        self.shape
            .intersect(ray, max_distance)
            .into_iter()
            .map(|t| GeoPoint::new(self, ray.at(t)))
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_caches_bounding_box() {
        let sphere = Geometry::new(Sphere::new(Vec3::ZERO, 2.0).unwrap());
        let bbox = sphere.bounding_box().unwrap();
        assert_eq!(bbox.min(), Vec3::splat(-2.0));
        assert_eq!(bbox.max(), Vec3::splat(2.0));

        let plane = Geometry::new(Plane::new(Vec3::ZERO, Vec3::Z).unwrap());
        assert!(plane.bounding_box().is_none());
    }

    #[test]
    fn test_geometry_hits_carry_surface() {
        let sphere = Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0).unwrap())
            .with_emission(Color::new(10.0, 20.0, 30.0));
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        let hits = sphere.find_geo_intersections(&ray, f32::INFINITY);
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert!(std::ptr::eq(hit.geometry, &sphere));
            assert_eq!(hit.geometry.emission(), Color::new(10.0, 20.0, 30.0));
        }

        // Only the near side is within 2.5 units
        assert_eq!(sphere.find_geo_intersections(&ray, 2.5).len(), 1);
    }

    #[test]
    fn test_in_range() {
        assert!(in_range(1.0, 2.0));
        assert!(in_range(2.0, 2.0));
        assert!(!in_range(0.0, 2.0));
        assert!(!in_range(-1.0, 2.0));
        assert!(!in_range(2.1, 2.0));
    }
}
