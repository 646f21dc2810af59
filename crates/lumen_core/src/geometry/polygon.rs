//! Convex planar polygon primitive. Triangles are polygons with three vertices.

use super::{Plane, Surface};
use crate::GeometryError;
use lumen_math::{align_zero, is_zero, Aabb, Ray, Vec3};

/// A convex polygon whose vertices lie in one plane.
///
/// Vertices are ordered along the boundary; the face normal follows the
/// right-hand rule over the first three of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec3>,
    plane: Plane,
}

impl Polygon {
    /// Create a polygon, validating vertex count, coplanarity and convexity.
    pub fn new(vertices: Vec<Vec3>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let normal = plane.normal();

        // Offsets and edges are normalized so the checks hold at any scale
        for (i, v) in vertices.iter().enumerate().skip(3) {
            if !is_zero(normal.dot((*v - vertices[0]).normalize_or_zero())) {
                return Err(GeometryError::NonCoplanar(i));
            }
        }

        // Every turn along the boundary must bend the same way as the first
        let n = vertices.len();
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];
            let turn = (b - a).normalize_or_zero().cross((c - b).normalize_or_zero());
            let turn = align_zero(turn.dot(normal));
            if turn <= 0.0 {
                return Err(GeometryError::NonConvex((i + 1) % n));
            }
        }

        Ok(Self { vertices, plane })
    }

    /// Create a triangle.
    pub fn triangle(v0: Vec3, v1: Vec3, v2: Vec3) -> Result<Self, GeometryError> {
        Self::new(vec![v0, v1, v2])
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Supporting plane.
    pub fn plane(&self) -> &Plane {
        &self.plane
    }
}

impl Surface for Polygon {
    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.plane.normal()
    }

    fn intersect(&self, ray: &Ray, max_distance: f32) -> Vec<f32> {
        let hits = self.plane.intersect(ray, max_distance);
        if hits.is_empty() {
            return hits;
        }

        // The ray must pass on the same side of every edge-origin plane.
        // A zero means it grazes an edge or vertex, which does not count.
        let origin = ray.origin();
        let dir = ray.direction();
        let n = self.vertices.len();
        let mut sign = 0.0_f32;
        for i in 0..n {
            let vi = self.vertices[i] - origin;
            let vj = self.vertices[(i + 1) % n] - origin;
            let side = align_zero(dir.dot(vi.cross(vj).normalize_or_zero()));
            if side == 0.0 || side * sign < 0.0 {
                return Vec::new();
            }
            sign = side;
        }

        hits
    }

    fn bounding_box(&self) -> Option<Aabb> {
        Some(Aabb::from_point_cloud(self.vertices.iter().copied()))
    }
}
