//! Composite of intersectables with bounding-box pruning.
//!
//! A `Geometries` owns its children and keeps an aggregate bounding box.
//! With pruning enabled a ray that misses the box skips every child.
//! [`Geometries::build_hierarchy`] groups bounded children into k-means
//! clusters, each a pruning composite of its own, giving a one-level BVH.

use log::{debug, warn};
use lumen_math::{Aabb, Interval, Ray, EPSILON};
use rand::Rng;

use crate::cluster::kmeans;
use crate::intersectable::within_distance;
use crate::{GeoPoint, Intersectable};

/// An owned collection of intersectables, itself intersectable.
#[derive(Debug)]
pub struct Geometries {
    children: Vec<Box<dyn Intersectable>>,
    /// `None` once any child is unbounded
    bbox: Option<Aabb>,
    bvh: bool,
}

impl Default for Geometries {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometries {
    /// Create an empty composite with pruning disabled.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            bbox: Some(Aabb::EMPTY),
            bvh: false,
        }
    }

    /// Enable or disable bounding-box pruning.
    pub fn with_bvh(mut self, bvh: bool) -> Self {
        self.bvh = bvh;
        self
    }

    pub fn set_bvh(&mut self, bvh: bool) {
        self.bvh = bvh;
    }

    pub fn bvh(&self) -> bool {
        self.bvh
    }

    /// Append a child and grow the aggregate box.
    pub fn add(&mut self, child: impl Intersectable + 'static) {
        self.add_boxed(Box::new(child));
    }

    pub fn add_boxed(&mut self, child: Box<dyn Intersectable>) {
        self.bbox = match (self.bbox, child.bounding_box()) {
            (Some(acc), Some(b)) => Some(Aabb::surrounding(&acc, &b)),
            _ => None,
        };
        self.children.push(child);
    }

    pub fn add_all(&mut self, children: impl IntoIterator<Item = Box<dyn Intersectable>>) {
        for child in children {
            self.add_boxed(child);
        }
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[Box<dyn Intersectable>] {
        &self.children
    }

    /// Slab test against the aggregate box. Unbounded composites always pass.
    pub fn bounding_box_hit(&self, ray: &Ray, max_distance: f32) -> bool {
        match &self.bbox {
            Some(bbox) => bbox.hit(ray, Interval::new(0.0, max_distance + EPSILON)),
            None => true,
        }
    }

    /// Regroup the bounded children into `k` pruning clusters.
    ///
    /// Unbounded children stay directly under this composite. `k` is
    /// clamped to the number of bounded children; `k <= 1` or fewer than two
    /// bounded children leaves the composite untouched. The hit set of any
    /// ray is the same before and after.
    pub fn build_hierarchy<R: Rng + ?Sized>(&mut self, k: usize, rng: &mut R) {
        let bounded = self
            .children
            .iter()
            .filter(|c| c.bounding_box().is_some())
            .count();
        if k <= 1 || bounded < 2 {
            debug!(
                "Skipping clustering: k={}, {} bounded children",
                k, bounded
            );
            return;
        }

        let k = if k > bounded {
            warn!(
                "Requested {} clusters for {} bounded children, using {}",
                k, bounded, bounded
            );
            bounded
        } else {
            k
        };

        let (boxed, unbounded): (Vec<_>, Vec<_>) = std::mem::take(&mut self.children)
            .into_iter()
            .partition(|c| c.bounding_box().is_some());

        let centers: Vec<_> = boxed
            .iter()
            .filter_map(|c| c.bounding_box())
            .map(|b| b.centroid())
            .collect();
        let assignments = kmeans(&centers, k, rng);

        let mut clusters: Vec<Geometries> =
            (0..k).map(|_| Geometries::new().with_bvh(true)).collect();
        for (child, cluster) in boxed.into_iter().zip(assignments) {
            clusters[cluster].add_boxed(child);
        }

        let unbounded_count = unbounded.len();
        self.bbox = Some(Aabb::EMPTY);
        self.add_all(unbounded);
        for cluster in clusters.into_iter().filter(|c| !c.is_empty()) {
            self.add(cluster);
        }

        debug!(
            "Clustered {} bounded surfaces into {} groups ({} unbounded kept at root)",
            bounded,
            self.children.len() - unbounded_count,
            unbounded_count
        );
    }
}

impl Intersectable for Geometries {
    fn find_geo_intersections<'a>(&'a self, ray: &Ray, max_distance: f32) -> Vec<GeoPoint<'a>> {
        if self.bvh && !self.bounding_box_hit(ray, max_distance) {
            return Vec::new();
        }

        self.children
            .iter()
            .flat_map(|child| child.find_geo_intersections(ray, max_distance))
            .filter(|gp| within_distance(ray, gp.point, max_distance))
            .collect()
    }

    fn bounding_box(&self) -> Option<Aabb> {
        self.bbox
    }
}
