//! Scene container: surfaces, lights and global lighting terms.

use log::info;
use lumen_math::Color;
use rand::Rng;

use crate::{AmbientLight, Geometries, LightSource};

/// Everything the tracer needs to shade a ray.
///
/// A scene is assembled once, then shared read-only (typically through an
/// `Arc`) while rendering.
#[derive(Debug)]
pub struct Scene {
    /// Scene name, used in logs
    pub name: String,

    /// Color of rays that hit nothing
    pub background: Color,

    /// Flat ambient term
    pub ambient_light: AmbientLight,

    /// Root composite
    pub geometries: Geometries,

    /// Point-sampled lights
    pub lights: Vec<Box<dyn LightSource>>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::ZERO,
            ambient_light: AmbientLight::NONE,
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    pub fn with_light(mut self, light: impl LightSource + 'static) -> Self {
        self.lights.push(Box::new(light));
        self
    }

    pub fn with_lights(mut self, lights: Vec<Box<dyn LightSource>>) -> Self {
        self.lights = lights;
        self
    }

    /// Cluster the root composite into `k` pruning groups.
    ///
    /// Must run before the scene is shared for rendering.
    pub fn build_hierarchy<R: Rng + ?Sized>(&mut self, k: usize, rng: &mut R) {
        let before = self.geometries.len();
        self.geometries.build_hierarchy(k, rng);
        info!(
            "Scene '{}': {} top-level surfaces regrouped into {} nodes",
            self.name,
            before,
            self.geometries.len()
        );
    }
}
