//! JSON scene loading.
//!
//! A scene file is a [`SceneDescription`]: plain serde data that is turned
//! into a [`Scene`] by [`SceneDescription::build`]. Shapes and lights are
//! tagged by a `"type"` field.
//!
//! ```json
//! {
//!   "name": "two spheres",
//!   "background": [10, 10, 20],
//!   "ambient": { "color": [255, 255, 255], "ka": 0.1 },
//!   "geometries": [
//!     { "type": "sphere", "center": [0, 0, -50], "radius": 20,
//!       "emission": [60, 0, 0],
//!       "material": { "kd": 0.5, "ks": 0.5, "shininess": 60 } },
//!     { "type": "plane", "point": [0, -20, 0], "normal": [0, 1, 0] }
//!   ],
//!   "lights": [
//!     { "type": "point", "intensity": [500, 300, 300], "position": [40, 40, 0] }
//!   ],
//!   "hierarchy": { "pruning": true, "clusters": 4, "seed": 1 }
//! }
//! ```

use std::path::Path;

use log::{debug, info};
use lumen_math::{MathError, Ray, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    AmbientLight, Blur, Cylinder, DirectionalLight, Geometries, Geometry, GeometryError,
    LightSource, Material, Plane, PointLight, Polygon, Scene, Shape, Sphere, SpotLight, Tube,
};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid geometry #{index}: {source}")]
    Geometry {
        index: usize,
        #[source]
        source: GeometryError,
    },

    #[error("Invalid light: {0}")]
    Math(#[from] MathError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// A per-channel coefficient: one number for all channels, or RGB.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Coefficient {
    Uniform(f32),
    Rgb([f32; 3]),
}

impl Default for Coefficient {
    fn default() -> Self {
        Coefficient::Uniform(0.0)
    }
}

impl Coefficient {
    pub fn to_vec3(self) -> Vec3 {
        match self {
            Coefficient::Uniform(v) => Vec3::splat(v),
            Coefficient::Rgb(rgb) => Vec3::from_array(rgb),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
    },
    Triangle {
        vertices: [[f32; 3]; 3],
    },
    Polygon {
        vertices: Vec<[f32; 3]>,
    },
    Tube {
        origin: [f32; 3],
        direction: [f32; 3],
        radius: f32,
    },
    Cylinder {
        origin: [f32; 3],
        direction: [f32; 3],
        radius: f32,
        height: f32,
    },
}

impl ShapeDescription {
    pub fn build(&self) -> Result<Shape, GeometryError> {
        let v = Vec3::from_array;
        let shape: Shape = match self {
            ShapeDescription::Sphere { center, radius } => Sphere::new(v(*center), *radius)?.into(),
            ShapeDescription::Plane { point, normal } => Plane::new(v(*point), v(*normal))?.into(),
            ShapeDescription::Triangle { vertices: [a, b, c] } => {
                Polygon::triangle(v(*a), v(*b), v(*c))?.into()
            }
            ShapeDescription::Polygon { vertices } => {
                Polygon::new(vertices.iter().copied().map(v).collect())?.into()
            }
            ShapeDescription::Tube {
                origin,
                direction,
                radius,
            } => Tube::new(Ray::try_new(v(*origin), v(*direction))?, *radius)?.into(),
            ShapeDescription::Cylinder {
                origin,
                direction,
                radius,
                height,
            } => Cylinder::new(Ray::try_new(v(*origin), v(*direction))?, *radius, *height)?.into(),
        };
        Ok(shape)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BlurDescription {
    pub samples: u32,
    pub radius: f32,
    pub distance: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MaterialDescription {
    pub kd: Coefficient,
    pub ks: Coefficient,
    pub shininess: i32,
    pub kr: Coefficient,
    pub kt: Coefficient,
    pub blur: Option<BlurDescription>,
}

impl MaterialDescription {
    pub fn build(&self) -> Material {
        let material = Material::new(self.kd.to_vec3())
            .with_ks(self.ks.to_vec3())
            .with_shininess(self.shininess)
            .with_kr(self.kr.to_vec3())
            .with_kt(self.kt.to_vec3());
        match self.blur {
            Some(b) => material.with_blur(Blur::new(b.samples, b.radius, b.distance)),
            None => material,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeometryDescription {
    #[serde(flatten)]
    pub shape: ShapeDescription,
    #[serde(default)]
    pub material: MaterialDescription,
    #[serde(default)]
    pub emission: [f32; 3],
}

/// Constant, linear and quadratic distance attenuation.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Attenuation {
    pub kc: f32,
    pub kl: f32,
    pub kq: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }
}

fn default_narrow_beam() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDescription {
    Point {
        intensity: [f32; 3],
        position: [f32; 3],
        #[serde(default)]
        attenuation: Attenuation,
    },
    Spot {
        intensity: [f32; 3],
        position: [f32; 3],
        direction: [f32; 3],
        #[serde(default)]
        attenuation: Attenuation,
        #[serde(default = "default_narrow_beam")]
        narrow_beam: f32,
    },
    Directional {
        intensity: [f32; 3],
        direction: [f32; 3],
    },
}

impl LightDescription {
    pub fn build(&self) -> Result<Box<dyn LightSource>, MathError> {
        let v = Vec3::from_array;
        let light: Box<dyn LightSource> = match self {
            LightDescription::Point {
                intensity,
                position,
                attenuation: a,
            } => Box::new(
                PointLight::new(v(*intensity), v(*position)).with_attenuation(a.kc, a.kl, a.kq),
            ),
            LightDescription::Spot {
                intensity,
                position,
                direction,
                attenuation: a,
                narrow_beam,
            } => Box::new(
                SpotLight::new(v(*intensity), v(*position), v(*direction))?
                    .with_attenuation(a.kc, a.kl, a.kq)
                    .with_narrow_beam(*narrow_beam),
            ),
            LightDescription::Directional {
                intensity,
                direction,
            } => Box::new(DirectionalLight::new(v(*intensity), v(*direction))?),
        };
        Ok(light)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AmbientDescription {
    pub color: [f32; 3],
    #[serde(default)]
    pub ka: Coefficient,
}

/// Acceleration settings for the root composite.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct HierarchyDescription {
    /// Enable bounding-box pruning on the root
    pub pruning: bool,
    /// k-means cluster count; 0 or 1 leaves the root flat
    pub clusters: usize,
    /// Seed for cluster initialisation
    pub seed: u64,
}

/// Serializable description of a whole scene.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub name: Option<String>,
    pub background: [f32; 3],
    pub ambient: Option<AmbientDescription>,
    pub geometries: Vec<GeometryDescription>,
    pub lights: Vec<LightDescription>,
    pub hierarchy: HierarchyDescription,
}

impl SceneDescription {
    /// Build the scene, validating every surface and light.
    pub fn build(&self) -> LoadResult<Scene> {
        let name = self.name.as_deref().unwrap_or("unnamed");

        let mut geometries = Geometries::new().with_bvh(self.hierarchy.pruning);
        for (index, desc) in self.geometries.iter().enumerate() {
            let shape = desc
                .shape
                .build()
                .map_err(|source| LoadError::Geometry { index, source })?;
            geometries.add(
                Geometry::new(shape)
                    .with_material(desc.material.build())
                    .with_emission(Vec3::from_array(desc.emission)),
            );
        }

        let lights = self
            .lights
            .iter()
            .map(LightDescription::build)
            .collect::<Result<Vec<_>, _>>()?;

        let ambient = self
            .ambient
            .map(|a| AmbientLight::new(Vec3::from_array(a.color), a.ka.to_vec3()))
            .unwrap_or_default();

        let mut scene = Scene::new(name)
            .with_background(Vec3::from_array(self.background))
            .with_ambient_light(ambient)
            .with_geometries(geometries)
            .with_lights(lights);

        if self.hierarchy.clusters > 1 {
            debug!(
                "Clustering '{}' into {} groups (seed {})",
                name, self.hierarchy.clusters, self.hierarchy.seed
            );
            let mut rng = StdRng::seed_from_u64(self.hierarchy.seed);
            scene.build_hierarchy(self.hierarchy.clusters, &mut rng);
        }

        info!(
            "Loaded scene '{}': {} surfaces, {} lights",
            scene.name,
            self.geometries.len(),
            scene.lights.len()
        );
        Ok(scene)
    }
}

/// Load a scene from a JSON file.
///
/// A scene without a `name` is named after the file.
///
/// # Example
///
/// ```ignore
/// use lumen_core::loader::load_scene;
///
/// let scene = load_scene("scenes/spheres.json")?;
/// println!("Loaded {} lights", scene.lights.len());
/// ```
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mut desc: SceneDescription = serde_json::from_str(&text)?;
    if desc.name.is_none() {
        desc.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_owned);
    }
    desc.build()
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<Scene> {
    let desc: SceneDescription = serde_json::from_str(json)?;
    desc.build()
}
