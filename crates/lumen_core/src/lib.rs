//! Lumen Core - scene model for the Lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Surfaces**: `Sphere`, `Plane`, `Polygon` (and triangles), `Tube`,
//!   `Cylinder`, wrapped with material and emission in `Geometry`
//! - **Intersection contract**: `Intersectable` and the borrowed `GeoPoint`
//! - **Composite**: `Geometries` with bounding-box pruning and k-means
//!   clustering into a shallow hierarchy
//! - **Lighting**: ambient, point, spot and directional lights
//! - **Scene loading**: JSON scene descriptions
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::loader::load_scene;
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} surfaces, {} lights",
//!     scene.geometries.len(),
//!     scene.lights.len());
//! ```

pub mod cluster;
pub mod error;
pub mod geometries;
pub mod geometry;
pub mod intersectable;
pub mod light;
pub mod loader;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use error::GeometryError;
pub use geometries::Geometries;
pub use geometry::{Cylinder, Geometry, Plane, Polygon, Shape, Sphere, Surface, Tube};
pub use intersectable::{GeoPoint, Intersectable};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use loader::{load_scene, load_scene_from_str, LoadError, SceneDescription};
pub use material::{Blur, Material};
pub use scene::Scene;
