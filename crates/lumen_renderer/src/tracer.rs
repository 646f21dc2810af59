//! Recursive Whitted-style shading.
//!
//! Local lighting is Phong (emission, diffuse, specular) with shadow rays
//! that pass through transparent occluders. Global lighting follows one
//! reflected and one transmitted ray per hit, recursively, until either the
//! depth budget runs out or the accumulated attenuation drops below
//! [`TracerConfig::min_contribution`].

use std::sync::Arc;

use lumen_core::{GeoPoint, Intersectable, LightSource, Material, Scene};
use lumen_math::{align_zero, Color, Ray, Vec3};
use rand::RngCore;

use crate::beam::generate_beam;
use crate::TracerConfigError;

/// Computes the color seen along a ray.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color;
}

/// Recursion limits for [`WhittedTracer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerConfig {
    /// Number of hits shaded along one path, including the primary hit
    pub max_depth: u32,
    /// Attenuation below which a ray is not followed
    pub min_contribution: f32,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_contribution: 0.001,
        }
    }
}

impl TracerConfig {
    pub fn validate(&self) -> Result<(), TracerConfigError> {
        if self.max_depth == 0 {
            return Err(TracerConfigError::ZeroDepth);
        }
        if !(self.min_contribution > 0.0 && self.min_contribution <= 1.0) {
            return Err(TracerConfigError::InvalidContribution(self.min_contribution));
        }
        Ok(())
    }

    /// True when every channel of `k` is below the cutoff.
    #[inline]
    fn negligible(&self, k: Vec3) -> bool {
        k.max_element() < self.min_contribution
    }
}

/// Phong shading with shadows, reflection and transmission.
#[derive(Debug)]
pub struct WhittedTracer {
    scene: Arc<Scene>,
    config: TracerConfig,
}

impl WhittedTracer {
    pub fn new(scene: Arc<Scene>, config: TracerConfig) -> Result<Self, TracerConfigError> {
        config.validate()?;
        Ok(Self { scene, config })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    fn calc_color(
        &self,
        gp: &GeoPoint<'_>,
        ray: &Ray,
        depth: u32,
        k: Vec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        let local = self.calc_local_effects(gp, ray);
        if depth <= 1 || !gp.geometry.material().is_recursive() {
            return local;
        }
        local + self.calc_global_effects(gp, ray, depth, k, rng)
    }

    fn calc_local_effects(&self, gp: &GeoPoint<'_>, ray: &Ray) -> Color {
        let mut color = gp.geometry.emission();

        let v = ray.direction();
        let n = gp.geometry.normal_at(gp.point);
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return color;
        }

        let material = gp.geometry.material();
        for light in &self.scene.lights {
            let Some(l) = light.direction_at(gp.point) else {
                continue;
            };
            // Light and viewer must be on the same side of the surface
            let nl = align_zero(n.dot(l));
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(gp, light.as_ref(), l, n);
            if self.config.negligible(ktr) {
                continue;
            }

            let intensity = light.intensity_at(gp.point) * ktr;
            color += intensity * (diffuse(material, nl) + specular(material, l, n, nl, v));
        }
        color
    }

    /// Product of `kt` over everything between `gp` and the light.
    fn transparency(&self, gp: &GeoPoint<'_>, light: &dyn LightSource, l: Vec3, n: Vec3) -> Vec3 {
        let shadow_ray = Ray::with_bias(gp.point, -l, n);
        let distance = light.distance(gp.point);

        let mut ktr = Vec3::ONE;
        for occluder in self
            .scene
            .geometries
            .find_geo_intersections(&shadow_ray, distance)
        {
            ktr *= occluder.geometry.material().kt;
            if self.config.negligible(ktr) {
                return Vec3::ZERO;
            }
        }
        ktr
    }

    fn calc_global_effects(
        &self,
        gp: &GeoPoint<'_>,
        ray: &Ray,
        depth: u32,
        k: Vec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        let material = gp.geometry.material();
        let n = gp.geometry.normal_at(gp.point);
        let v = ray.direction();

        let reflected = v - n * (2.0 * v.dot(n));
        self.calc_global_effect(gp.point, reflected, n, material.kr, material, depth, k, rng)
            + self.calc_global_effect(gp.point, v, n, material.kt, material, depth, k, rng)
    }

    #[allow(clippy::too_many_arguments)]
    fn calc_global_effect(
        &self,
        point: Vec3,
        direction: Vec3,
        n: Vec3,
        kx: Vec3,
        material: &Material,
        depth: u32,
        k: Vec3,
        rng: &mut dyn RngCore,
    ) -> Color {
        let kkx = k * kx;
        if self.config.negligible(kkx) {
            return Color::ZERO;
        }

        let ray = Ray::with_bias(point, direction, n);
        let rays = match material.blur.filter(|b| b.is_enabled()) {
            Some(blur) => generate_beam(&ray, Some(n), blur.radius, blur.distance, blur.samples, rng),
            None => vec![ray],
        };

        let mut sum = Color::ZERO;
        for secondary in &rays {
            sum += match self.scene.geometries.find_closest_intersection(secondary) {
                Some(hit) => self.calc_color(&hit, secondary, depth - 1, kkx, rng),
                None => self.scene.background,
            };
        }
        sum / rays.len() as f32 * kx
    }
}

fn diffuse(material: &Material, nl: f32) -> Color {
    material.kd * nl.abs()
}

fn specular(material: &Material, l: Vec3, n: Vec3, nl: f32, v: Vec3) -> Color {
    let r = l - n * (2.0 * nl);
    let minus_vr = -align_zero(r.dot(v));
    if minus_vr <= 0.0 {
        return Color::ZERO;
    }
    material.ks * minus_vr.powi(material.shininess)
}

impl RayTracer for WhittedTracer {
    fn trace_ray(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        match self.scene.geometries.find_closest_intersection(ray) {
            Some(gp) => {
                self.scene.ambient_light.intensity()
                    + self.calc_color(&gp, ray, self.config.max_depth, Vec3::ONE, rng)
            }
            None => self.scene.background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::{
        AmbientLight, Blur, DirectionalLight, Geometries, Geometry, Plane, Sphere,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TOLERANCE: f32 = 1e-2;

    fn floor(material: Material) -> Geometry {
        Geometry::new(Plane::new(Vec3::ZERO, Vec3::Z).unwrap()).with_material(material)
    }

    fn matte() -> Material {
        Material::new(Vec3::splat(0.5))
            .with_ks(Vec3::splat(0.5))
            .with_shininess(1)
    }

    fn tracer(scene: Scene, config: TracerConfig) -> WhittedTracer {
        WhittedTracer::new(Arc::new(scene), config).unwrap()
    }

    fn trace(tracer: &WhittedTracer, ray: &Ray) -> Color {
        tracer.trace_ray(ray, &mut StdRng::seed_from_u64(0))
    }

    fn down() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z)
    }

    #[test]
    fn test_config_validation() {
        assert!(TracerConfig::default().validate().is_ok());

        let zero_depth = TracerConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(zero_depth.validate(), Err(TracerConfigError::ZeroDepth));

        for bad in [0.0, -0.5, 1.5, f32::NAN] {
            let config = TracerConfig {
                min_contribution: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = Scene::new("empty").with_background(Color::new(1.0, 2.0, 3.0));
        let t = tracer(scene, TracerConfig::default());
        assert_eq!(trace(&t, &down()), Color::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_emission_plus_ambient() {
        let mut geometries = Geometries::new();
        geometries.add(
            Geometry::new(Sphere::new(Vec3::ZERO, 1.0).unwrap())
                .with_emission(Color::new(100.0, 0.0, 0.0)),
        );
        let scene = Scene::new("glow")
            .with_geometries(geometries)
            .with_ambient_light(AmbientLight::new(Color::splat(100.0), Vec3::splat(0.1)));

        let color = trace(&tracer(scene, TracerConfig::default()), &down());
        assert!((color - Color::new(110.0, 10.0, 10.0)).length() < TOLERANCE);
    }

    #[test]
    fn test_diffuse_and_specular() {
        let mut geometries = Geometries::new();
        geometries.add(floor(matte()));
        let scene = Scene::new("lit")
            .with_geometries(geometries)
            .with_light(DirectionalLight::new(Color::splat(100.0), -Vec3::Z).unwrap());

        // Head-on: diffuse 50, specular 50
        let color = trace(&tracer(scene, TracerConfig::default()), &down());
        assert!((color - Color::splat(100.0)).length() < TOLERANCE);
    }

    #[test]
    fn test_light_behind_surface() {
        let mut geometries = Geometries::new();
        geometries.add(floor(matte()));
        let scene = Scene::new("backlit")
            .with_geometries(geometries)
            .with_light(DirectionalLight::new(Color::splat(100.0), Vec3::Z).unwrap());

        let color = trace(&tracer(scene, TracerConfig::default()), &down());
        assert_eq!(color, Color::ZERO);
    }

    fn shadow_scene(occluder_kt: f32) -> Scene {
        let mut geometries = Geometries::new();
        geometries.add(floor(matte()));
        geometries.add(
            Geometry::new(Sphere::new(Vec3::new(-3.0, 0.0, 3.0), 1.0).unwrap())
                .with_material(Material::default().with_kt(Vec3::splat(occluder_kt))),
        );
        Scene::new("shadow")
            .with_geometries(geometries)
            .with_light(DirectionalLight::new(Color::splat(100.0), Vec3::new(1.0, 0.0, -1.0)).unwrap())
    }

    #[test]
    fn test_shadows_and_transparency() {
        let unshadowed = 100.0 * std::f32::consts::FRAC_1_SQRT_2;

        let opaque = trace(&tracer(shadow_scene(0.0), TracerConfig::default()), &down());
        assert_eq!(opaque, Color::ZERO);

        // The shadow ray crosses the half-transparent sphere twice
        let glass = trace(&tracer(shadow_scene(0.5), TracerConfig::default()), &down());
        assert!((glass - Color::splat(unshadowed * 0.25)).length() < TOLERANCE);

        let clear = trace(&tracer(shadow_scene(1.0), TracerConfig::default()), &down());
        assert!((clear - Color::splat(unshadowed)).length() < TOLERANCE);
    }

    #[test]
    fn test_reflection_escapes_to_background() {
        let mut geometries = Geometries::new();
        geometries.add(floor(Material::default().with_kr(Vec3::splat(0.5))));
        let scene = Scene::new("mirror")
            .with_geometries(geometries)
            .with_background(Color::splat(100.0));

        let color = trace(&tracer(scene, TracerConfig::default()), &down());
        assert!((color - Color::splat(50.0)).length() < TOLERANCE);
    }

    #[test]
    fn test_blurred_reflection_averages_beam() {
        let mirror = Material::default()
            .with_kr(Vec3::splat(0.5))
            .with_blur(Blur::new(16, 0.3, 1.0));
        let mut geometries = Geometries::new();
        geometries.add(floor(mirror));
        let scene = Scene::new("glossy")
            .with_geometries(geometries)
            .with_background(Color::splat(100.0));

        let color = trace(&tracer(scene, TracerConfig::default()), &down());
        assert!((color - Color::splat(50.0)).length() < TOLERANCE);
    }

    fn glass_over_lamp(glass: Material) -> Scene {
        let mut geometries = Geometries::new();
        geometries.add(
            Geometry::new(Plane::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z).unwrap())
                .with_material(glass),
        );
        geometries.add(
            Geometry::new(Sphere::new(Vec3::ZERO, 1.0).unwrap())
                .with_emission(Color::splat(100.0)),
        );
        Scene::new("glass")
            .with_geometries(geometries)
            .with_background(Color::splat(7.0))
    }

    #[test]
    fn test_transmission_goes_straight_through() {
        let glass = Material::default().with_kt(Vec3::splat(0.5));
        let t = tracer(glass_over_lamp(glass), TracerConfig::default());

        let through = trace(&t, &down());
        assert!((through - Color::splat(50.0)).length() < TOLERANCE);

        // Beside the sphere the transmitted ray escapes
        let beside = Ray::new(Vec3::new(5.0, 0.0, 10.0), -Vec3::Z);
        assert!((trace(&t, &beside) - Color::splat(3.5)).length() < TOLERANCE);
    }

    #[test]
    fn test_blurred_transmission_averages_beam() {
        let frosted = Material::default()
            .with_kt(Vec3::splat(0.5))
            .with_blur(Blur::new(16, 0.05, 1.0));
        let t = tracer(glass_over_lamp(frosted), TracerConfig::default());

        // Every jittered ray still lands on the sphere
        let through = trace(&t, &down());
        assert!((through - Color::splat(50.0)).length() < TOLERANCE);

        let beside = Ray::new(Vec3::new(5.0, 0.0, 10.0), -Vec3::Z);
        assert!((trace(&t, &beside) - Color::splat(3.5)).length() < TOLERANCE);

        // Grazing: rays bent back above the glass are dropped from the beam
        let wide = Material::default()
            .with_kt(Vec3::splat(0.5))
            .with_blur(Blur::new(32, 0.5, 1.0));
        let t = tracer(glass_over_lamp(wide), TracerConfig::default());
        let grazing = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(1.0, 0.0, -0.05));
        assert!((trace(&t, &grazing) - Color::splat(3.5)).length() < TOLERANCE);
    }

    fn hall_of_mirrors() -> Scene {
        let mirror = Material::default().with_kr(Vec3::splat(0.5));
        let mut geometries = Geometries::new();
        geometries.add(
            Geometry::new(Plane::new(Vec3::ZERO, Vec3::Z).unwrap())
                .with_material(mirror.clone())
                .with_emission(Color::new(10.0, 20.0, 30.0)),
        );
        geometries.add(
            Geometry::new(Plane::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z).unwrap())
                .with_material(mirror)
                .with_emission(Color::new(30.0, 20.0, 10.0)),
        );
        Scene::new("hall").with_geometries(geometries)
    }

    #[test]
    fn test_depth_limits_recursion() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.2, 0.0, -1.0));
        let shallow = TracerConfig {
            max_depth: 1,
            ..Default::default()
        };
        let deeper = TracerConfig {
            max_depth: 2,
            ..Default::default()
        };

        let one = trace(&tracer(hall_of_mirrors(), shallow), &ray);
        let two = trace(&tracer(hall_of_mirrors(), deeper), &ray);

        assert!((one - Color::new(10.0, 20.0, 30.0)).length() < TOLERANCE);
        assert!((two - Color::new(25.0, 30.0, 35.0)).length() < TOLERANCE);
    }

    #[test]
    fn test_cutoff_makes_extra_depth_irrelevant() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.2, 0.0, -1.0));
        let config = |max_depth| TracerConfig {
            max_depth,
            min_contribution: 0.1,
        };

        // 0.5^4 < 0.1: no ray beyond the fourth hit is ever followed
        let at_cutoff = trace(&tracer(hall_of_mirrors(), config(4)), &ray);
        let deep = trace(&tracer(hall_of_mirrors(), config(6)), &ray);
        let deeper = trace(&tracer(hall_of_mirrors(), config(20)), &ray);

        assert_eq!(at_cutoff, deep);
        assert_eq!(deep, deeper);
    }
}
