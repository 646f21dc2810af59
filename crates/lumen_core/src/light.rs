//! Light sources.
//!
//! Ambient light is a flat term added once per primary hit; every other
//! light implements [`LightSource`] and is sampled per shading point.

use std::fmt;

use lumen_math::{direction, Color, MathError, Vec3};

/// Uniform ambient illumination: intensity `Ia` scaled by `Ka`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient contribution.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::ZERO,
    };

    pub fn new(ia: Color, ka: Vec3) -> Self {
        Self { intensity: ia * ka }
    }

    /// Effective intensity (`Ia * Ka`).
    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// A light that illuminates individual points.
pub trait LightSource: Send + Sync + fmt::Debug {
    /// Intensity arriving at `point`.
    fn intensity_at(&self, point: Vec3) -> Color;

    /// Unit direction from the light towards `point`.
    ///
    /// `None` when the point coincides with the light position.
    fn direction_at(&self, point: Vec3) -> Option<Vec3>;

    /// Distance from `point` to the light; infinite for directional lights.
    fn distance(&self, point: Vec3) -> f32;
}

/// Omnidirectional light with distance attenuation `1 / (kc + kl*d + kq*d^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Vec3,
    kc: f32,
    kl: f32,
    kq: f32,
}

impl PointLight {
    pub fn new(intensity: Color, position: Vec3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Set constant, linear and quadratic attenuation factors.
    pub fn with_attenuation(mut self, kc: f32, kl: f32, kq: f32) -> Self {
        self.kc = kc;
        self.kl = kl;
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    fn attenuated(&self, point: Vec3) -> Color {
        let d = self.position.distance(point);
        self.intensity / (self.kc + self.kl * d + self.kq * d * d)
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Vec3) -> Color {
        self.attenuated(point)
    }

    fn direction_at(&self, point: Vec3) -> Option<Vec3> {
        (point - self.position).try_normalize()
    }

    fn distance(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

/// A point light that only shines forward along `direction`.
///
/// Intensity falls off as `max(0, dir . l)^narrow_beam`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    direction: Vec3,
    narrow_beam: f32,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Vec3, dir: Vec3) -> Result<Self, MathError> {
        Ok(Self {
            point: PointLight::new(intensity, position),
            direction: direction(dir)?,
            narrow_beam: 1.0,
        })
    }

    pub fn with_attenuation(mut self, kc: f32, kl: f32, kq: f32) -> Self {
        self.point = self.point.with_attenuation(kc, kl, kq);
        self
    }

    /// Sharpen the beam; 1 is a plain cosine falloff.
    pub fn with_narrow_beam(mut self, narrow_beam: f32) -> Self {
        self.narrow_beam = narrow_beam;
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Vec3) -> Color {
        let Some(l) = self.point.direction_at(point) else {
            return Color::ZERO;
        };
        let cos = self.direction.dot(l).max(0.0);
        let factor = if self.narrow_beam == 1.0 {
            cos
        } else {
            cos.powf(self.narrow_beam)
        };
        self.point.attenuated(point) * factor
    }

    fn direction_at(&self, point: Vec3) -> Option<Vec3> {
        self.point.direction_at(point)
    }

    fn distance(&self, point: Vec3) -> f32 {
        self.point.distance(point)
    }
}

/// Light from infinitely far away along a fixed direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vec3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, dir: Vec3) -> Result<Self, MathError> {
        Ok(Self {
            intensity,
            direction: direction(dir)?,
        })
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Vec3) -> Color {
        self.intensity
    }

    fn direction_at(&self, _point: Vec3) -> Option<Vec3> {
        Some(self.direction)
    }

    fn distance(&self, _point: Vec3) -> f32 {
        f32::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_intensity() {
        let ambient = AmbientLight::new(Color::splat(100.0), Vec3::new(0.1, 0.2, 0.5));
        assert!((ambient.intensity() - Color::new(10.0, 20.0, 50.0)).length() < 1e-4);
        assert_eq!(AmbientLight::default(), AmbientLight::NONE);
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(Color::splat(100.0), Vec3::ZERO).with_attenuation(1.0, 0.5, 0.25);
        let p = Vec3::new(2.0, 0.0, 0.0);

        // 1 + 0.5*2 + 0.25*4 = 3
        assert!((light.intensity_at(p) - Color::splat(100.0 / 3.0)).length() < 1e-4);
        assert_eq!(light.direction_at(p), Some(Vec3::X));
        assert_eq!(light.distance(p), 2.0);
        assert_eq!(light.direction_at(Vec3::ZERO), None);
    }

    #[test]
    fn test_spot_light_beam() {
        let spot = SpotLight::new(Color::splat(100.0), Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0)).unwrap();

        // Straight ahead
        assert!((spot.intensity_at(Vec3::new(0.0, 0.0, -1.0)) - Color::splat(100.0)).length() < 1e-4);
        // Behind the light
        assert_eq!(spot.intensity_at(Vec3::new(0.0, 0.0, 1.0)), Color::ZERO);

        // 45 degrees off axis, sharpened
        let p = Vec3::new(1.0, 0.0, -1.0);
        let plain = spot.intensity_at(p).x;
        let narrow = spot.with_narrow_beam(4.0).intensity_at(p).x;
        let cos = std::f32::consts::FRAC_1_SQRT_2;
        assert!((plain - 100.0 * cos).abs() < 1e-3);
        assert!((narrow - 100.0 * cos.powi(4)).abs() < 1e-3);
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::splat(50.0), Vec3::new(0.0, -3.0, 0.0)).unwrap();
        assert_eq!(light.direction_at(Vec3::new(7.0, 1.0, 2.0)), Some(-Vec3::Y));
        assert_eq!(light.distance(Vec3::ZERO), f32::INFINITY);
        assert!(DirectionalLight::new(Color::ONE, Vec3::ZERO).is_err());
    }
}
