//! Phong material definition.

use lumen_math::Vec3;

/// Glossy reflection / frosted transmission parameters.
///
/// Secondary rays are replaced by `samples` rays jittered over a disc of
/// `radius` placed `distance` along the nominal direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blur {
    /// Rays per beam, including the unperturbed one
    pub samples: u32,

    /// Radius of the jitter disc
    pub radius: f32,

    /// Distance of the jitter disc from the hit point
    pub distance: f32,
}

impl Blur {
    pub fn new(samples: u32, radius: f32, distance: f32) -> Self {
        Self {
            samples,
            radius,
            distance,
        }
    }

    /// A beam only does anything with more than one sample over a real disc.
    pub fn is_enabled(&self) -> bool {
        self.samples > 1 && self.radius > 0.0 && self.distance > 0.0
    }
}

/// Surface response coefficients for the Phong model.
///
/// All coefficients are per channel (RGB, nominally 0-1).
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse attenuation
    pub kd: Vec3,

    /// Specular attenuation
    pub ks: Vec3,

    /// Specular exponent
    pub shininess: i32,

    /// Reflection coefficient
    pub kr: Vec3,

    /// Transmission coefficient
    pub kt: Vec3,

    /// Optional glossy/frosted sampling
    pub blur: Option<Blur>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: Vec3::ZERO,
            ks: Vec3::ZERO,
            shininess: 0,
            kr: Vec3::ZERO,
            kt: Vec3::ZERO,
            blur: None,
        }
    }
}

impl Material {
    /// Create a diffuse-only material.
    pub fn new(kd: Vec3) -> Self {
        Self {
            kd,
            ..Default::default()
        }
    }

    pub fn with_kd(mut self, kd: Vec3) -> Self {
        self.kd = kd;
        self
    }

    pub fn with_ks(mut self, ks: Vec3) -> Self {
        self.ks = ks;
        self
    }

    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_kr(mut self, kr: Vec3) -> Self {
        self.kr = kr;
        self
    }

    pub fn with_kt(mut self, kt: Vec3) -> Self {
        self.kt = kt;
        self
    }

    pub fn with_blur(mut self, blur: Blur) -> Self {
        self.blur = Some(blur);
        self
    }

    /// Check if this material reflects or transmits anything.
    pub fn is_recursive(&self) -> bool {
        self.kr != Vec3::ZERO || self.kt != Vec3::ZERO
    }
}
