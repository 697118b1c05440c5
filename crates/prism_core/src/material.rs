//! Phong material coefficients.

use glam::DVec3;

/// Color type alias (linear RGB, display range 0-1)
pub type Color = DVec3;

/// Per-channel attenuation coefficients.
pub type Double3 = DVec3;

/// Build a color from 8-bit channel values.
pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f64, g as f64, b as f64) / 255.0
}

/// Surface response in the Phong reflectance model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse attenuation
    pub kd: Double3,
    /// Specular attenuation
    pub ks: Double3,
    /// Transmission attenuation
    pub kt: Double3,
    /// Reflection attenuation
    pub kr: Double3,
    /// Specular exponent, at least 1
    pub shininess: i32,
}

impl Material {
    /// Create a material that neither scatters nor transmits light.
    pub fn new() -> Self {
        Self {
            kd: Double3::ZERO,
            ks: Double3::ZERO,
            kt: Double3::ZERO,
            kr: Double3::ZERO,
            shininess: 1,
        }
    }

    pub fn with_kd(mut self, kd: Double3) -> Self {
        self.kd = kd;
        self
    }

    pub fn with_ks(mut self, ks: Double3) -> Self {
        self.ks = ks;
        self
    }

    pub fn with_kt(mut self, kt: Double3) -> Self {
        self.kt = kt;
        self
    }

    pub fn with_kr(mut self, kr: Double3) -> Self {
        self.kr = kr;
        self
    }

    /// Set the specular exponent. Values below 1 are raised to 1.
    pub fn with_shininess(mut self, shininess: i32) -> Self {
        self.shininess = shininess.max(1);
        self
    }

    /// True if light passes through this material at all.
    ///
    /// Shadow rays treat any transmitting occluder as fully transparent.
    pub fn is_transmissive(&self) -> bool {
        self.kt != Double3::ZERO
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_defaults() {
        let m = Material::default();
        assert_eq!(m.kd, Double3::ZERO);
        assert_eq!(m.ks, Double3::ZERO);
        assert_eq!(m.kt, Double3::ZERO);
        assert_eq!(m.kr, Double3::ZERO);
        assert_eq!(m.shininess, 1);
        assert!(!m.is_transmissive());
    }

    #[test]
    fn test_material_builder() {
        let m = Material::new()
            .with_kd(Double3::splat(0.5))
            .with_ks(Double3::new(0.1, 0.2, 0.3))
            .with_kt(Double3::new(0.0, 0.0, 0.2))
            .with_shininess(60);

        assert_eq!(m.kd, Double3::splat(0.5));
        assert_eq!(m.ks.y, 0.2);
        assert_eq!(m.shininess, 60);
        assert!(m.is_transmissive());
    }

    #[test]
    fn test_shininess_at_least_one() {
        assert_eq!(Material::new().with_shininess(0).shininess, 1);
        assert_eq!(Material::new().with_shininess(-5).shininess, 1);
        assert_eq!(Material::new().with_shininess(1).shininess, 1);
    }

    #[test]
    fn test_rgb8() {
        let c = rgb8(255, 0, 51);
        assert_eq!(c, Color::new(1.0, 0.0, 0.2));
    }
}
