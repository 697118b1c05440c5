//! Light sources.
//!
//! The direction a light reports at a point is the direction its light
//! travels, from the source toward the point. Shading negates it to aim a
//! shadow ray back at the light.

use prism_math::{align_zero, MathResult, Point, Vector};

use crate::{Color, Double3};

/// Uniform ambient illumination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient light.
    pub const NONE: AmbientLight = AmbientLight {
        intensity: Color::ZERO,
    };

    /// Ambient light of color `ia` attenuated per channel by `ka`.
    pub fn new(ia: Color, ka: Double3) -> Self {
        Self { intensity: ia * ka }
    }

    /// Ambient light of color `ia` attenuated uniformly by `ka`.
    pub fn uniform(ia: Color, ka: f64) -> Self {
        Self { intensity: ia * ka }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// Light arriving from infinitely far away along a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

/// Omnidirectional light at a position, attenuated with distance by
/// `1 / (kc + kl*d + kq*d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create a point light with no distance attenuation.
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    fn attenuated(&self, point: &Point) -> Color {
        let d = point.distance(&self.position);
        self.intensity / (self.kc + self.kl * d + self.kq * d * d)
    }

    fn direction_to(&self, point: &Point) -> MathResult<Vector> {
        Ok(point.subtract(&self.position)?.normalize())
    }
}

/// A point light emitting mostly along one direction.
///
/// Intensity falls off as `max(0, dir . l)^narrowness`; a larger exponent
/// gives a tighter beam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    direction: Vector,
    narrowness: i32,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            point: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrowness: 1,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.point = self.point.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.point = self.point.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.point = self.point.with_kq(kq);
        self
    }

    /// Set the beam exponent. Values below 1 are raised to 1.
    pub fn with_narrow_beam(mut self, narrowness: i32) -> Self {
        self.narrowness = narrowness.max(1);
        self
    }

    fn intensity(&self, point: &Point) -> MathResult<Color> {
        let l = self.point.direction_to(point)?;
        let cos = align_zero(self.direction.dot(&l)).max(0.0);
        Ok(self.point.attenuated(point) * cos.powi(self.narrowness))
    }
}

/// A light that illuminates individual points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightSource {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl LightSource {
    /// Intensity arriving at `point`.
    ///
    /// Fails for positional lights evaluated at their own position.
    pub fn intensity(&self, point: &Point) -> MathResult<Color> {
        match self {
            LightSource::Directional(light) => Ok(light.intensity),
            LightSource::Point(light) => Ok(light.attenuated(point)),
            LightSource::Spot(light) => light.intensity(point),
        }
    }

    /// Unit direction the light travels to reach `point`.
    pub fn direction_to(&self, point: &Point) -> MathResult<Vector> {
        match self {
            LightSource::Directional(light) => Ok(light.direction),
            LightSource::Point(light) => light.direction_to(point),
            LightSource::Spot(light) => light.point.direction_to(point),
        }
    }

    /// Distance from `point` to the light; infinite for directional lights.
    pub fn distance(&self, point: &Point) -> f64 {
        match self {
            LightSource::Directional(_) => f64::INFINITY,
            LightSource::Point(light) => point.distance(&light.position),
            LightSource::Spot(light) => point.distance(&light.point.position),
        }
    }
}

impl From<DirectionalLight> for LightSource {
    fn from(light: DirectionalLight) -> Self {
        LightSource::Directional(light)
    }
}

impl From<PointLight> for LightSource {
    fn from(light: PointLight) -> Self {
        LightSource::Point(light)
    }
}

impl From<SpotLight> for LightSource {
    fn from(light: SpotLight) -> Self {
        LightSource::Spot(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_ambient_light() {
        let ambient = AmbientLight::new(Color::new(1.0, 0.5, 0.2), Double3::new(0.5, 0.5, 1.0));
        assert!((ambient.intensity() - Color::new(0.5, 0.25, 0.2)).length() < EPS);
        assert_eq!(AmbientLight::NONE.intensity(), Color::ZERO);
        assert_eq!(AmbientLight::default(), AmbientLight::NONE);
        assert_eq!(
            AmbientLight::uniform(Color::ONE, 0.1).intensity(),
            Color::splat(0.1)
        );
    }

    #[test]
    fn test_directional_light() {
        let light: LightSource =
            DirectionalLight::new(Color::ONE, Vector::new(0.0, 0.0, -3.0).unwrap()).into();
        let p = Point::new(5.0, 5.0, 5.0);

        assert_eq!(light.intensity(&p).unwrap(), Color::ONE);
        assert_eq!(light.direction_to(&p).unwrap(), Vector::NEG_Z);
        assert_eq!(light.distance(&p), f64::INFINITY);
    }

    #[test]
    fn test_point_light_attenuation() {
        let light: LightSource = PointLight::new(Color::splat(12.0), Point::ZERO)
            .with_kc(1.0)
            .with_kl(1.0)
            .with_kq(1.0)
            .into();
        let p = Point::new(0.0, 2.0, 0.0);

        // 12 / (1 + 2 + 4)
        assert!((light.intensity(&p).unwrap() - Color::splat(12.0 / 7.0)).length() < EPS);
        assert_eq!(light.direction_to(&p).unwrap(), Vector::Y);
        assert!((light.distance(&p) - 2.0).abs() < EPS);
    }

    #[test]
    fn test_point_light_defaults_do_not_attenuate() {
        let light: LightSource = PointLight::new(Color::ONE, Point::ZERO).into();
        let far = Point::new(100.0, 0.0, 0.0);
        assert_eq!(light.intensity(&far).unwrap(), Color::ONE);
    }

    #[test]
    fn test_light_at_own_position() {
        let light: LightSource = PointLight::new(Color::ONE, Point::ZERO).into();
        assert!(light.direction_to(&Point::ZERO).is_err());

        let spot: LightSource = SpotLight::new(Color::ONE, Point::ZERO, Vector::Z).into();
        assert!(spot.intensity(&Point::ZERO).is_err());
    }

    #[test]
    fn test_spot_light_beam() {
        let spot: LightSource = SpotLight::new(Color::ONE, Point::ZERO, Vector::Z).into();

        // On the beam axis
        let ahead = Point::new(0.0, 0.0, 3.0);
        assert_eq!(spot.intensity(&ahead).unwrap(), Color::ONE);

        // At 60 degrees off axis
        let off = Point::new(3f64.sqrt(), 0.0, 1.0);
        assert!((spot.intensity(&off).unwrap() - Color::splat(0.5)).length() < 1e-9);

        // Behind the light
        let behind = Point::new(0.0, 0.0, -3.0);
        assert_eq!(spot.intensity(&behind).unwrap(), Color::ZERO);

        // Sideways
        let side = Point::new(3.0, 0.0, 0.0);
        assert_eq!(spot.intensity(&side).unwrap(), Color::ZERO);
    }

    #[test]
    fn test_spot_light_narrow_beam() {
        let wide: LightSource = SpotLight::new(Color::ONE, Point::ZERO, Vector::Z).into();
        let narrow: LightSource = SpotLight::new(Color::ONE, Point::ZERO, Vector::Z)
            .with_narrow_beam(4)
            .into();
        let off = Point::new(3f64.sqrt(), 0.0, 1.0);

        assert!((narrow.intensity(&off).unwrap() - Color::splat(0.0625)).length() < 1e-9);
        assert!(narrow.intensity(&off).unwrap().x < wide.intensity(&off).unwrap().x);

        // Even exponents still leave the back half dark
        let behind = Point::new(0.0, 0.0, -1.0);
        assert_eq!(narrow.intensity(&behind).unwrap(), Color::ZERO);
    }

    #[test]
    fn test_spot_light_exponent_below_one() {
        let wide: LightSource = SpotLight::new(Color::ONE, Point::ZERO, Vector::Z).into();
        for narrowness in [0, -3] {
            let spot: LightSource = SpotLight::new(Color::ONE, Point::ZERO, Vector::Z)
                .with_narrow_beam(narrowness)
                .into();

            // Outside the beam stays dark instead of blowing up
            let side = Point::new(3.0, 0.0, 0.0);
            assert_eq!(spot.intensity(&side).unwrap(), Color::ZERO);

            let off = Point::new(3f64.sqrt(), 0.0, 1.0);
            assert_eq!(spot.intensity(&off).unwrap(), wide.intensity(&off).unwrap());
        }
    }
}
