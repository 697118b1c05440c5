//! Recursive Whitted-style shading.
//!
//! A ray's color is the Phong-lit color of the closest surface it hits,
//! plus recursively traced reflected and transmitted rays. Recursion stops
//! at a fixed depth, or earlier once the accumulated attenuation makes a
//! branch's contribution negligible.

use prism_core::{closest_hit, Color, Double3, GeometryError, HitRecord, LightSource, Material, Scene};
use prism_math::{align_zero, is_zero, MathError, Ray, Vector};
use thiserror::Error;

/// Default recursion depth.
pub const MAX_CALC_COLOR_LEVEL: u32 = 10;

/// Default attenuation below which a branch is not traced.
pub const MIN_CALC_COLOR_K: f64 = 0.001;

/// Errors raised while shading a ray.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for tracing operations.
pub type TraceResult<T> = Result<T, TraceError>;

/// Computes the color seen along a ray.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> TraceResult<Color>;
}

/// Whitted ray tracer over a borrowed scene.
#[derive(Debug, Clone)]
pub struct WhittedTracer<'s> {
    scene: &'s Scene,
    max_level: u32,
    min_k: f64,
}

impl<'s> WhittedTracer<'s> {
    pub fn new(scene: &'s Scene) -> Self {
        Self {
            scene,
            max_level: MAX_CALC_COLOR_LEVEL,
            min_k: MIN_CALC_COLOR_K,
        }
    }

    /// Set the recursion depth. A level of 1 disables reflection and
    /// refraction.
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level.max(1);
        self
    }

    /// Set the attenuation cutoff.
    pub fn with_min_k(mut self, min_k: f64) -> Self {
        self.min_k = min_k;
        self
    }

    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    fn find_closest(&self, ray: &Ray) -> Option<HitRecord<'s>> {
        let hits = self.scene.shapes.intersect(ray, f64::INFINITY)?;
        closest_hit(ray, &hits)
    }

    fn calc_color(&self, hit: &HitRecord<'_>, ray: &Ray) -> TraceResult<Color> {
        let n = hit.shape.normal_at(&hit.point)?;
        let color = self.calc_color_at(hit, ray, &n, self.max_level, Double3::ONE)?;
        Ok(self.scene.ambient.intensity() + color)
    }

    fn calc_color_at(
        &self,
        hit: &HitRecord<'_>,
        ray: &Ray,
        n: &Vector,
        level: u32,
        k: Double3,
    ) -> TraceResult<Color> {
        let color = self.local_effects(hit, ray, n)?;
        if level <= 1 {
            return Ok(color);
        }
        Ok(color + self.global_effects(hit, ray, n, level, k)?)
    }

    /// Emission plus the diffuse and specular response to every light that
    /// reaches the point.
    fn local_effects(&self, hit: &HitRecord<'_>, ray: &Ray, n: &Vector) -> TraceResult<Color> {
        let mut color = hit.shape.emission();
        let v = ray.direction();
        let nv = align_zero(n.dot(&v));
        if nv == 0.0 {
            return Ok(color);
        }

        let material = hit.shape.material();
        for light in &self.scene.lights {
            let l = light.direction_to(&hit.point)?;
            let nl = align_zero(n.dot(&l));
            // Light and viewer on the same side of the surface
            if nl * nv > 0.0 && self.unshaded(hit, light, &l, n) {
                let il = light.intensity(&hit.point)?;
                color += il * (diffusive(&material, nl) + specular(&material, n, &l, nl, &v));
            }
        }
        Ok(color)
    }

    /// Whether nothing opaque lies between the point and the light.
    ///
    /// Occluders that transmit any light do not block it at all.
    fn unshaded(&self, hit: &HitRecord<'_>, light: &LightSource, l: &Vector, n: &Vector) -> bool {
        let shadow_ray = Ray::with_offset(hit.point, -*l, n);
        let distance = light.distance(&hit.point);
        match self.scene.shapes.intersect(&shadow_ray, distance) {
            None => true,
            Some(hits) => hits.iter().all(|h| h.shape.material().is_transmissive()),
        }
    }

    fn global_effects(
        &self,
        hit: &HitRecord<'_>,
        ray: &Ray,
        n: &Vector,
        level: u32,
        k: Double3,
    ) -> TraceResult<Color> {
        let material = hit.shape.material();
        let v = ray.direction();

        let reflected = Ray::with_offset(hit.point, reflect(&v, n)?, n);
        let refracted = Ray::with_offset(hit.point, v, n);

        Ok(self.global_effect(&reflected, level, material.kr, k)?
            + self.global_effect(&refracted, level, material.kt, k)?)
    }

    fn global_effect(&self, ray: &Ray, level: u32, kx: Double3, k: Double3) -> TraceResult<Color> {
        let kkx = k * kx;
        if kkx.max_element() < self.min_k {
            return Ok(Color::ZERO);
        }

        let Some(hit) = self.find_closest(ray) else {
            return Ok(self.scene.background * kx);
        };
        let n = hit.shape.normal_at(&hit.point)?;
        if is_zero(n.dot(&ray.direction())) {
            return Ok(Color::ZERO);
        }
        Ok(self.calc_color_at(&hit, ray, &n, level - 1, kkx)? * kx)
    }
}

impl RayTracer for WhittedTracer<'_> {
    fn trace_ray(&self, ray: &Ray) -> TraceResult<Color> {
        match self.find_closest(ray) {
            None => Ok(self.scene.background),
            Some(hit) => self.calc_color(&hit, ray),
        }
    }
}

/// `kd * |n.l|`
fn diffusive(material: &Material, nl: f64) -> Double3 {
    material.kd * nl.abs()
}

/// `ks * max(0, -v.r)^shininess` with `r = l - 2(n.l)n`.
fn specular(material: &Material, n: &Vector, l: &Vector, nl: f64, v: &Vector) -> Double3 {
    let r = l.as_dvec3() - n.as_dvec3() * (2.0 * nl);
    let vr = align_zero(-v.as_dvec3().dot(r)).max(0.0);
    material.ks * vr.powi(material.shininess.max(1))
}

/// `v - 2(v.n)n`
fn reflect(v: &Vector, n: &Vector) -> Result<Vector, MathError> {
    Vector::from_dvec3(v.as_dvec3() - n.as_dvec3() * (2.0 * v.dot(n)))
}
