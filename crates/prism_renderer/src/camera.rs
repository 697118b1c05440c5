//! Camera for ray generation.
//!
//! A [`Camera`] is built once through [`CameraBuilder`], which validates the
//! view geometry and resolves the sampling options into a single
//! [`SamplingMode`]. After that it is immutable and shared by all render
//! workers.

use prism_core::Color;
use prism_math::{is_zero, MathError, Point, Ray, Vector};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::renderer::ImageSink;
use crate::sampler::{adaptive_average, average, SampleError, TargetArea};
use crate::tracer::{RayTracer, TraceError};

/// Errors from camera configuration and per-pixel sampling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("up and forward vectors must be orthogonal")]
    NotOrthogonal,

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("{0} was not configured")]
    NotConfigured(&'static str),

    #[error("sample count must be at least 1")]
    InvalidSampleCount,

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Trace(#[from] TraceError),
}

/// Result type for camera operations.
pub type CameraResult<T> = Result<T, CameraError>;

/// Size and placement of the view plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPlane {
    pub width: f64,
    pub height: f64,
    /// Distance from the camera location along the forward axis
    pub distance: f64,
}

/// Depth of field parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DofSettings {
    /// Rays per lens sample
    pub samples: usize,
    /// Distance from the view plane to the plane in focus
    pub focal_distance: f64,
    /// Side of the square aperture
    pub aperture: f64,
}

/// Sampling options as a front-end would configure them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    /// Rays per pixel; `None` or a value of 1 or less disables anti-aliasing
    pub anti_aliasing: Option<usize>,
    pub depth_of_field: Option<DofSettings>,
    /// Use adaptive supersampling instead of averaging every sample
    pub adaptive: bool,
}

/// Worker configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadingSettings {
    /// Worker threads; 0 renders on the calling thread
    pub threads: usize,
    /// Minimum time between progress log lines; 0 disables them
    pub progress_interval_ms: u64,
}

/// How a pixel's color is computed, fixed when the camera is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingMode {
    /// One ray through the pixel center
    Plain,
    /// Lens sampling around the pixel center
    DepthOfField(DofSettings),
    /// Mean of a jittered grid over the pixel
    AntiAliased { samples: usize },
    /// Lens sampling at every point of a jittered grid over the pixel
    AntiAliasedDof { samples: usize, dof: DofSettings },
    /// Adaptive supersampling over a jittered grid, with optional lens
    /// sampling per grid point
    Adaptive { samples: usize, dof: Option<DofSettings> },
}

impl SamplingMode {
    fn resolve(settings: &SamplingSettings) -> Self {
        let samples = settings.anti_aliasing.filter(|n| *n > 1);
        let dof = settings.depth_of_field;
        match (samples, dof, settings.adaptive) {
            (Some(samples), dof, true) => SamplingMode::Adaptive { samples, dof },
            (Some(samples), Some(dof), false) => SamplingMode::AntiAliasedDof { samples, dof },
            (Some(samples), None, false) => SamplingMode::AntiAliased { samples },
            (None, Some(dof), _) => SamplingMode::DepthOfField(dof),
            (None, None, _) => SamplingMode::Plain,
        }
    }
}

/// Collects camera options and validates them in [`CameraBuilder::build`].
#[derive(Debug, Clone)]
pub struct CameraBuilder {
    location: Point,
    forward: Vector,
    up: Vector,
    right: Vector,
    resolution: Option<(u32, u32)>,
    viewport_size: Option<(f64, f64)>,
    viewport_distance: Option<f64>,
    sampling: SamplingSettings,
    threading: ThreadingSettings,
}

impl CameraBuilder {
    /// Start a camera at `location` looking along `forward`.
    ///
    /// `up` must be orthogonal to `forward`. The right vector is
    /// `forward x up`.
    pub fn new(location: Point, forward: Vector, up: Vector) -> CameraResult<Self> {
        let forward = forward.normalize();
        let up = up.normalize();
        if !is_zero(forward.dot(&up)) {
            return Err(CameraError::NotOrthogonal);
        }
        let right = forward.cross(&up)?;
        Ok(Self {
            location,
            forward,
            up,
            right,
            resolution: None,
            viewport_size: None,
            viewport_distance: None,
            sampling: SamplingSettings::default(),
            threading: ThreadingSettings::default(),
        })
    }

    /// Set the output image size in pixels.
    pub fn with_resolution(mut self, nx: u32, ny: u32) -> Self {
        self.resolution = Some((nx, ny));
        self
    }

    pub fn with_viewport_size(mut self, width: f64, height: f64) -> Self {
        self.viewport_size = Some((width, height));
        self
    }

    pub fn with_viewport_distance(mut self, distance: f64) -> Self {
        self.viewport_distance = Some(distance);
        self
    }

    /// Set size and distance together.
    pub fn with_view_plane(self, view_plane: ViewPlane) -> Self {
        self.with_viewport_size(view_plane.width, view_plane.height)
            .with_viewport_distance(view_plane.distance)
    }

    /// Cast `samples` rays per pixel. Values of 1 or less disable
    /// anti-aliasing.
    pub fn with_anti_aliasing(mut self, samples: usize) -> Self {
        self.sampling.anti_aliasing = (samples > 1).then_some(samples);
        self
    }

    pub fn with_depth_of_field(mut self, samples: usize, focal_distance: f64, aperture: f64) -> Self {
        self.sampling.depth_of_field = Some(DofSettings {
            samples,
            focal_distance,
            aperture,
        });
        self
    }

    pub fn with_adaptive_supersampling(mut self) -> Self {
        self.sampling.adaptive = true;
        self
    }

    /// Render on `threads` workers, logging progress every
    /// `progress_interval_ms` milliseconds.
    pub fn with_multithreading(mut self, threads: usize, progress_interval_ms: u64) -> Self {
        self.threading = ThreadingSettings {
            threads,
            progress_interval_ms,
        };
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingSettings) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_threading(mut self, threading: ThreadingSettings) -> Self {
        self.threading = threading;
        self
    }

    /// Validate the configuration and build the camera.
    pub fn build(self) -> CameraResult<Camera> {
        let (nx, ny) = self.resolution.ok_or(CameraError::NotConfigured("resolution"))?;
        if nx == 0 || ny == 0 {
            return Err(CameraError::NonPositive { field: "resolution" });
        }

        let (width, height) = self
            .viewport_size
            .ok_or(CameraError::NotConfigured("viewport size"))?;
        positive(width, "viewport width")?;
        positive(height, "viewport height")?;

        let distance = self
            .viewport_distance
            .ok_or(CameraError::NotConfigured("viewport distance"))?;
        positive(distance, "viewport distance")?;

        if let Some(dof) = &self.sampling.depth_of_field {
            if dof.samples < 1 {
                return Err(CameraError::InvalidSampleCount);
            }
            positive(dof.focal_distance, "focal distance")?;
            positive(dof.aperture, "aperture size")?;
        }

        let mode = SamplingMode::resolve(&self.sampling);
        if self.sampling.adaptive && !matches!(mode, SamplingMode::Adaptive { .. }) {
            log::debug!("Adaptive supersampling needs anti-aliasing; ignoring it");
        }
        log::debug!("Camera sampling mode: {:?}", mode);

        Ok(Camera {
            location: self.location,
            forward: self.forward,
            up: self.up,
            right: self.right,
            nx,
            ny,
            view_plane: ViewPlane {
                width,
                height,
                distance,
            },
            mode,
            threading: self.threading,
        })
    }
}

fn positive(value: f64, field: &'static str) -> CameraResult<()> {
    if value <= 0.0 || is_zero(value) {
        return Err(CameraError::NonPositive { field });
    }
    Ok(())
}

/// A validated, immutable camera.
#[derive(Debug, Clone)]
pub struct Camera {
    location: Point,
    forward: Vector,
    up: Vector,
    right: Vector,
    nx: u32,
    ny: u32,
    view_plane: ViewPlane,
    mode: SamplingMode,
    threading: ThreadingSettings,
}

impl Camera {
    pub fn location(&self) -> Point {
        self.location
    }

    pub fn forward(&self) -> Vector {
        self.forward
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    pub fn right(&self) -> Vector {
        self.right
    }

    /// Image size as `(nx, ny)`.
    pub fn resolution(&self) -> (u32, u32) {
        (self.nx, self.ny)
    }

    pub fn view_plane(&self) -> ViewPlane {
        self.view_plane
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    pub fn threading(&self) -> ThreadingSettings {
        self.threading
    }

    /// Center of pixel (`col`, `row`) on the view plane. Row 0 is the top.
    pub fn pixel_center(&self, col: u32, row: u32) -> Point {
        let vp = &self.view_plane;
        let y = ((self.ny as f64 - 1.0) / 2.0 - row as f64) * vp.height / self.ny as f64;
        let x = (col as f64 - (self.nx as f64 - 1.0) / 2.0) * vp.width / self.nx as f64;

        let p = self.location.as_dvec3()
            + self.forward.as_dvec3() * vp.distance
            + self.right.as_dvec3() * x
            + self.up.as_dvec3() * y;
        Point::from_dvec3(p)
    }

    /// The ray from the camera through the center of a pixel.
    pub fn construct_ray(&self, col: u32, row: u32) -> CameraResult<Ray> {
        self.ray_through(&self.pixel_center(col, row))
    }

    fn ray_through(&self, point: &Point) -> CameraResult<Ray> {
        Ok(Ray::new(self.location, point.subtract(&self.location)?))
    }

    /// Side of the square sampling footprint of one pixel.
    fn pixel_side(&self) -> f64 {
        let vp = &self.view_plane;
        (vp.width / self.nx as f64).min(vp.height / self.ny as f64)
    }

    /// Color of one pixel under the camera's sampling mode.
    pub fn pixel_color(
        &self,
        tracer: &dyn RayTracer,
        col: u32,
        row: u32,
        rng: &mut dyn RngCore,
    ) -> CameraResult<Color> {
        let center = self.pixel_center(col, row);
        let footprint = TargetArea::new(center, self.up, self.right, self.pixel_side());

        match self.mode {
            SamplingMode::Plain => Ok(tracer.trace_ray(&self.ray_through(&center)?)?),
            SamplingMode::DepthOfField(dof) => self.lens_color(tracer, &center, &dof, rng),
            SamplingMode::AntiAliased { samples } => {
                let grid = footprint.jittered_grid(samples, rng)?;
                average(grid.points(), |p| self.primary_color(tracer, p))
            }
            SamplingMode::AntiAliasedDof { samples, dof } => {
                let grid = footprint.jittered_grid(samples, rng)?;
                average(grid.points(), |p| self.lens_color(tracer, p, &dof, rng))
            }
            SamplingMode::Adaptive { samples, dof } => {
                let grid = footprint.jittered_grid(samples, rng)?;
                match dof {
                    Some(dof) => adaptive_average(&grid, |p| self.lens_color(tracer, p, &dof, rng)),
                    None => adaptive_average(&grid, |p| self.primary_color(tracer, p)),
                }
            }
        }
    }

    fn primary_color(&self, tracer: &dyn RayTracer, point: &Point) -> CameraResult<Color> {
        Ok(tracer.trace_ray(&self.ray_through(point)?)?)
    }

    /// Where the ray through a view-plane point meets the focal plane.
    pub fn focal_point(&self, point: &Point, focal_distance: f64) -> CameraResult<Point> {
        let dir = point.subtract(&self.location)?.normalize();
        let t = focal_distance / dir.dot(&self.forward);
        Ok(point.add(&dir.scale(t)?))
    }

    /// Mean color of rays from a jittered aperture around `point` that all
    /// converge on the point's focal point.
    fn lens_color(
        &self,
        tracer: &dyn RayTracer,
        point: &Point,
        dof: &DofSettings,
        rng: &mut dyn RngCore,
    ) -> CameraResult<Color> {
        let focal = self.focal_point(point, dof.focal_distance)?;
        let aperture = TargetArea::new(*point, self.up, self.right, dof.aperture);
        let grid = aperture.jittered_grid(dof.samples, rng)?;
        average(grid.points(), |sample| {
            let ray = Ray::new(*sample, focal.subtract(sample)?);
            Ok(tracer.trace_ray(&ray)?)
        })
    }

    /// Paint grid lines every `interval` pixels over the sink.
    pub fn print_grid(&self, interval: u32, color: Color, sink: &mut dyn ImageSink) -> CameraResult<()> {
        if interval == 0 {
            return Err(CameraError::NonPositive { field: "grid interval" });
        }
        let (nx, ny) = sink.resolution();
        let step = interval as usize;
        for col in (0..nx).step_by(step) {
            for row in 0..ny {
                sink.write_pixel(col, row, color);
            }
        }
        for row in (0..ny).step_by(step) {
            for col in 0..nx {
                sink.write_pixel(col, row, color);
            }
        }
        Ok(())
    }
}
