//! Prism Renderer - Whitted-style CPU ray tracing
//!
//! Renders a [`prism_core::Scene`] through a [`Camera`]:
//! - Recursive Phong shading with shadows, reflection and refraction
//! - Jittered anti-aliasing, depth of field and adaptive supersampling
//! - Parallel rendering on a fixed worker pool
//!
//! # Example
//!
//! ```ignore
//! let camera = CameraBuilder::new(Point::ZERO, Vector::NEG_Z, Vector::Y)?
//!     .with_resolution(800, 600)
//!     .with_viewport_size(200.0, 150.0)
//!     .with_viewport_distance(100.0)
//!     .with_anti_aliasing(16)
//!     .with_multithreading(4, 500)
//!     .build()?;
//! let image = render(&camera, &WhittedTracer::new(&scene))?;
//! ```

mod camera;
mod renderer;
mod sampler;
mod scheduler;
mod tracer;

pub use camera::{
    Camera, CameraBuilder, CameraError, CameraResult, DofSettings, SamplingMode, SamplingSettings,
    ThreadingSettings, ViewPlane,
};
pub use renderer::{
    clamp_01, color_to_rgba, render, render_to, ImageBuffer, ImageSink, PixelFailure, RenderError,
    RenderResult, SinkError,
};
pub use sampler::{adaptive_average, average, SampleError, SampleGrid, SampleResult, TargetArea};
pub use scheduler::{PixelIter, PixelScheduler};
pub use tracer::{
    RayTracer, TraceError, TraceResult, WhittedTracer, MAX_CALC_COLOR_LEVEL, MIN_CALC_COLOR_K,
};

/// Re-export common types from prism_core and prism_math
pub use prism_core::Color;
pub use prism_math::{Point, Ray, Vector};
