//! Image rendering.
//!
//! Renders a camera's view through a [`RayTracer`]:
//! - Synchronous scan when no worker threads are configured
//! - Otherwise a fixed rayon pool whose workers pull pixels from a shared
//!   [`PixelScheduler`]
//! - Per-pixel failures are collected instead of aborting the render

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use prism_core::Color;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::camera::Camera;
use crate::scheduler::PixelScheduler;
use crate::tracer::RayTracer;

/// A pixel that could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFailure {
    pub row: u32,
    pub col: u32,
    pub message: String,
}

/// Errors from writing an image out.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Errors from a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("{} pixel(s) failed to render", .0.len())]
    PixelFailures(Vec<PixelFailure>),

    #[error("sink is {found:?} pixels but the camera renders {expected:?}")]
    ResolutionMismatch { expected: (u32, u32), found: (u32, u32) },

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Destination for rendered pixels.
pub trait ImageSink {
    /// Image size as `(width, height)`.
    fn resolution(&self) -> (u32, u32);

    fn write_pixel(&mut self, col: u32, row: u32, color: Color);

    /// Finish writing.
    fn flush(&mut self) -> Result<(), SinkError>;
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b, 255]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Copy every pixel into a sink of the same size.
    pub fn write_to(&self, sink: &mut dyn ImageSink) {
        for y in 0..self.height {
            for x in 0..self.width {
                sink.write_pixel(x, y, self.get(x, y));
            }
        }
    }
}

impl ImageSink for ImageBuffer {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        if col < self.width && row < self.height {
            self.set(col, row, color);
        }
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Pixels land in an in-memory RGBA image; encoding is up to the caller.
impl ImageSink for image::RgbaImage {
    fn resolution(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn write_pixel(&mut self, col: u32, row: u32, color: Color) {
        if col < self.width() && row < self.height() {
            self.put_pixel(col, row, image::Rgba(color_to_rgba(color)));
        }
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// What one worker produced.
#[derive(Debug, Default)]
struct WorkerOutput {
    pixels: Vec<(u32, u32, Color)>,
    failures: Vec<PixelFailure>,
}

/// Pull pixels until the scheduler runs dry.
fn run_worker(
    camera: &Camera,
    tracer: &dyn RayTracer,
    scheduler: &PixelScheduler,
    seed: u64,
) -> WorkerOutput {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut output = WorkerOutput::default();

    for (row, col) in scheduler.iter() {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            camera.pixel_color(tracer, col, row, &mut rng)
        }));

        let message = match result {
            Ok(Ok(color)) => {
                output.pixels.push((col, row, color));
                None
            }
            Ok(Err(err)) => Some(err.to_string()),
            Err(payload) => Some(panic_message(payload.as_ref())),
        };
        if let Some(message) = message {
            log::warn!("Pixel ({}, {}) failed: {}", col, row, message);
            output.failures.push(PixelFailure { row, col, message });
        }

        scheduler.pixel_done();
    }

    output
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

/// Render the camera's full image.
///
/// Blocks until every pixel is done. If any pixel failed, the failures are
/// returned instead of the image.
pub fn render(camera: &Camera, tracer: &dyn RayTracer) -> RenderResult<ImageBuffer> {
    let (nx, ny) = camera.resolution();
    let threading = camera.threading();
    let scheduler =
        PixelScheduler::new(ny, nx).with_progress_interval(threading.progress_interval_ms);

    log::info!(
        "Rendering {}x{} ({:?}, {} threads)",
        nx,
        ny,
        camera.mode(),
        threading.threads
    );
    let start = Instant::now();

    let outputs = if threading.threads == 0 {
        vec![run_worker(camera, tracer, &scheduler, 0)]
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threading.threads)
            .build()?;

        let mut outputs: Vec<WorkerOutput> =
            (0..threading.threads).map(|_| WorkerOutput::default()).collect();
        let scheduler = &scheduler;
        pool.scope(|s| {
            for (i, output) in outputs.iter_mut().enumerate() {
                s.spawn(move |_| *output = run_worker(camera, tracer, scheduler, i as u64));
            }
        });
        outputs
    };

    let mut image = ImageBuffer::new(nx, ny);
    let mut failures = Vec::new();
    for output in outputs {
        for (x, y, color) in output.pixels {
            image.set(x, y, color);
        }
        failures.extend(output.failures);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());

    if !failures.is_empty() {
        failures.sort_by_key(|f| (f.row, f.col));
        return Err(RenderError::PixelFailures(failures));
    }
    Ok(image)
}

/// Render into a sink of the camera's resolution and flush it.
pub fn render_to(camera: &Camera, tracer: &dyn RayTracer, sink: &mut dyn ImageSink) -> RenderResult<()> {
    let expected = camera.resolution();
    let found = sink.resolution();
    if expected != found {
        return Err(RenderError::ResolutionMismatch { expected, found });
    }

    let image = render(camera, tracer)?;
    image.write_to(sink);
    sink.flush()?;
    Ok(())
}
