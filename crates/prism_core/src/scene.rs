//! Scene description consumed by the renderer.
//!
//! A scene is assembled once by the caller and then only read; the
//! renderer shares it across worker threads by reference.

use crate::{AmbientLight, Color, Composite, LightSource, Shape};

/// A complete scene: shapes, lights and the colors around them.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name
    pub name: String,

    /// Color returned by rays that hit nothing
    pub background: Color,

    /// Ambient term added to every hit
    pub ambient: AmbientLight,

    /// All shapes in the scene
    pub shapes: Composite,

    /// Light sources, in insertion order
    pub lights: Vec<LightSource>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient: AmbientLight) -> Self {
        self.ambient = ambient;
        self
    }

    /// Replace the scene's shapes.
    pub fn with_shapes(mut self, shapes: Composite) -> Self {
        self.shapes = shapes;
        self
    }

    /// Replace the scene's lights.
    pub fn with_lights(mut self, lights: Vec<LightSource>) -> Self {
        self.lights = lights;
        self
    }

    /// Add a shape to the scene.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) {
        self.shapes.add(shape);
    }

    /// Add a light to the scene.
    pub fn add_light(&mut self, light: impl Into<LightSource>) {
        self.lights.push(light.into());
    }

    /// Get shape count.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
