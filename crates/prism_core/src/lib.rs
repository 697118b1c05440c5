//! Prism Core - Scene description for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Materials**: Phong coefficients and colors
//! - **Geometry**: spheres, planes, triangles, polygons, tubes, cylinders and
//!   composites, with ray intersection and surface normals
//! - **Lighting**: ambient, directional, point and spot lights
//! - **Scene**: the read-only container the renderer consumes
//!
//! # Example
//!
//! ```ignore
//! use prism_core::{Scene, Sphere, Material, Surfaced, PointLight};
//!
//! let mut scene = Scene::new("demo");
//! scene.add_shape(Sphere::new(Point::new(0.0, 0.0, -5.0), 1.0)?
//!     .with_material(Material::new().with_kd(Double3::splat(0.5))));
//! scene.add_light(PointLight::new(Color::ONE, Point::new(0.0, 5.0, 0.0)));
//! ```

pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use geometry::{
    closest_hit, Composite, Cylinder, GeometryError, GeometryResult, HitRecord, Plane, Polygon,
    Shape, Sphere, Surface, Surfaced, Triangle, Tube,
};
pub use light::{AmbientLight, DirectionalLight, LightSource, PointLight, SpotLight};
pub use material::{rgb8, Color, Double3, Material};
pub use scene::Scene;
