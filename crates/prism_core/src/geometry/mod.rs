//! Shapes and ray-shape intersection.
//!
//! Every shape kind is a variant of the closed [`Shape`] sum type. A shape
//! answers two questions: where a ray hits it (bounded by a maximum
//! distance), and what its surface normal is at a point.
//!
//! "No intersection" is always `None`; an empty-but-present hit list is
//! never produced.

mod composite;
mod cylinder;
mod hit;
mod plane;
mod polygon;
mod sphere;
mod triangle;
mod tube;

pub use composite::Composite;
pub use cylinder::Cylinder;
pub use hit::{closest_hit, HitRecord};
pub use plane::Plane;
pub use polygon::Polygon;
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::Tube;

use prism_math::{MathError, Point, Ray, Vector};
use thiserror::Error;

use crate::{Color, Material};

/// Errors raised while building shapes or querying their surfaces.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("points are duplicated or collinear and do not span a plane")]
    DegeneratePlane,

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon vertices are not in the same plane")]
    NonPlanarPolygon,

    #[error("polygon vertices are out of order, collinear or concave")]
    NonConvexPolygon,

    #[error("composite shapes have no surface")]
    NoSurface,

    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Appearance of a primitive: self-emitted light and Phong material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Surface {
    pub emission: Color,
    pub material: Material,
}

/// Shapes with a [`Surface`].
pub trait Surfaced: Sized {
    fn surface(&self) -> &Surface;

    fn surface_mut(&mut self) -> &mut Surface;

    /// Set the emitted color.
    fn with_emission(mut self, emission: Color) -> Self {
        self.surface_mut().emission = emission;
        self
    }

    /// Set the material.
    fn with_material(mut self, material: Material) -> Self {
        self.surface_mut().material = material;
        self
    }
}

macro_rules! impl_surfaced {
    ($($ty:ty),*) => {
        $(
            impl Surfaced for $ty {
                fn surface(&self) -> &Surface {
                    &self.surface
                }

                fn surface_mut(&mut self) -> &mut Surface {
                    &mut self.surface
                }
            }
        )*
    };
}

impl_surfaced!(Sphere, Plane, Triangle, Polygon, Tube);

/// A shape in the scene.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
    Composite(Composite),
}

impl Shape {
    /// Intersect a ray with this shape.
    ///
    /// Hits farther than `max_distance` from the ray origin are dropped.
    /// Returns `None` when nothing is hit.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<HitRecord<'_>>> {
        let points = match self {
            Shape::Composite(composite) => return composite.intersect(ray, max_distance),
            Shape::Sphere(s) => s.hit_points(ray, max_distance),
            Shape::Plane(p) => p.hit_point(ray, max_distance).map(|p| vec![p]),
            Shape::Triangle(t) => t.hit_point(ray, max_distance).map(|p| vec![p]),
            Shape::Polygon(p) => p.hit_point(ray, max_distance).map(|p| vec![p]),
            Shape::Tube(t) => t.hit_points(ray, max_distance),
            Shape::Cylinder(c) => c.hit_points(ray, max_distance),
        }?;
        Some(points.into_iter().map(|p| HitRecord::new(self, p)).collect())
    }

    /// All intersection points with a ray, at any distance.
    pub fn find_intersections(&self, ray: &Ray) -> Option<Vec<Point>> {
        self.intersect(ray, f64::INFINITY)
            .map(|hits| hits.into_iter().map(|hit| hit.point).collect())
    }

    /// Unit surface normal at a point on this shape.
    pub fn normal_at(&self, point: &Point) -> GeometryResult<Vector> {
        match self {
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Plane(p) => Ok(p.normal()),
            Shape::Triangle(t) => Ok(t.plane().normal()),
            Shape::Polygon(p) => Ok(p.plane().normal()),
            Shape::Tube(t) => t.normal_at(point),
            Shape::Cylinder(c) => c.normal_at(point),
            Shape::Composite(_) => Err(GeometryError::NoSurface),
        }
    }

    /// Surface of a primitive; `None` for composites.
    pub fn surface(&self) -> Option<&Surface> {
        match self {
            Shape::Sphere(s) => Some(s.surface()),
            Shape::Plane(p) => Some(p.surface()),
            Shape::Triangle(t) => Some(t.surface()),
            Shape::Polygon(p) => Some(p.surface()),
            Shape::Tube(t) => Some(t.surface()),
            Shape::Cylinder(c) => Some(c.surface()),
            Shape::Composite(_) => None,
        }
    }

    /// Emitted color; black for composites.
    pub fn emission(&self) -> Color {
        self.surface().map_or(Color::ZERO, |s| s.emission)
    }

    /// Material; the default material for composites.
    pub fn material(&self) -> Material {
        self.surface().map_or_else(Material::default, |s| s.material)
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape!(Sphere, Plane, Triangle, Polygon, Tube, Cylinder, Composite);

/// Inside test shared by triangles and convex polygons.
///
/// `point` lies in the plane of `vertices`. With `v_i = vertex_i - point`,
/// the point is inside iff `direction . (v_i x v_{i+1})` has the same strictly
/// non-zero sign for every edge. Points on an edge or vertex are outside.
pub(crate) fn inside_convex(vertices: &[Point], point: &Point, direction: &Vector) -> bool {
    let to_vertices: Result<Vec<Vector>, MathError> =
        vertices.iter().map(|v| v.subtract(point)).collect();
    let Ok(to_vertices) = to_vertices else {
        // the point is a vertex
        return false;
    };

    let mut sign = 0.0;
    for (i, vi) in to_vertices.iter().enumerate() {
        let next = &to_vertices[(i + 1) % to_vertices.len()];
        let Ok(n) = vi.cross(next) else {
            // the point is on an edge or its continuation
            return false;
        };
        let s = prism_math::align_zero(direction.dot(&n));
        if s == 0.0 || s * sign < 0.0 {
            return false;
        }
        sign = s;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn test_shape_surface_builders() {
        let shape: Shape = Sphere::new(Point::ZERO, 1.0)
            .unwrap()
            .with_emission(Color::new(0.1, 0.2, 0.3))
            .with_material(Material::new().with_kd(DVec3::splat(0.5)))
            .into();

        assert_eq!(shape.emission(), Color::new(0.1, 0.2, 0.3));
        assert_eq!(shape.material().kd, DVec3::splat(0.5));
    }

    #[test]
    fn test_composite_has_no_surface() {
        let shape = Shape::from(Composite::new());
        assert!(shape.surface().is_none());
        assert_eq!(shape.emission(), Color::ZERO);
        assert_eq!(shape.normal_at(&Point::ZERO), Err(GeometryError::NoSurface));
    }

    #[test]
    fn test_find_intersections_unbounded() {
        let shape = Shape::from(Sphere::new(Point::new(0.0, 0.0, -1000.0), 1.0).unwrap());
        let ray = Ray::new(Point::ZERO, Vector::NEG_Z);
        let points = shape.find_intersections(&ray).unwrap();
        assert_eq!(points.len(), 2);
        assert!(shape.intersect(&ray, 500.0).is_none());
    }
}
