//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane first, then classifies the plane hit
//! against the three edges.

use prism_math::{Point, Ray};

use super::{inside_convex, GeometryResult, Plane, Surface};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertices: [Point; 3],
    plane: Plane,
    pub(crate) surface: Surface,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// Fails if the vertices are duplicated or collinear.
    pub fn new(v0: Point, v1: Point, v2: Point) -> GeometryResult<Self> {
        let plane = Plane::from_points(v0, v1, v2)?;
        Ok(Self {
            vertices: [v0, v1, v2],
            plane,
            surface: Surface::default(),
        })
    }

    pub fn vertices(&self) -> &[Point; 3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// The plane hit, if it lies strictly inside the triangle.
    ///
    /// Hits on an edge, on an edge's continuation, or on a vertex are
    /// excluded.
    pub(crate) fn hit_point(&self, ray: &Ray, max_distance: f64) -> Option<Point> {
        let p = self.plane.hit_point(ray, max_distance)?;
        inside_convex(&self.vertices, &p, &ray.direction()).then_some(p)
    }
}
