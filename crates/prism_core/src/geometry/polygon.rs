//! Convex planar polygon.

use prism_math::{is_zero, Point, Ray};

use super::{inside_convex, GeometryError, GeometryResult, Plane, Surface};

/// A convex polygon with vertices given in order around its boundary.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,
    pub(crate) surface: Surface,
}

impl Polygon {
    /// Create a polygon.
    ///
    /// Requires at least three vertices, all in one plane, ordered along the
    /// edge path, forming a convex outline with no vertex lying on an edge.
    pub fn new(vertices: Vec<Point>) -> GeometryResult<Self> {
        let count = vertices.len();
        if count < 3 {
            return Err(GeometryError::TooFewVertices(count));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if count > 3 {
            Self::check_convex(&vertices, &plane)?;
        }

        Ok(Self {
            vertices,
            plane,
            surface: Surface::default(),
        })
    }

    /// Every vertex must lie in the plane and every consecutive pair of
    /// edges must turn the same way around the normal.
    fn check_convex(vertices: &[Point], plane: &Plane) -> GeometryResult<()> {
        let n = plane.normal();
        let count = vertices.len();
        let convex = |_| GeometryError::NonConvexPolygon;

        let mut edge1 = vertices[count - 1].subtract(&vertices[count - 2]).map_err(convex)?;
        let mut edge2 = vertices[0].subtract(&vertices[count - 1]).map_err(convex)?;
        let positive = edge1.cross(&edge2).map_err(convex)?.dot(&n) > 0.0;

        for i in 1..count {
            let offset = vertices[i].subtract(&vertices[0]).map_err(convex)?;
            if !is_zero(offset.dot(&n)) {
                return Err(GeometryError::NonPlanarPolygon);
            }

            edge1 = edge2;
            edge2 = vertices[i].subtract(&vertices[i - 1]).map_err(convex)?;
            let turn = edge1.cross(&edge2).map_err(convex)?.dot(&n) > 0.0;
            if turn != positive {
                return Err(GeometryError::NonConvexPolygon);
            }
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub(crate) fn hit_point(&self, ray: &Ray, max_distance: f64) -> Option<Point> {
        let p = self.plane.hit_point(ray, max_distance)?;
        inside_convex(&self.vertices, &p, &ray.direction()).then_some(p)
    }
}
