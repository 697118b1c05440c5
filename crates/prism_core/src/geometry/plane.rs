//! Infinite plane.

use prism_math::{align_zero, is_zero, Point, Ray, Vector};

use super::{GeometryError, GeometryResult, Surface};

/// A plane given by a reference point and a unit normal.
#[derive(Debug, Clone)]
pub struct Plane {
    q0: Point,
    normal: Vector,
    pub(crate) surface: Surface,
}

impl Plane {
    /// Create a plane through `q0` perpendicular to `normal`.
    pub fn new(q0: Point, normal: Vector) -> Self {
        Self {
            q0,
            normal: normal.normalize(),
            surface: Surface::default(),
        }
    }

    /// Create the plane through three points.
    ///
    /// Fails if any two points coincide or all three are collinear.
    pub fn from_points(p0: Point, p1: Point, p2: Point) -> GeometryResult<Self> {
        let normal = p1
            .subtract(&p0)
            .and_then(|u| p1.subtract(&p2).and_then(|v| u.cross(&v)))
            .map_err(|_| GeometryError::DegeneratePlane)?;
        Ok(Self::new(p0, normal))
    }

    /// Reference point of the plane.
    pub fn q0(&self) -> Point {
        self.q0
    }

    /// Unit normal of the plane.
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// The single crossing point of a ray, if it lies ahead of the origin
    /// and within `max_distance`.
    ///
    /// A ray starting at the reference point, or running parallel to the
    /// plane (including inside it), does not intersect.
    pub(crate) fn hit_point(&self, ray: &Ray, max_distance: f64) -> Option<Point> {
        let to_q0 = self.q0.subtract(&ray.origin()).ok()?;

        let nv = self.normal.dot(&ray.direction());
        if is_zero(nv) {
            return None;
        }

        let t = align_zero(self.normal.dot(&to_q0) / nv);
        if t <= 0.0 || align_zero(t - max_distance) > 0.0 {
            return None;
        }
        Some(ray.point_at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn unit_plane() -> Plane {
        Plane::from_points(
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn test_plane_from_points_normal() {
        let plane = unit_plane();
        let n = plane.normal();
        let s = 1.0 / 3f64.sqrt();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!(n == Vector::new(s, s, s).unwrap() || n == Vector::new(-s, -s, -s).unwrap());
    }

    #[test]
    fn test_plane_degenerate_points() {
        // Collinear
        let collinear = Plane::from_points(
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
            Point::new(3.0, 3.0, 3.0),
        );
        assert_eq!(collinear.unwrap_err(), GeometryError::DegeneratePlane);

        // Duplicate
        let duplicate = Plane::from_points(
            Point::new(1.0, 1.0, 1.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(3.0, 0.0, 3.0),
        );
        assert_eq!(duplicate.unwrap_err(), GeometryError::DegeneratePlane);
    }

    #[test]
    fn test_plane_intersections() {
        let plane = Shape::from(Plane::new(Point::new(0.0, 0.0, 1.0), Vector::Z));

        // Crossing ray
        let ray = Ray::new(Point::new(1.0, 1.0, 0.0), Vector::new(0.0, 0.0, 1.0).unwrap());
        assert_eq!(
            plane.find_intersections(&ray),
            Some(vec![Point::new(1.0, 1.0, 1.0)])
        );

        // Pointing away
        let away = Ray::new(Point::new(1.0, 1.0, 0.0), Vector::NEG_Z);
        assert!(plane.find_intersections(&away).is_none());

        // Starting on the plane
        let on = Ray::new(Point::new(1.0, 1.0, 1.0), Vector::new(0.0, 1.0, 1.0).unwrap());
        assert!(plane.find_intersections(&on).is_none());
    }

    #[test]
    fn test_plane_parallel_rays() {
        let plane = Shape::from(Plane::new(Point::new(0.0, 0.0, 1.0), Vector::Z));

        // Lying inside the plane
        let inside = Ray::new(Point::new(1.0, 1.0, 1.0), Vector::X);
        assert!(plane.find_intersections(&inside).is_none());

        // Parallel, off the plane
        let parallel = Ray::new(Point::new(1.0, 1.0, 0.0), Vector::X);
        assert!(plane.find_intersections(&parallel).is_none());
    }

    #[test]
    fn test_plane_ray_from_reference_point() {
        let plane = Shape::from(Plane::new(Point::new(0.0, 0.0, 1.0), Vector::Z));
        let ray = Ray::new(Point::new(0.0, 0.0, 1.0), Vector::new(1.0, 0.0, 1.0).unwrap());
        assert!(plane.find_intersections(&ray).is_none());
    }

    #[test]
    fn test_plane_max_distance() {
        let plane = Shape::from(Plane::new(Point::new(0.0, 0.0, 5.0), Vector::Z));
        let ray = Ray::new(Point::ZERO, Vector::Z);
        assert!(plane.intersect(&ray, 4.0).is_none());
        assert_eq!(plane.intersect(&ray, 5.0).map(|h| h.len()), Some(1));
    }
}
