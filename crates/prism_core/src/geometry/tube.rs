//! Infinite tube around an axis ray.

use glam::DVec3;
use prism_math::{align_zero, is_zero, Point, Ray, Vector};

use super::{GeometryError, GeometryResult, Surface};

/// An infinite circular tube of fixed radius around an axis ray.
#[derive(Debug, Clone)]
pub struct Tube {
    axis: Ray,
    radius: f64,
    pub(crate) surface: Surface,
}

impl Tube {
    /// Create a new tube. The radius must be positive.
    pub fn new(axis: Ray, radius: f64) -> GeometryResult<Self> {
        if radius <= 0.0 || is_zero(radius) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            axis,
            radius,
            surface: Surface::default(),
        })
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Outward unit normal at a point on the lateral surface.
    ///
    /// The point is projected onto the axis and the normal runs from that
    /// projection to the point.
    pub fn normal_at(&self, point: &Point) -> GeometryResult<Vector> {
        let p0 = self.axis.origin();
        let dir = self.axis.direction();
        let t = dir.dot(&point.subtract(&p0)?);
        let o = if is_zero(t) { p0 } else { p0.add(&dir.scale(t)?) };
        Ok(point.subtract(&o)?.normalize())
    }

    /// Signed axial offset of a point from the axis origin.
    pub(crate) fn axial_offset(&self, point: &Point) -> f64 {
        let d = point.as_dvec3() - self.axis.origin().as_dvec3();
        d.dot(self.axis.direction().as_dvec3())
    }

    /// Ray parameters `t1 < t2` where the ray's line meets the lateral
    /// surface. `None` for rays parallel to the axis and for tangent or
    /// missing lines.
    pub(crate) fn lateral_params(&self, ray: &Ray) -> Option<(f64, f64)> {
        let axis: DVec3 = self.axis.direction().as_dvec3();
        let dir = ray.direction().as_dvec3();
        let delta = ray.origin().as_dvec3() - self.axis.origin().as_dvec3();

        // Components perpendicular to the axis
        let d_perp = dir - axis * dir.dot(axis);
        let p_perp = delta - axis * delta.dot(axis);

        let a = d_perp.length_squared();
        if is_zero(a) {
            return None;
        }
        let b = 2.0 * d_perp.dot(p_perp);
        let c = p_perp.length_squared() - self.radius * self.radius;

        let disc = align_zero(b * b - 4.0 * a * c);
        if disc <= 0.0 {
            return None;
        }
        let root = disc.sqrt();
        Some(((-b - root) / (2.0 * a), (-b + root) / (2.0 * a)))
    }

    /// Intersection points with the lateral surface, near to far.
    pub(crate) fn hit_points(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point>> {
        let (t1, t2) = self.lateral_params(ray)?;
        let points: Vec<Point> = [t1, t2]
            .into_iter()
            .map(align_zero)
            .filter(|t| *t > 0.0 && align_zero(t - max_distance) <= 0.0)
            .map(|t| ray.point_at(t))
            .collect();

        if points.is_empty() {
            None
        } else {
            Some(points)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn z_tube() -> Tube {
        Tube::new(Ray::new(Point::ZERO, Vector::Z), 1.0).unwrap()
    }

    #[test]
    fn test_tube_invalid_radius() {
        let axis = Ray::new(Point::ZERO, Vector::Z);
        assert!(matches!(Tube::new(axis, 0.0), Err(GeometryError::NonPositiveRadius(_))));
        assert!(Tube::new(axis, -1.0).is_err());
    }

    #[test]
    fn test_tube_normal() {
        let tube = z_tube();
        assert_eq!(tube.normal_at(&Point::new(1.0, 0.0, 5.0)).unwrap(), Vector::X);
        assert_eq!(tube.normal_at(&Point::new(0.0, -1.0, -3.0)).unwrap(), -Vector::Y);
    }

    #[test]
    fn test_tube_normal_level_with_axis_origin() {
        // Projection coincides with the axis origin
        let tube = z_tube();
        assert_eq!(tube.normal_at(&Point::new(0.0, 1.0, 0.0)).unwrap(), Vector::Y);
    }

    #[test]
    fn test_tube_crossing_ray() {
        let tube = Shape::from(z_tube());
        let ray = Ray::new(Point::new(-5.0, 0.0, 7.0), Vector::X);
        assert_eq!(
            tube.find_intersections(&ray),
            Some(vec![Point::new(-1.0, 0.0, 7.0), Point::new(1.0, 0.0, 7.0)])
        );
    }

    #[test]
    fn test_tube_ray_inside() {
        let tube = Shape::from(z_tube());
        let ray = Ray::new(Point::ZERO, Vector::X);
        assert_eq!(tube.find_intersections(&ray), Some(vec![Point::new(1.0, 0.0, 0.0)]));
    }

    #[test]
    fn test_tube_misses() {
        let tube = Shape::from(z_tube());

        // Parallel to the axis
        let parallel = Ray::new(Point::new(0.5, 0.0, 0.0), Vector::Z);
        assert!(tube.find_intersections(&parallel).is_none());

        // Tangent
        let tangent = Ray::new(Point::new(-5.0, 1.0, 0.0), Vector::X);
        assert!(tube.find_intersections(&tangent).is_none());

        // Pointing away
        let away = Ray::new(Point::new(5.0, 0.0, 0.0), Vector::X);
        assert!(tube.find_intersections(&away).is_none());
    }

    #[test]
    fn test_tube_max_distance() {
        let tube = Shape::from(z_tube());
        let ray = Ray::new(Point::new(-5.0, 0.0, 0.0), Vector::X);
        assert!(tube.intersect(&ray, 3.0).is_none());
        assert_eq!(tube.intersect(&ray, 4.0).map(|h| h.len()), Some(1));
        assert_eq!(tube.intersect(&ray, 100.0).map(|h| h.len()), Some(2));
    }
}
