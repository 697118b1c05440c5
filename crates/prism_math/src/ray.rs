use crate::{is_zero, Point, Vector};

/// Distance secondary rays are pushed off the surface they start on.
pub const RAY_OFFSET: f64 = 0.1;

/// A ray in 3D space with an origin and a unit direction.
///
/// Rays are used for raytracing - they represent a half-line starting at
/// `origin` and traveling in `direction`. The direction is normalized on
/// construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point,
    direction: Vector,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray leaving a surface point.
    ///
    /// The origin is moved by [`RAY_OFFSET`] along `normal`, toward the side
    /// of the surface the ray heads into, so the ray cannot hit the surface
    /// it starts on.
    pub fn with_offset(point: Point, direction: Vector, normal: &Vector) -> Self {
        let n = normal.as_dvec3();
        let offset = if n.dot(direction.as_dvec3()) > 0.0 {
            RAY_OFFSET
        } else {
            -RAY_OFFSET
        };
        let origin = Point::from_dvec3(point.as_dvec3() + n * offset);
        Self::new(origin, direction)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns the origin unchanged when `t` is numerically zero, otherwise
    /// origin + t * direction. Negative `t` is accepted and yields a point
    /// behind the origin; callers that need forward points check the sign.
    pub fn point_at(&self, t: f64) -> Point {
        if is_zero(t) {
            self.origin
        } else {
            Point::from_dvec3(self.origin.as_dvec3() + self.direction.as_dvec3() * t)
        }
    }

    /// Find the point closest to the ray origin.
    ///
    /// Returns `None` for an empty slice.
    pub fn find_closest_point(&self, points: &[Point]) -> Option<Point> {
        self.find_closest_by(points, |p| *p).copied()
    }

    /// Find the item whose point is closest to the ray origin.
    ///
    /// `point_of` extracts the position of each candidate. Returns `None`
    /// for an empty slice.
    pub fn find_closest_by<'a, T, F>(&self, items: &'a [T], point_of: F) -> Option<&'a T>
    where
        F: Fn(&T) -> Point,
    {
        let mut closest: Option<(&T, f64)> = None;
        for item in items {
            let d = self.origin.distance_squared(&point_of(item));
            match closest {
                Some((_, best)) if best <= d => {}
                _ => closest = Some((item, d)),
            }
        }
        closest.map(|(item, _)| item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation_normalizes() {
        let origin = Point::new(1.0, 2.0, 3.0);
        let ray = Ray::new(origin, Vector::new(0.0, 3.0, 4.0).unwrap());

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), Vector::new(0.0, 0.6, 0.8).unwrap());
        assert!((ray.direction().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ray_point_at() {
        let ray = Ray::new(Point::new(1.0, 0.0, 0.0), Vector::X);

        assert_eq!(ray.point_at(0.0), Point::new(1.0, 0.0, 0.0));
        assert_eq!(ray.point_at(1e-12), Point::new(1.0, 0.0, 0.0));
        assert_eq!(ray.point_at(2.5), Point::new(3.5, 0.0, 0.0));
        assert_eq!(ray.point_at(-1.0), Point::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_with_offset() {
        let p = Point::new(0.0, 0.0, 0.0);
        let n = Vector::Z;

        // Leaving toward the normal side
        let out = Ray::with_offset(p, Vector::new(1.0, 0.0, 1.0).unwrap(), &n);
        assert_eq!(out.origin(), Point::new(0.0, 0.0, RAY_OFFSET));

        // Going through the surface
        let inward = Ray::with_offset(p, Vector::new(1.0, 0.0, -1.0).unwrap(), &n);
        assert_eq!(inward.origin(), Point::new(0.0, 0.0, -RAY_OFFSET));
    }

    #[test]
    fn test_find_closest_point() {
        let ray = Ray::new(Point::ZERO, Vector::X);
        let a = Point::new(3.0, 0.0, 0.0);
        let b = Point::new(1.0, 0.0, 0.0);
        let c = Point::new(2.0, 0.0, 0.0);

        // Closest in the middle, first and last position
        assert_eq!(ray.find_closest_point(&[a, b, c]), Some(b));
        assert_eq!(ray.find_closest_point(&[b, a, c]), Some(b));
        assert_eq!(ray.find_closest_point(&[a, c, b]), Some(b));
    }

    #[test]
    fn test_find_closest_point_empty() {
        let ray = Ray::new(Point::ZERO, Vector::X);
        assert_eq!(ray.find_closest_point(&[]), None);
    }

    #[test]
    fn test_ray_copy() {
        let ray1 = Ray::new(Point::ZERO, Vector::Y);
        let ray2 = ray1; // Copy, not move

        // Both should be usable
        assert_eq!(ray1.origin(), ray2.origin());
        assert_eq!(ray1.point_at(1.0), ray2.point_at(1.0));
    }
}
