use std::fmt;

use crate::{is_zero, DVec3, MathResult, Vector};

/// A point in 3D space.
///
/// Equality is tolerant: two points are equal when every coordinate
/// difference is numerically zero.
#[derive(Debug, Copy, Clone)]
pub struct Point(pub(crate) DVec3);

impl Point {
    /// The origin.
    pub const ZERO: Point = Point(DVec3::ZERO);

    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Wrap a raw glam vector as a point.
    pub fn from_dvec3(v: DVec3) -> Self {
        Self(v)
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Get the underlying coordinates.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    /// Vector from `other` to `self`.
    ///
    /// Fails when both points coincide.
    pub fn subtract(&self, other: &Point) -> MathResult<Vector> {
        Vector::from_dvec3(self.0 - other.0)
    }

    /// Move this point by `v`.
    #[inline]
    pub fn add(&self, v: &Vector) -> Point {
        Point(self.0 + v.as_dvec3())
    }

    pub fn distance_squared(&self, other: &Point) -> f64 {
        self.0.distance_squared(other.0)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        self.0.distance(other.0)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let d = self.0 - other.0;
        is_zero(d.x) && is_zero(d.y) && is_zero(d.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

impl From<DVec3> for Point {
    fn from(v: DVec3) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MathError;

    #[test]
    fn test_point_subtract() {
        let p1 = Point::new(1.0, 2.0, 3.0);
        let p2 = Point::new(2.0, 3.0, 4.0);
        let v = p2.subtract(&p1).unwrap();
        assert_eq!(v, Vector::new(1.0, 1.0, 1.0).unwrap());
    }

    #[test]
    fn test_point_subtract_self_fails() {
        let p = Point::new(1.0, 2.0, 3.0);
        assert_eq!(p.subtract(&p), Err(MathError::ZeroVector));
    }

    #[test]
    fn test_point_add() {
        let p = Point::new(1.0, 2.0, 3.0);
        let v = Vector::new(-1.0, -2.0, -3.0).unwrap();
        assert_eq!(p.add(&v), Point::ZERO);
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(1.0, 2.0, 3.0);
        let p2 = Point::new(1.0, 6.0, 6.0);
        assert!((p1.distance_squared(&p2) - 25.0).abs() < 1e-12);
        assert!((p1.distance(&p2) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_tolerant_equality() {
        let p = Point::new(0.4, 0.4, 0.4);
        let q = Point::new(0.4 + 1e-13, 0.4, 0.4 - 1e-13);
        assert_eq!(p, q);
        assert_ne!(p, Point::new(0.4, 0.41, 0.4));
    }
}
