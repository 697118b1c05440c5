// Re-export glam for convenience
pub use glam::{dvec3, DVec3};

// Prism math types
mod error;
mod point;
mod ray;
mod util;
mod vector;

pub use error::{MathError, MathResult};
pub use point::Point;
pub use ray::{Ray, RAY_OFFSET};
pub use util::{align_zero, is_zero, EPSILON};
pub use vector::Vector;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_vector_roundtrip() {
        let p = Point::new(1.0, 2.0, 3.0);
        let v = Vector::new(4.0, 5.0, 6.0).unwrap();
        let q = p.add(&v);
        assert_eq!(q, Point::new(5.0, 7.0, 9.0));
        assert_eq!(q.subtract(&p).unwrap(), v);
    }

    #[test]
    fn test_ray_through_points() {
        let from = Point::new(0.0, 0.0, 0.0);
        let to = Point::new(0.0, 0.0, -5.0);
        let ray = Ray::new(from, to.subtract(&from).unwrap());
        assert_eq!(ray.point_at(5.0), to);
    }
}
