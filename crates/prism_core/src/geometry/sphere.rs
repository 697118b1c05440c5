//! Sphere primitive for ray tracing.

use prism_math::{align_zero, is_zero, Point, Ray, Vector};

use super::{GeometryError, GeometryResult, Surface};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Point,
    radius: f64,
    pub(crate) surface: Surface,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point, radius: f64) -> GeometryResult<Self> {
        if radius <= 0.0 || is_zero(radius) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            surface: Surface::default(),
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Outward unit normal at a point on the sphere.
    pub fn normal_at(&self, point: &Point) -> GeometryResult<Vector> {
        Ok(point.subtract(&self.center)?.normalize())
    }

    /// Intersection points ordered near to far.
    ///
    /// Projects the center onto the ray (`tm`), measures the distance `d`
    /// from the center to the ray, and steps `th` either side of the
    /// projection. Tangent rays do not intersect.
    pub(crate) fn hit_points(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point>> {
        let within = |t: f64| t > 0.0 && align_zero(t - max_distance) <= 0.0;

        let Ok(u) = self.center.subtract(&ray.origin()) else {
            // Ray starts at the center: exactly one hit, one radius away
            return within(self.radius).then(|| vec![ray.point_at(self.radius)]);
        };

        let tm = align_zero(ray.direction().dot(&u));
        let d = (u.length_squared() - tm * tm).max(0.0).sqrt();
        if d > self.radius || is_zero(self.radius - d) {
            return None;
        }

        let th = align_zero((self.radius * self.radius - d * d).sqrt());
        let t1 = align_zero(tm - th);
        let t2 = align_zero(tm + th);

        let points: Vec<Point> = [t1, t2]
            .into_iter()
            .filter(|t| within(*t))
            .map(|t| ray.point_at(t))
            .collect();

        if points.is_empty() {
            None
        } else {
            Some(points)
        }
    }
}
