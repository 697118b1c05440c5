use std::fmt;

use prism_math::{Point, Ray};

use super::Shape;

/// Record of a ray-shape intersection: which shape was hit, and where.
///
/// Shading code uses the shape to fetch the normal and material without
/// searching the scene again.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// The primitive that was hit
    pub shape: &'a Shape,
    /// Point of intersection
    pub point: Point,
}

impl<'a> HitRecord<'a> {
    pub fn new(shape: &'a Shape, point: Point) -> Self {
        Self { shape, point }
    }
}

/// Two records are equal when they refer to the same shape instance and
/// equal points.
impl PartialEq for HitRecord<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.shape, other.shape) && self.point == other.point
    }
}

impl fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitRecord")
            .field("shape", &(self.shape as *const Shape))
            .field("point", &self.point)
            .finish()
    }
}

/// The hit closest to the ray origin, if any.
pub fn closest_hit<'a>(ray: &Ray, hits: &[HitRecord<'a>]) -> Option<HitRecord<'a>> {
    ray.find_closest_by(hits, |hit| hit.point).copied()
}
