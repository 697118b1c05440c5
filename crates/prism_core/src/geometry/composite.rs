//! Group of shapes intersected as one.

use prism_math::Ray;

use super::{HitRecord, Shape};

/// An owned, growable collection of shapes.
///
/// Intersecting a composite intersects every child; child order does not
/// affect which hits are found.
#[derive(Debug, Clone, Default)]
pub struct Composite {
    shapes: Vec<Shape>,
}

impl Composite {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape.
    pub fn add(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// Builder-style [`Composite::add`].
    pub fn with(mut self, shape: impl Into<Shape>) -> Self {
        self.add(shape);
        self
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    /// Hits of every child, concatenated. `None` if no child is hit.
    pub fn intersect(&self, ray: &Ray, max_distance: f64) -> Option<Vec<HitRecord<'_>>> {
        let mut hits: Option<Vec<HitRecord<'_>>> = None;
        for shape in &self.shapes {
            if let Some(found) = shape.intersect(ray, max_distance) {
                hits.get_or_insert_with(Vec::new).extend(found);
            }
        }
        hits
    }
}

impl From<Vec<Shape>> for Composite {
    fn from(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }
}

impl<'a> IntoIterator for &'a Composite {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Plane, Sphere, Triangle};
    use prism_math::{Point, Vector};

    fn parts() -> (Shape, Shape, Shape) {
        let sphere = Sphere::new(Point::new(1.0, 0.0, 0.0), 1.0).unwrap().into();
        let plane = Plane::new(Point::new(0.0, 0.0, 1.0), Vector::new(1.0, 1.0, 1.0).unwrap()).into();
        let triangle = Triangle::new(
            Point::new(-4.0, 0.0, 0.0),
            Point::new(0.0, 0.0, 5.0),
            Point::new(0.0, -5.0, 0.0),
        )
        .unwrap()
        .into();
        (sphere, plane, triangle)
    }

    fn count(composite: Composite, ray: &Ray) -> Option<usize> {
        Shape::from(composite).find_intersections(ray).map(|p| p.len())
    }

    #[test]
    fn test_composite_empty() {
        let ray = Ray::new(Point::ZERO, Vector::X);
        assert!(Composite::new().is_empty());
        assert!(count(Composite::new(), &ray).is_none());
    }

    #[test]
    fn test_composite_no_child_hit() {
        let (sphere, plane, triangle) = parts();
        let composite = Composite::from(vec![sphere, plane, triangle]);
        assert_eq!(composite.len(), 3);

        // Parallel to the plane, missing the sphere and the triangle
        let ray = Ray::new(Point::new(0.0, 0.0, 10.0), Vector::new(1.0, -1.0, 0.0).unwrap());
        assert!(count(composite, &ray).is_none());
    }

    #[test]
    fn test_composite_union_of_hits() {
        let (sphere, plane, triangle) = parts();
        // Along the x axis: sphere twice, plane once, triangle never
        let ray = Ray::new(Point::new(-1.0, 0.0, 0.0), Vector::X);

        let mut composite = Composite::new();
        composite.add(sphere);
        composite.add(plane);
        composite.add(triangle);
        assert_eq!(count(composite, &ray), Some(3));
    }

    #[test]
    fn test_composite_order_independent() {
        let ray = Ray::new(Point::new(-1.0, 0.0, 0.0), Vector::X);
        let (s1, p1, t1) = parts();
        let (s2, p2, t2) = parts();

        let forward = Composite::new().with(s1).with(p1).with(t1);
        let backward = Composite::new().with(t2).with(p2).with(s2);
        assert_eq!(count(forward, &ray), count(backward, &ray));
    }

    #[test]
    fn test_composite_single_child_hit() {
        let (sphere, _, triangle) = parts();
        let composite = Composite::new().with(sphere).with(triangle);
        let ray = Ray::new(Point::new(-1.0, 0.0, 0.0), Vector::X);
        assert_eq!(count(composite, &ray), Some(2));
    }

    #[test]
    fn test_composite_nested() {
        let (sphere, plane, _) = parts();
        let inner = Composite::new().with(sphere);
        let outer = Composite::new().with(inner).with(plane);
        let ray = Ray::new(Point::new(-1.0, 0.0, 0.0), Vector::X);
        assert_eq!(count(outer, &ray), Some(3));
    }
}
