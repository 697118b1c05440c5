//! Finite capped cylinder.

use prism_math::{align_zero, is_zero, Point, Ray, Vector};

use super::{GeometryError, GeometryResult, Plane, Surface, Surfaced, Tube};

/// A tube cut to `height` along its axis and closed by two discs.
///
/// The base disc is centered on the axis origin, the top disc `height`
/// further along the axis direction.
#[derive(Debug, Clone)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
    base: Plane,
    top: Plane,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> GeometryResult<Self> {
        if height <= 0.0 || is_zero(height) {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        let tube = Tube::new(axis, radius)?;
        let dir = axis.direction();
        let base = Plane::new(axis.origin(), dir);
        let top = Plane::new(axis.point_at(height), dir);
        Ok(Self {
            tube,
            height,
            base,
            top,
        })
    }

    pub fn axis(&self) -> &Ray {
        self.tube.axis()
    }

    pub fn radius(&self) -> f64 {
        self.tube.radius()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Unit normal at a point on the surface.
    ///
    /// Both caps report the axis direction.
    pub fn normal_at(&self, point: &Point) -> GeometryResult<Vector> {
        let s = self.tube.axial_offset(point);
        if is_zero(s) || is_zero(s - self.height) {
            return Ok(self.tube.axis().direction());
        }
        self.tube.normal_at(point)
    }

    fn on_cap(&self, cap: &Plane, ray: &Ray, max_distance: f64) -> Option<Point> {
        let p = cap.hit_point(ray, max_distance)?;
        let r2 = self.radius() * self.radius();
        (align_zero(p.distance_squared(&cap.q0()) - r2) < 0.0).then_some(p)
    }

    /// Lateral hits strictly between the caps plus hits strictly inside the
    /// cap discs, near to far.
    pub(crate) fn hit_points(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point>> {
        let mut points: Vec<Point> = Vec::with_capacity(2);

        if let Some((t1, t2)) = self.tube.lateral_params(ray) {
            for t in [t1, t2].map(align_zero) {
                if t <= 0.0 || align_zero(t - max_distance) > 0.0 {
                    continue;
                }
                let p = ray.point_at(t);
                let s = self.tube.axial_offset(&p);
                if align_zero(s) > 0.0 && align_zero(s - self.height) < 0.0 {
                    points.push(p);
                }
            }
        }

        points.extend(self.on_cap(&self.base, ray, max_distance));
        points.extend(self.on_cap(&self.top, ray, max_distance));

        if points.is_empty() {
            return None;
        }
        let origin = ray.origin();
        points.sort_by(|a, b| a.distance_squared(&origin).total_cmp(&b.distance_squared(&origin)));
        Some(points)
    }
}

// Appearance lives on the inner tube
impl Surfaced for Cylinder {
    fn surface(&self) -> &Surface {
        &self.tube.surface
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.tube.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    fn z_cylinder() -> Cylinder {
        Cylinder::new(Ray::new(Point::ZERO, Vector::Z), 1.0, 2.0).unwrap()
    }

    #[test]
    fn test_cylinder_invalid() {
        let axis = Ray::new(Point::ZERO, Vector::Z);
        assert!(matches!(
            Cylinder::new(axis, 1.0, 0.0),
            Err(GeometryError::NonPositiveHeight(_))
        ));
        assert!(matches!(
            Cylinder::new(axis, -1.0, 2.0),
            Err(GeometryError::NonPositiveRadius(_))
        ));
    }

    #[test]
    fn test_cylinder_normals() {
        let cyl = z_cylinder();

        // Lateral surface
        assert_eq!(cyl.normal_at(&Point::new(1.0, 0.0, 1.0)).unwrap(), Vector::X);

        // Both caps
        assert_eq!(cyl.normal_at(&Point::new(0.5, 0.0, 0.0)).unwrap(), Vector::Z);
        assert_eq!(cyl.normal_at(&Point::new(0.5, 0.0, 2.0)).unwrap(), Vector::Z);
        assert_eq!(cyl.normal_at(&Point::new(0.0, 0.0, 2.0)).unwrap(), Vector::Z);
    }

    #[test]
    fn test_cylinder_lateral_hits() {
        let cyl = Shape::from(z_cylinder());
        let ray = Ray::new(Point::new(-5.0, 0.0, 1.0), Vector::X);
        assert_eq!(
            cyl.find_intersections(&ray),
            Some(vec![Point::new(-1.0, 0.0, 1.0), Point::new(1.0, 0.0, 1.0)])
        );
    }

    #[test]
    fn test_cylinder_cap_hits() {
        let cyl = Shape::from(z_cylinder());

        let up = Ray::new(Point::new(0.5, 0.0, -5.0), Vector::Z);
        assert_eq!(
            cyl.find_intersections(&up),
            Some(vec![Point::new(0.5, 0.0, 0.0), Point::new(0.5, 0.0, 2.0)])
        );

        let down = Ray::new(Point::new(0.0, 0.0, 5.0), Vector::NEG_Z);
        assert_eq!(
            cyl.find_intersections(&down),
            Some(vec![Point::new(0.0, 0.0, 2.0), Point::ZERO])
        );
    }

    #[test]
    fn test_cylinder_side_then_cap() {
        let cyl = Shape::from(z_cylinder());
        // Enters through the side at z = 1, leaves through the top
        let ray = Ray::new(Point::new(-2.0, 0.0, 0.0), Vector::new(1.0, 0.0, 1.0).unwrap());
        let points = cyl.find_intersections(&ray).unwrap();
        assert_eq!(points, vec![Point::new(-1.0, 0.0, 1.0), Point::new(0.0, 0.0, 2.0)]);
    }

    #[test]
    fn test_cylinder_misses() {
        let cyl = Shape::from(z_cylinder());

        // Above the top, crossing the infinite tube only
        let above = Ray::new(Point::new(-5.0, 0.0, 3.0), Vector::X);
        assert!(cyl.find_intersections(&above).is_none());

        // Parallel to the axis, outside the radius
        let outside = Ray::new(Point::new(2.0, 0.0, -5.0), Vector::Z);
        assert!(cyl.find_intersections(&outside).is_none());
    }

    #[test]
    fn test_cylinder_max_distance() {
        let cyl = Shape::from(z_cylinder());
        let ray = Ray::new(Point::new(0.5, 0.0, -5.0), Vector::Z);
        assert!(cyl.intersect(&ray, 4.0).is_none());
        assert_eq!(cyl.intersect(&ray, 5.0).map(|h| h.len()), Some(1));
    }
}
