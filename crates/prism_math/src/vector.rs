use std::fmt;
use std::ops::Neg;

use crate::{is_zero, DVec3, MathError, MathResult};

/// A non-zero direction in 3D space.
///
/// The zero vector is not representable: every constructor and every
/// operation that could produce it returns [`MathError::ZeroVector`].
#[derive(Debug, Copy, Clone)]
pub struct Vector(DVec3);

impl Vector {
    /// Unit vector along +X.
    pub const X: Vector = Vector(DVec3::X);
    /// Unit vector along +Y.
    pub const Y: Vector = Vector(DVec3::Y);
    /// Unit vector along +Z.
    pub const Z: Vector = Vector(DVec3::Z);
    /// Unit vector along -Z.
    pub const NEG_Z: Vector = Vector(DVec3::NEG_Z);

    /// Create a new vector, rejecting the zero vector.
    pub fn new(x: f64, y: f64, z: f64) -> MathResult<Self> {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    /// Wrap a raw glam vector, rejecting the zero vector.
    pub fn from_dvec3(v: DVec3) -> MathResult<Self> {
        if is_zero(v.x) && is_zero(v.y) && is_zero(v.z) {
            Err(MathError::ZeroVector)
        } else {
            Ok(Self(v))
        }
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

    /// Get the underlying components.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    pub fn add(&self, other: &Vector) -> MathResult<Vector> {
        Self::from_dvec3(self.0 + other.0)
    }

    pub fn subtract(&self, other: &Vector) -> MathResult<Vector> {
        Self::from_dvec3(self.0 - other.0)
    }

    /// Scale by `factor`. Scaling by zero fails.
    pub fn scale(&self, factor: f64) -> MathResult<Vector> {
        Self::from_dvec3(self.0 * factor)
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product. Fails for parallel or anti-parallel operands.
    pub fn cross(&self, other: &Vector) -> MathResult<Vector> {
        Self::from_dvec3(self.0.cross(other.0))
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    /// Unit vector with the same direction.
    pub fn normalize(&self) -> Vector {
        Vector(self.0 / self.0.length())
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        let d = self.0 - other.0;
        is_zero(d.x) && is_zero(d.y) && is_zero(d.z)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "->({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}
