//! Jittered sample generation and sample averaging.
//!
//! A [`TargetArea`] is a square in 3D space (a pixel footprint or a lens
//! aperture) spanned by two orthonormal vectors. It produces a
//! [`SampleGrid`]: one randomly perturbed point per cell of an n x n grid,
//! which keeps samples spread over the whole area while breaking up the
//! regular pattern that causes aliasing.

use prism_core::Color;
use prism_math::{Point, Vector};
use rand::{Rng, RngCore};
use thiserror::Error;

/// Errors from sample generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("sample count must be at least 1, got {0}")]
    InvalidCount(usize),
}

/// Result type for sampling operations.
pub type SampleResult<T> = Result<T, SampleError>;

/// A square sampling region.
#[derive(Debug, Clone, Copy)]
pub struct TargetArea {
    center: Point,
    up: Vector,
    right: Vector,
    side: f64,
}

impl TargetArea {
    /// Create a square of side `side` centered at `center`, with rows
    /// running along `right` and columns along `up`.
    pub fn new(center: Point, up: Vector, right: Vector, side: f64) -> Self {
        Self {
            center,
            up,
            right,
            side,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn side(&self) -> f64 {
        self.side
    }

    /// Generate a jittered grid of `floor(sqrt(count))^2` points.
    ///
    /// Row 0 is the top row (furthest along `up`), column 0 the leftmost.
    /// Each point sits in its own cell, displaced from the cell center by up
    /// to half a cell along each axis.
    pub fn jittered_grid(&self, count: usize, rng: &mut dyn RngCore) -> SampleResult<SampleGrid> {
        if count < 1 {
            return Err(SampleError::InvalidCount(count));
        }
        let n = (count as f64).sqrt().floor() as usize;
        let cell = self.side / n as f64;
        let half = (n as f64 - 1.0) / 2.0;

        let center = self.center.as_dvec3();
        let up = self.up.as_dvec3();
        let right = self.right.as_dvec3();

        let mut points = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let x = (col as f64 - half) * cell + jitter(rng, cell);
                let y = (half - row as f64) * cell + jitter(rng, cell);
                points.push(Point::from_dvec3(center + right * x + up * y));
            }
        }

        Ok(SampleGrid { size: n, points })
    }
}

/// Uniform offset in `[-cell/2, cell/2)`.
fn jitter(rng: &mut dyn RngCore, cell: f64) -> f64 {
    rng.gen::<f64>() * cell - cell / 2.0
}

/// An n x n grid of sample points, addressable by (row, col).
#[derive(Debug, Clone)]
pub struct SampleGrid {
    size: usize,
    points: Vec<Point>,
}

impl SampleGrid {
    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Point {
        self.points[row * self.size + col]
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Mean color over every sample point.
///
/// When every sample has the same color that color is returned unchanged.
pub fn average<E, F>(points: &[Point], mut cast: F) -> Result<Color, E>
where
    F: FnMut(&Point) -> Result<Color, E>,
{
    let Some((first, rest)) = points.split_first() else {
        return Ok(Color::ZERO);
    };
    let first = cast(first)?;
    let mut sum = first;
    let mut uniform = true;
    for point in rest {
        let color = cast(point)?;
        uniform &= color == first;
        sum += color;
    }
    if uniform {
        return Ok(first);
    }
    Ok(sum / points.len() as f64)
}

/// Mean color over a grid using adaptive supersampling.
///
/// A region is evaluated at its four corner cells. If all four colors are
/// exactly equal the region is taken as uniform; otherwise it is split at
/// its midpoint indices and each part is evaluated the same way, the parts
/// weighted equally. A region one cell wide is only split along the other
/// axis. Each cell is cast at most once.
pub fn adaptive_average<E, F>(grid: &SampleGrid, cast: F) -> Result<Color, E>
where
    F: FnMut(&Point) -> Result<Color, E>,
{
    if grid.is_empty() {
        return Ok(Color::ZERO);
    }
    let last = grid.size - 1;
    let mut sampler = Adaptive {
        grid,
        cast,
        memo: vec![None; grid.len()],
    };
    sampler.region(0, 0, last, last)
}

struct Adaptive<'g, F> {
    grid: &'g SampleGrid,
    cast: F,
    memo: Vec<Option<Color>>,
}

impl<F> Adaptive<'_, F> {
    fn color<E>(&mut self, row: usize, col: usize) -> Result<Color, E>
    where
        F: FnMut(&Point) -> Result<Color, E>,
    {
        let index = row * self.grid.size + col;
        if let Some(color) = self.memo[index] {
            return Ok(color);
        }
        let color = (self.cast)(&self.grid.get(row, col))?;
        self.memo[index] = Some(color);
        Ok(color)
    }

    // Inclusive index bounds
    fn region<E>(&mut self, r0: usize, c0: usize, r1: usize, c1: usize) -> Result<Color, E>
    where
        F: FnMut(&Point) -> Result<Color, E>,
    {
        if r0 == r1 && c0 == c1 {
            return self.color(r0, c0);
        }

        let corners = [
            self.color(r0, c0)?,
            self.color(r0, c1)?,
            self.color(r1, c0)?,
            self.color(r1, c1)?,
        ];
        if corners.iter().all(|c| *c == corners[0]) {
            return Ok(corners[0]);
        }

        let rows = halves(r0, r1);
        let cols = halves(c0, c1);
        let mut sum = Color::ZERO;
        let mut parts = 0;
        for &(ra, rb) in rows.iter().flatten() {
            for &(ca, cb) in cols.iter().flatten() {
                sum += self.region(ra, ca, rb, cb)?;
                parts += 1;
            }
        }
        Ok(sum / parts as f64)
    }
}

/// Split an inclusive range at its midpoint; a single index stays whole.
fn halves(lo: usize, hi: usize) -> [Option<(usize, usize)>; 2] {
    if lo == hi {
        return [Some((lo, hi)), None];
    }
    let mid = (lo + hi) / 2;
    [Some((lo, mid)), Some((mid + 1, hi))]
}
