//! Pixel distribution for parallel rendering.
//!
//! Every pixel of the image is handed out exactly once, in row-major order,
//! to whichever worker asks next. The scheduler itself is never changed
//! after creation; an atomic cursor tracks the next pixel and an atomic
//! counter tracks completed pixels for progress reporting.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

/// Thread-safe source of pixel coordinates.
#[derive(Debug)]
pub struct PixelScheduler {
    rows: u32,
    cols: u32,
    total: usize,
    /// Index of the next pixel to hand out
    next: AtomicUsize,
    /// Pixels reported finished
    done: AtomicUsize,
    /// Minimum time between progress reports; 0 disables reporting
    progress_interval_ms: u64,
    started: Instant,
    /// Milliseconds since `started` of the last progress report
    last_report_ms: AtomicU64,
}

impl PixelScheduler {
    /// Create a scheduler over a `rows` x `cols` image.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            total: rows as usize * cols as usize,
            next: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
            progress_interval_ms: 0,
            started: Instant::now(),
            last_report_ms: AtomicU64::new(0),
        }
    }

    /// Log progress at most once per `interval_ms` milliseconds.
    pub fn with_progress_interval(mut self, interval_ms: u64) -> Self {
        self.progress_interval_ms = interval_ms;
        self
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of pixels.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of pixels reported finished so far.
    pub fn completed(&self) -> usize {
        self.done.load(Ordering::Acquire)
    }

    /// Take the next pixel as `(row, col)`, or `None` once every pixel has
    /// been handed out.
    pub fn next_pixel(&self) -> Option<(u32, u32)> {
        let i = self.next.fetch_add(1, Ordering::AcqRel);
        if i >= self.total {
            return None;
        }
        let cols = self.cols as usize;
        Some(((i / cols) as u32, (i % cols) as u32))
    }

    /// Record a finished pixel and report progress if the interval elapsed.
    ///
    /// Only one caller wins each report slot; the others return at once.
    pub fn pixel_done(&self) {
        let done = self.done.fetch_add(1, Ordering::AcqRel) + 1;
        if self.progress_interval_ms == 0 {
            return;
        }

        let now = self.started.elapsed().as_millis() as u64;
        let last = self.last_report_ms.load(Ordering::Acquire);
        if now.saturating_sub(last) < self.progress_interval_ms && done < self.total {
            return;
        }
        if self
            .last_report_ms
            .compare_exchange(last, now, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
        {
            log::info!(
                "Rendered {}/{} pixels ({:.1}%)",
                done,
                self.total,
                100.0 * done as f64 / self.total as f64
            );
        }
    }

    /// Iterate over the remaining pixels.
    pub fn iter(&self) -> PixelIter<'_> {
        PixelIter { scheduler: self }
    }
}

/// Iterator that drains a [`PixelScheduler`].
pub struct PixelIter<'a> {
    scheduler: &'a PixelScheduler,
}

impl Iterator for PixelIter<'_> {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        self.scheduler.next_pixel()
    }
}
