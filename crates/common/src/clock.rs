//! Sample grid and timing utilities.
//!
//! Every telegrid series is measured in milliseconds relative to a fixed
//! reference point of that series. This module provides:
//! - The uniform output grid (`from..=to` stepped by `period`)
//! - Millisecond to second conversion
//! - The wall-clock stamp recorded in output manifests

use crate::error::ResampleError;

/// Milliseconds since the reference point of a series.
pub type TimestampMs = f64;

/// Upper bound on the number of points in one grid.
pub const MAX_GRID_POINTS: usize = 100_000_000;

/// A uniform grid of output timestamps.
///
/// Grid points are `from_ms + i * period_ms` for every `i` whose point is
/// still `<= to_ms`. The last point may land short of `to_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    from_ms: TimestampMs,
    to_ms: TimestampMs,
    period_ms: f64,
}

impl SampleGrid {
    /// Create a grid, rejecting non-positive periods, non-finite bounds and
    /// grids with more than [`MAX_GRID_POINTS`] points.
    ///
    /// `from_ms > to_ms` is accepted and yields an empty grid.
    pub fn new(
        from_ms: TimestampMs,
        to_ms: TimestampMs,
        period_ms: f64,
    ) -> Result<Self, ResampleError> {
        if !period_ms.is_finite() || period_ms <= 0.0 {
            return Err(ResampleError::InvalidPeriod { period_ms });
        }
        if !from_ms.is_finite() || !to_ms.is_finite() {
            return Err(ResampleError::InvalidBounds { from_ms, to_ms });
        }
        if to_ms >= from_ms {
            let steps = ((to_ms - from_ms) / period_ms).floor();
            if !steps.is_finite() || steps >= MAX_GRID_POINTS as f64 {
                return Err(ResampleError::GridTooLarge {
                    from_ms,
                    to_ms,
                    period_ms,
                });
            }
        }
        Ok(Self {
            from_ms,
            to_ms,
            period_ms,
        })
    }

    pub fn from_ms(&self) -> TimestampMs {
        self.from_ms
    }

    pub fn to_ms(&self) -> TimestampMs {
        self.to_ms
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        if self.to_ms < self.from_ms {
            return 0;
        }
        // Bounded by MAX_GRID_POINTS in `new`.
        let steps = ((self.to_ms - self.from_ms) / self.period_ms).floor() as usize;
        let mut count = steps.checked_add(1).unwrap_or(usize::MAX);
        // Rounding in the division can admit one point past `to_ms`.
        while count > 0 && self.timestamp_at(count - 1) > self.to_ms {
            count -= 1;
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamp of the `index`-th grid point.
    pub fn timestamp_at(&self, index: usize) -> TimestampMs {
        self.from_ms + index as f64 * self.period_ms
    }

    /// Iterate over grid timestamps in ascending order.
    pub fn timestamps(&self) -> impl Iterator<Item = TimestampMs> + '_ {
        (0..self.len()).map(move |i| self.timestamp_at(i))
    }
}

/// Convert milliseconds to seconds.
pub fn ms_to_secs(ms: TimestampMs) -> f64 {
    ms / 1000.0
}

/// Current wall-clock time (RFC 3339), used to stamp generated output.
pub fn wall_clock_now() -> String {
    chrono::Utc::now().to_rfc3339()
}
