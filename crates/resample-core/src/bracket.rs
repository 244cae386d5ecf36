//! Bracket location: find the two samples surrounding a target timestamp.

use telegrid_common::clock::TimestampMs;
use telegrid_common::error::ResampleError;
use telegrid_record_model::record::Record;

use crate::interpolate::{interpolate_record, unlerp, ExclusionSet};

/// The pair of records around a target timestamp and the fraction between them.
///
/// `t == 0` selects `left`, `t == 1` selects `right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket<'a> {
    pub left: &'a Record,
    pub right: &'a Record,
    pub t: f64,
}

impl Bracket<'_> {
    /// Blend the bracket's records at its fraction.
    pub fn interpolate(&self, excluded: &ExclusionSet) -> Record {
        interpolate_record(self.left, self.right, self.t, excluded)
    }
}

/// Locate the records bracketing `target_ms` in a timestamp-sorted series.
///
/// Targets at or before the first sample clamp to `(first, first, 0)`;
/// targets at or after the last sample clamp to `(last, last, 1)`. Inside
/// the range the right bracket is the first record whose timestamp is not
/// earlier than the target, and the left bracket is its predecessor.
pub fn locate_bracket(
    series: &[Record],
    target_ms: TimestampMs,
) -> Result<Bracket<'_>, ResampleError> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ResampleError::EmptySeries),
    };

    if target_ms.is_nan() {
        return Err(ResampleError::InvalidTimestamp { target_ms });
    }

    if series.len() == 1 || target_ms <= first.timestamp_ms {
        return Ok(Bracket {
            left: first,
            right: first,
            t: 0.0,
        });
    }

    if target_ms >= last.timestamp_ms {
        return Ok(Bracket {
            left: last,
            right: last,
            t: 1.0,
        });
    }

    // first < target < last, so the boundary lies in 1..len on sorted input;
    // the clamp keeps unsorted input in bounds.
    let right_idx = series
        .partition_point(|record| record.timestamp_ms < target_ms)
        .clamp(1, series.len() - 1);
    let left = &series[right_idx - 1];
    let right = &series[right_idx];

    // On sorted input only a NaN bracket timestamp makes the fraction
    // undefined.
    let mut t = unlerp(left.timestamp_ms, right.timestamp_ms, target_ms);
    if !t.is_finite() {
        tracing::warn!(
            left_ms = left.timestamp_ms,
            right_ms = right.timestamp_ms,
            target_ms,
            "Bracket timestamp is not a number, using left sample"
        );
        t = 0.0;
    }

    Ok(Bracket { left, right, t })
}
