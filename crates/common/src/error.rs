//! Error types shared across telegrid crates.

/// Usage errors raised by the resampling engine.
///
/// All of these are fatal for the call that raised them. Degenerate
/// brackets and field type mismatches are not errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    #[error("Cannot locate a bracket in an empty series")]
    EmptySeries,

    #[error("Resampling period must be a positive, finite number of milliseconds (got {period_ms})")]
    InvalidPeriod { period_ms: f64 },

    #[error("Resampling bounds must be finite (got {from_ms}..={to_ms})")]
    InvalidBounds { from_ms: f64, to_ms: f64 },

    #[error("Target timestamp is not a number (got {target_ms})")]
    InvalidTimestamp { target_ms: f64 },

    #[error("Resampling grid {from_ms}..={to_ms} every {period_ms}ms has too many points")]
    GridTooLarge {
        from_ms: f64,
        to_ms: f64,
        period_ms: f64,
    },
}
