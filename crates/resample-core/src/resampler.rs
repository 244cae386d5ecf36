//! Uniform-grid resampling of telemetry series.
//!
//! Every grid point gets a record synthesized from the bracketing pair of
//! source samples. The output timestamp is always the exact grid value.

use std::collections::BTreeMap;

use telegrid_common::clock::{SampleGrid, TimestampMs};
use telegrid_common::config::ResamplingDefaults;
use telegrid_common::error::ResampleError;
use telegrid_record_model::record::{Record, Series};

use crate::bracket::locate_bracket;
use crate::interpolate::ExclusionSet;
use crate::prepare::ParticipantKey;

/// Resample `series` onto the grid `from_ms, from_ms + period_ms, ... <= to_ms`.
///
/// Fails with `InvalidPeriod` before generating anything when the period is
/// not positive, and with `GridTooLarge` when the grid has too many points.
/// `from_ms > to_ms` yields an empty result.
pub fn resample(
    series: &[Record],
    from_ms: TimestampMs,
    to_ms: TimestampMs,
    period_ms: f64,
    excluded: &ExclusionSet,
) -> Result<Series, ResampleError> {
    let grid = SampleGrid::new(from_ms, to_ms, period_ms)?;
    resample_on_grid(series, &grid, excluded)
}

/// Resample `series` onto a prepared grid.
pub fn resample_on_grid(
    series: &[Record],
    grid: &SampleGrid,
    excluded: &ExclusionSet,
) -> Result<Series, ResampleError> {
    let mut result = Vec::with_capacity(grid.len());

    for timestamp_ms in grid.timestamps() {
        let mut record = locate_bracket(series, timestamp_ms)?.interpolate(excluded);
        record.timestamp_ms = timestamp_ms;
        result.push(record);
    }

    tracing::debug!(
        input = series.len(),
        output = result.len(),
        from_ms = grid.from_ms(),
        to_ms = grid.to_ms(),
        period_ms = grid.period_ms(),
        "Resampled series"
    );

    Ok(result)
}

/// Resampling parameters.
#[derive(Debug, Clone)]
pub struct ResampleConfig {
    /// Grid period in milliseconds.
    pub period_ms: f64,

    /// Fields copied from the left bracket instead of interpolated.
    pub excluded_fields: ExclusionSet,

    /// Grid start; defaults to the series' first timestamp.
    pub from_ms: Option<TimestampMs>,

    /// Grid end; defaults to the series' last timestamp.
    pub to_ms: Option<TimestampMs>,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self::from_defaults(&ResamplingDefaults::default())
    }
}

impl ResampleConfig {
    /// Build a config from application defaults, with no explicit bounds.
    pub fn from_defaults(defaults: &ResamplingDefaults) -> Self {
        Self {
            period_ms: defaults.period_ms,
            excluded_fields: defaults.excluded_fields.iter().cloned().collect(),
            from_ms: None,
            to_ms: None,
        }
    }
}

/// Resampling engine bound to one configuration.
pub struct Resampler {
    config: ResampleConfig,
}

impl Resampler {
    /// Create a resampler with the given configuration.
    pub fn new(config: ResampleConfig) -> Self {
        Self { config }
    }

    /// Create a resampler with default settings (10 ms, standard exclusions).
    pub fn with_defaults() -> Self {
        Self::new(ResampleConfig::default())
    }

    pub fn config(&self) -> &ResampleConfig {
        &self.config
    }

    /// The grid this resampler would use for `series`.
    ///
    /// Missing bounds come from the series' first and last timestamps, so an
    /// empty series needs both bounds set explicitly.
    pub fn grid_for(&self, series: &[Record]) -> Result<SampleGrid, ResampleError> {
        let from_ms = match self.config.from_ms {
            Some(ms) => ms,
            None => series.first().ok_or(ResampleError::EmptySeries)?.timestamp_ms,
        };
        let to_ms = match self.config.to_ms {
            Some(ms) => ms,
            None => series.last().ok_or(ResampleError::EmptySeries)?.timestamp_ms,
        };
        SampleGrid::new(from_ms, to_ms, self.config.period_ms)
    }

    /// Resample one series.
    pub fn resample(&self, series: &[Record]) -> Result<Series, ResampleError> {
        let grid = self.grid_for(series)?;
        resample_on_grid(series, &grid, &self.config.excluded_fields)
    }

    /// Resample every participant's series, stopping at the first failure.
    pub fn resample_groups(
        &self,
        groups: &BTreeMap<ParticipantKey, Series>,
    ) -> Result<BTreeMap<ParticipantKey, Series>, ResampleError> {
        groups
            .iter()
            .map(|(participant, series)| {
                tracing::debug!(
                    participant = %participant,
                    records = series.len(),
                    "Resampling participant"
                );
                self.resample(series)
                    .map(|resampled| (participant.clone(), resampled))
            })
            .collect()
    }
}
