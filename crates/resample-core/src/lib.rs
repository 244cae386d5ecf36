//! Telegrid Resample Core: the resampling engine
//!
//! Turns irregularly sampled telemetry series into uniformly sampled ones:
//! - **Interpolation:** Field-wise linear blending of two records
//! - **Bracket Location:** Find the records surrounding a target timestamp
//! - **Resampling:** Drive both over a uniform timestamp grid
//! - **Preparation:** Group raw records by participant and zero-base them
//!
//! This crate is pure computation with no I/O and no shared state.
//! All inputs are data; all outputs are data.

pub mod bracket;
pub mod interpolate;
pub mod prepare;
pub mod resampler;

pub use bracket::{locate_bracket, Bracket};
pub use interpolate::{interpolate_record, lerp, unlerp, ExclusionSet};
pub use prepare::{
    group_by_participant, participant_key, prepare_series, shift_to_zero, ParticipantKey,
    PrepareOptions,
};
pub use resampler::{resample, resample_on_grid, ResampleConfig, Resampler};
