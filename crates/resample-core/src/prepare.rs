//! Turning a raw telemetry dump into per-participant series.
//!
//! Raw dumps interleave every participant's samples. Before resampling they
//! are grouped by participant, sorted by timestamp, and optionally shifted
//! so each participant's timeline starts at zero.

use std::collections::BTreeMap;

use serde_json::Value;

use telegrid_common::config::ResamplingDefaults;
use telegrid_record_model::record::{Record, Series};

/// Identifier of one participant's series.
pub type ParticipantKey = String;

/// Key used for records that carry no participant identifier.
pub const UNKNOWN_PARTICIPANT: &str = "unknown";

/// How raw records are turned into series.
#[derive(Debug, Clone)]
pub struct PrepareOptions {
    /// Field holding the participant identifier.
    pub participant_field: String,

    /// Shift each series so its first timestamp is zero.
    pub zero_base: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self::from_defaults(&ResamplingDefaults::default())
    }
}

impl PrepareOptions {
    pub fn from_defaults(defaults: &ResamplingDefaults) -> Self {
        Self {
            participant_field: defaults.participant_field.clone(),
            zero_base: defaults.zero_base,
        }
    }
}

/// The participant key of a record.
///
/// Strings are used verbatim, other values by their JSON text.
pub fn participant_key(record: &Record, participant_field: &str) -> ParticipantKey {
    match record.get(participant_field) {
        Some(Value::String(id)) => id.clone(),
        None | Some(Value::Null) => UNKNOWN_PARTICIPANT.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Group records by participant, each group sorted ascending by timestamp.
///
/// The sort is stable, so records sharing a timestamp keep their input order.
pub fn group_by_participant(
    records: Vec<Record>,
    participant_field: &str,
) -> BTreeMap<ParticipantKey, Series> {
    let mut groups: BTreeMap<ParticipantKey, Series> = BTreeMap::new();
    for record in records {
        groups
            .entry(participant_key(&record, participant_field))
            .or_default()
            .push(record);
    }

    for series in groups.values_mut() {
        series.sort_by(|a, b| a.timestamp_ms.total_cmp(&b.timestamp_ms));
    }

    groups
}

/// A copy of `series` with every timestamp reduced by the first one.
pub fn shift_to_zero(series: &[Record]) -> Series {
    let Some(first) = series.first() else {
        return Vec::new();
    };
    let offset = first.timestamp_ms;

    series
        .iter()
        .map(|record| {
            let mut shifted = record.clone();
            shifted.timestamp_ms -= offset;
            shifted
        })
        .collect()
}

/// Group, sort and optionally zero-base a raw dump.
pub fn prepare_series(
    records: Vec<Record>,
    options: &PrepareOptions,
) -> BTreeMap<ParticipantKey, Series> {
    let total = records.len();
    let mut groups = group_by_participant(records, &options.participant_field);

    if options.zero_base {
        for series in groups.values_mut() {
            *series = shift_to_zero(series);
        }
    }

    tracing::info!(
        records = total,
        participants = groups.len(),
        zero_base = options.zero_base,
        "Prepared participant series"
    );

    groups
}
