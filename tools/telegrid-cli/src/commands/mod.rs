//! Subcommand implementations and the option plumbing they share.

use telegrid_common::config::AppConfig;
use telegrid_record_model::record::{load_records, normalize_path_arg, Record};
use telegrid_resample_core::{ExclusionSet, PrepareOptions};

pub mod info;
pub mod lookup;
pub mod resample;

/// Load a telemetry dump from a (possibly quoted) path argument.
fn load_input(raw_path: &str) -> anyhow::Result<Vec<Record>> {
    let path = normalize_path_arg(raw_path);
    load_records(&path).map_err(|e| anyhow::anyhow!("Failed to load telemetry: {e}"))
}

/// Grouping options: config defaults overridden by command-line flags.
fn prepare_options(
    config: &AppConfig,
    participant_field: Option<String>,
    no_zero_base: bool,
) -> PrepareOptions {
    let mut options = PrepareOptions::from_defaults(&config.resampling);
    if let Some(field) = participant_field {
        options.participant_field = field;
    }
    if no_zero_base {
        options.zero_base = false;
    }
    options
}

/// Exclusion set: the configured one unless fields were given explicitly.
fn exclusion_set(config: &AppConfig, exclude: &[String]) -> ExclusionSet {
    if exclude.is_empty() {
        config.resampling.excluded_fields.iter().cloned().collect()
    } else {
        exclude.iter().cloned().collect()
    }
}
