//! Interpolate one participant's telemetry at a single timestamp.

use serde_json::json;

use telegrid_common::config::AppConfig;
use telegrid_resample_core::{locate_bracket, prepare_series};

use super::{exclusion_set, load_input, prepare_options};

/// Options for one `lookup` invocation.
#[derive(Debug, Clone)]
pub struct LookupArgs {
    pub input: String,
    pub at_ms: f64,
    pub participant: Option<String>,
    pub exclude: Vec<String>,
    pub participant_field: Option<String>,
    pub no_zero_base: bool,
}

pub fn run(args: LookupArgs, config: &AppConfig) -> anyhow::Result<()> {
    let records = load_input(&args.input)?;
    let options = prepare_options(config, args.participant_field, args.no_zero_base);
    let groups = prepare_series(records, &options);

    let (participant, series) = match &args.participant {
        Some(id) => groups
            .get_key_value(id)
            .ok_or_else(|| anyhow::anyhow!("Unknown participant: {id}"))?,
        None if groups.len() == 1 => groups
            .iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No participants in input"))?,
        None => {
            let known = groups.keys().cloned().collect::<Vec<_>>().join(", ");
            return Err(anyhow::anyhow!(
                "Input has {} participants, pick one with --participant: {known}",
                groups.len()
            ));
        }
    };

    let bracket = locate_bracket(series, args.at_ms)?;
    let mut record = bracket.interpolate(&exclusion_set(config, &args.exclude));
    record.timestamp_ms = args.at_ms;

    let result = json!({
        "participant": participant,
        "left_ms": bracket.left.timestamp_ms,
        "right_ms": bracket.right.timestamp_ms,
        "t": bracket.t,
        "record": record,
    });
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(participant: Option<&str>, at_ms: f64) -> LookupArgs {
        LookupArgs {
            input: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("../../fixtures/sample-session/telemetry.json")
                .display()
                .to_string(),
            at_ms,
            participant: participant.map(String::from),
            exclude: vec![],
            participant_field: None,
            no_zero_base: false,
        }
    }

    #[test]
    fn test_lookup_known_participant() {
        run(args(Some("driver-02"), 250.0), &AppConfig::default()).unwrap();
    }

    #[test]
    fn test_lookup_needs_participant_when_ambiguous() {
        let err = run(args(None, 250.0), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("driver-01, driver-02"));
    }

    #[test]
    fn test_lookup_unknown_participant() {
        let err = run(args(Some("driver-99"), 0.0), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("driver-99"));
    }

    #[test]
    fn test_lookup_rejects_nan_target() {
        let err = run(args(Some("driver-01"), f64::NAN), &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }
}
