use std::collections::BTreeMap;
use std::path::PathBuf;

use telegrid_record_model::record::{load_records, Record, Series};
use telegrid_resample_core::prepare::{prepare_series, ParticipantKey, PrepareOptions};
use telegrid_resample_core::{locate_bracket, ExclusionSet, Resampler};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("telemetry.json")
}

fn load_fixture_groups() -> BTreeMap<ParticipantKey, Series> {
    let records = load_records(fixture_path()).expect("fixture telemetry should load");
    prepare_series(records, &PrepareOptions::default())
}

#[test]
fn fixture_groups_by_participant_and_zero_bases() {
    let groups = load_fixture_groups();

    assert_eq!(
        groups.keys().cloned().collect::<Vec<_>>(),
        vec!["driver-01".to_string(), "driver-02".to_string()]
    );
    for series in groups.values() {
        assert_eq!(series.len(), 60);
        assert_eq!(series[0].timestamp_ms, 0.0);
        assert!(series
            .windows(2)
            .all(|pair| pair[0].timestamp_ms <= pair[1].timestamp_ms));
    }
}

#[test]
fn fixture_resamples_onto_uniform_grid() {
    let groups = load_fixture_groups();
    let resampler = Resampler::with_defaults();
    let resampled = resampler.resample_groups(&groups).unwrap();

    for (participant, series) in &groups {
        let out = &resampled[participant];
        let span = series.last().unwrap().timestamp_ms;
        assert_eq!(out.len(), (span / 10.0).floor() as usize + 1);

        for (i, record) in out.iter().enumerate() {
            assert_eq!(record.timestamp_ms, i as f64 * 10.0);
            assert_eq!(record.get("id"), series[0].get("id"));
        }
    }
}

#[test]
fn fixture_excluded_fields_follow_left_bracket() {
    let groups = load_fixture_groups();
    let resampler = Resampler::with_defaults();
    let excluded = &resampler.config().excluded_fields;

    for series in groups.values() {
        let out = resampler.resample(series).unwrap();
        for record in &out {
            let bracket = locate_bracket(series, record.timestamp_ms).unwrap();
            for field in excluded.iter() {
                assert_eq!(record.get(field), bracket.left.get(field), "field {field}");
            }
            assert_eq!(record.get("status_flag"), bracket.left.get("status_flag"));
        }
    }
}

#[test]
fn fixture_interpolated_values_stay_within_bracket() {
    let groups = load_fixture_groups();
    let resampler = Resampler::with_defaults();

    for series in groups.values() {
        let out = resampler.resample(series).unwrap();
        for record in &out {
            let bracket = locate_bracket(series, record.timestamp_ms).unwrap();
            for field in ["pos_x", "pos_z", "vel_x", "engine_rpm", "gas"] {
                let value = record.number(field).unwrap();
                let a = bracket.left.number(field).unwrap();
                let b = bracket.right.number(field).unwrap();
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                assert!(
                    value >= lo - 1e-9 && value <= hi + 1e-9,
                    "{field}={value} outside [{lo}, {hi}]"
                );
            }
        }
    }
}

#[test]
fn fixture_original_samples_survive_on_grid_hits() {
    let groups = load_fixture_groups();
    let resampler = Resampler::new(telegrid_resample_core::ResampleConfig {
        period_ms: 1.0,
        excluded_fields: ExclusionSet::from_iter(["id", "gear", "status_flag", "pak_sequence_id"]),
        from_ms: None,
        to_ms: None,
    });

    let series = &groups["driver-01"];
    let out = resampler.resample(series).unwrap();
    let by_time: BTreeMap<i64, &Record> =
        out.iter().map(|r| (r.timestamp_ms as i64, r)).collect();

    // The first sample at each distinct timestamp is reproduced exactly.
    let mut seen = std::collections::HashSet::new();
    for sample in series {
        let ts = sample.timestamp_ms as i64;
        if !seen.insert(ts) {
            continue;
        }
        let hit = by_time[&ts];
        let expected = sample.number("pos_x").unwrap();
        assert!((hit.number("pos_x").unwrap() - expected).abs() < 1e-9);
    }
}
