use proptest::prelude::*;

use telegrid_record_model::record::Record;
use telegrid_resample_core::{interpolate_record, locate_bracket, resample, ExclusionSet};

/// Timestamp-sorted series with occasional duplicate timestamps.
fn sorted_series() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((0u32..50, -1000.0f64..1000.0, 1i64..7), 1..40).prop_map(|steps| {
        let mut timestamp = 0.0;
        steps
            .into_iter()
            .map(|(gap, value, gear)| {
                timestamp += gap as f64;
                Record::new(timestamp)
                    .with_field("v", value)
                    .with_field("gear", gear)
                    .with_field("id", "car")
            })
            .collect()
    })
}

/// Series already sampled every `period` milliseconds from zero.
fn uniform_series() -> impl Strategy<Value = (Vec<Record>, u32)> {
    (
        prop::collection::vec(-1000.0f64..1000.0, 1..40),
        1u32..100,
    )
        .prop_map(|(values, period)| {
            let series = values
                .into_iter()
                .enumerate()
                .map(|(i, v)| Record::new(i as f64 * period as f64).with_field("v", v))
                .collect();
            (series, period)
        })
}

fn span(series: &[Record]) -> (f64, f64) {
    (
        series.first().unwrap().timestamp_ms,
        series.last().unwrap().timestamp_ms,
    )
}

proptest! {
    #[test]
    fn bracket_selection_is_monotonic(
        series in sorted_series(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let (first, last) = span(&series);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let t0 = first + (last - first) * lo;
        let t1 = first + (last - first) * hi;

        let r0 = locate_bracket(&series, t0).unwrap().right.timestamp_ms;
        let r1 = locate_bracket(&series, t1).unwrap().right.timestamp_ms;
        prop_assert!(r0 <= r1);
    }

    #[test]
    fn targets_outside_span_clamp(series in sorted_series(), offset in 0.0f64..500.0) {
        let (first_ts, last_ts) = span(&series);
        let first = &series[0];
        let last = &series[series.len() - 1];

        let before = locate_bracket(&series, first_ts - offset).unwrap();
        prop_assert!(std::ptr::eq(before.left, first));
        prop_assert!(std::ptr::eq(before.right, first));
        prop_assert_eq!(before.t, 0.0);

        // With every timestamp equal the left clamp wins.
        if last_ts > first_ts {
            let after = locate_bracket(&series, last_ts + offset).unwrap();
            prop_assert!(std::ptr::eq(after.left, last));
            prop_assert!(std::ptr::eq(after.right, last));
            prop_assert_eq!(after.t, 1.0);
        }
    }

    #[test]
    fn interior_fraction_stays_in_unit_range(series in sorted_series(), a in 0.0f64..=1.0) {
        let (first, last) = span(&series);
        let bracket = locate_bracket(&series, first + (last - first) * a).unwrap();
        prop_assert!((0.0..=1.0).contains(&bracket.t));
    }

    #[test]
    fn interpolation_endpoints_reproduce_operands(
        va in -1000.0f64..1000.0,
        vb in -1000.0f64..1000.0,
        gear_a in 1i64..7,
        gear_b in 1i64..7,
    ) {
        let a = Record::new(0.0)
            .with_field("v", va)
            .with_field("gear", gear_a)
            .with_field("id", "a");
        let b = Record::new(10.0)
            .with_field("v", vb)
            .with_field("gear", gear_b)
            .with_field("id", "b");
        let excluded: ExclusionSet = ["gear"].into_iter().collect();

        let at_start = interpolate_record(&a, &b, 0.0, &excluded);
        prop_assert_eq!(at_start.number("v").unwrap(), va);

        let at_end = interpolate_record(&a, &b, 1.0, &excluded);
        prop_assert!((at_end.number("v").unwrap() - vb).abs() < 1e-9);
        prop_assert_eq!(at_end.number("gear"), Some(gear_a as f64));
        prop_assert_eq!(at_end.get("id"), a.get("id"));
    }

    #[test]
    fn resampling_uniform_series_is_idempotent((series, period) in uniform_series()) {
        let (first, last) = span(&series);
        let out = resample(&series, first, last, period as f64, &ExclusionSet::new()).unwrap();

        prop_assert_eq!(out.len(), series.len());
        for (got, want) in out.iter().zip(&series) {
            prop_assert_eq!(got.timestamp_ms, want.timestamp_ms);
            let diff = got.number("v").unwrap() - want.number("v").unwrap();
            prop_assert!(diff.abs() < 1e-9);
        }
    }

    #[test]
    fn fixed_grid_length_is_independent_of_series(series in sorted_series()) {
        let out = resample(&series, 0.0, 100.0, 10.0, &ExclusionSet::new()).unwrap();
        prop_assert_eq!(out.len(), 11);
    }

    #[test]
    fn excluded_fields_copy_left_bracket(series in sorted_series(), period in 1u32..40) {
        let excluded: ExclusionSet = ["gear", "id"].into_iter().collect();
        let (first, last) = span(&series);
        let out = resample(&series, first, last, period as f64, &excluded).unwrap();

        for record in &out {
            let bracket = locate_bracket(&series, record.timestamp_ms).unwrap();
            prop_assert_eq!(record.get("gear"), bracket.left.get("gear"));
            prop_assert_eq!(record.get("id"), bracket.left.get("id"));
        }
    }

    #[test]
    fn grid_timestamps_step_by_period(
        series in sorted_series(),
        from in 0u32..100,
        len in 0u32..200,
        period in 1u32..30,
    ) {
        let to = from + len;
        let out = resample(&series, from as f64, to as f64, period as f64, &ExclusionSet::new())
            .unwrap();
        prop_assert_eq!(out.len(), (len / period) as usize + 1);
        for (i, record) in out.iter().enumerate() {
            prop_assert_eq!(record.timestamp_ms, from as f64 + i as f64 * period as f64);
        }
    }
}
