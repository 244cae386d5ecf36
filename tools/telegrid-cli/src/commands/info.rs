//! Show what a telemetry dump contains.

use std::collections::BTreeSet;

use telegrid_common::config::AppConfig;
use telegrid_record_model::record::Series;
use telegrid_resample_core::group_by_participant;

use super::load_input;

pub fn run(input: String, participant_field: Option<String>, config: &AppConfig) -> anyhow::Result<()> {
    let records = load_input(&input)?;
    let field = participant_field.unwrap_or_else(|| config.resampling.participant_field.clone());

    let fields: BTreeSet<String> = records
        .iter()
        .flat_map(|r| r.field_names().map(String::from))
        .collect();
    let total = records.len();
    let groups = group_by_participant(records, &field);

    println!("Telemetry: {input}");
    println!("  Records: {total}");
    println!("  Participants ({field}): {}", groups.len());
    println!();

    for (participant, series) in &groups {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first.timestamp_ms, last.timestamp_ms),
            _ => continue,
        };
        println!("{participant}:");
        println!("  Records: {}", series.len());
        println!("  Span: {first} .. {last} ({:.1}s)", (last - first) / 1000.0);
        if let Some(median) = median_interval_ms(series) {
            println!("  Median interval: {median:.1}ms");
        }
    }
    println!();

    println!("Fields:");
    for name in &fields {
        println!("  {name}");
    }

    Ok(())
}

/// Median gap between consecutive samples of a sorted series.
fn median_interval_ms(series: &Series) -> Option<f64> {
    let mut gaps: Vec<f64> = series
        .windows(2)
        .map(|pair| pair[1].timestamp_ms - pair[0].timestamp_ms)
        .collect();
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_by(f64::total_cmp);
    Some(gaps[gaps.len() / 2])
}
