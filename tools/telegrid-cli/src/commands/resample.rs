//! Resample every participant in a telemetry dump.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use telegrid_common::clock::wall_clock_now;
use telegrid_common::config::AppConfig;
use telegrid_record_model::frame::{map_frames, FrameView};
use telegrid_record_model::record::normalize_path_arg;
use telegrid_resample_core::{prepare_series, ParticipantKey, ResampleConfig, Resampler};

use super::{exclusion_set, load_input, prepare_options};

/// Stem of the manifest file; no participant file may use it.
const MANIFEST_STEM: &str = "manifest";

/// Options for one `resample` invocation.
#[derive(Debug, Clone)]
pub struct ResampleArgs {
    pub input: String,
    pub from_ms: Option<f64>,
    pub to_ms: Option<f64>,
    pub period_ms: Option<f64>,
    pub exclude: Vec<String>,
    pub participant_field: Option<String>,
    pub no_zero_base: bool,
    pub view: FrameView,
    pub output: Option<PathBuf>,
    pub stdout: bool,
}

/// Summary written next to the per-participant output files.
#[derive(Debug, Serialize)]
struct Manifest {
    generated_at: String,
    input: PathBuf,
    view: String,
    period_ms: f64,
    from_ms: Option<f64>,
    to_ms: Option<f64>,
    excluded_fields: Vec<String>,
    participant_field: String,
    zero_base: bool,
    participants: BTreeMap<ParticipantKey, ParticipantSummary>,
}

#[derive(Debug, Serialize)]
struct ParticipantSummary {
    file: String,
    input_records: usize,
    output_frames: usize,
}

pub async fn run(args: ResampleArgs, config: &AppConfig) -> anyhow::Result<()> {
    let input = normalize_path_arg(&args.input);
    let records = load_input(&args.input)?;
    tracing::info!(records = records.len(), input = %input.display(), "Loaded telemetry");

    let options = prepare_options(config, args.participant_field.clone(), args.no_zero_base);
    let groups = prepare_series(records, &options);

    let mut resample_config = ResampleConfig::from_defaults(&config.resampling);
    if let Some(period_ms) = args.period_ms {
        resample_config.period_ms = period_ms;
    }
    resample_config.excluded_fields = exclusion_set(config, &args.exclude);
    resample_config.from_ms = args.from_ms;
    resample_config.to_ms = args.to_ms;

    let resampler = Resampler::new(resample_config);
    let resampled = resampler.resample_groups(&groups)?;

    let mut frames: BTreeMap<ParticipantKey, Vec<Value>> = BTreeMap::new();
    for (participant, series) in &resampled {
        frames.insert(
            participant.clone(),
            map_frames(series, args.view, participant)?,
        );
    }

    if args.stdout {
        println!("{}", serde_json::to_string_pretty(&frames)?);
        return Ok(());
    }

    let output_dir = args.output.unwrap_or_else(|| config.output_dir.clone());
    println!("Resampling {}", input.display());
    println!(
        "  Period: {}ms, view: {}, participants: {}",
        resampler.config().period_ms,
        args.view,
        frames.len()
    );

    let file_names = assign_file_names(frames.keys());
    let manifest = Manifest {
        generated_at: wall_clock_now(),
        input: input.clone(),
        view: args.view.to_string(),
        period_ms: resampler.config().period_ms,
        from_ms: args.from_ms,
        to_ms: args.to_ms,
        excluded_fields: resampler
            .config()
            .excluded_fields
            .iter()
            .map(String::from)
            .collect(),
        participant_field: options.participant_field.clone(),
        zero_base: options.zero_base,
        participants: groups
            .iter()
            .map(|(participant, series)| {
                let summary = ParticipantSummary {
                    file: file_names.get(participant).cloned().unwrap_or_default(),
                    input_records: series.len(),
                    output_frames: frames.get(participant).map_or(0, Vec::len),
                };
                (participant.clone(), summary)
            })
            .collect(),
    };

    write_output(&output_dir, &frames, &file_names, &manifest).await?;
    println!("\nOutput written to: {}", output_dir.display());

    Ok(())
}

async fn write_output(
    output_dir: &Path,
    frames: &BTreeMap<ParticipantKey, Vec<Value>>,
    file_names: &BTreeMap<ParticipantKey, String>,
    manifest: &Manifest,
) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", output_dir.display()))?;

    for (participant, participant_frames) in frames {
        let Some(file_name) = file_names.get(participant) else {
            return Err(anyhow::anyhow!("No output file assigned to {participant}"));
        };
        let path = output_dir.join(file_name);
        let json = serde_json::to_string_pretty(participant_frames)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
        println!("  {participant}: {} frames -> {}", participant_frames.len(), path.display());
    }

    let manifest_path = output_dir.join(format!("{MANIFEST_STEM}.json"));
    tokio::fs::write(&manifest_path, serde_json::to_string_pretty(manifest)?)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", manifest_path.display()))?;

    Ok(())
}

/// Characters of a participant key that are safe in a file name.
fn file_stem(participant: &str) -> String {
    participant
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Give every participant its own output file.
///
/// Keys that sanitize to the same stem (compared case-insensitively), or to
/// the manifest's stem, get a numeric suffix.
fn assign_file_names<'a>(
    participants: impl IntoIterator<Item = &'a ParticipantKey>,
) -> BTreeMap<ParticipantKey, String> {
    let mut taken: BTreeSet<String> = BTreeSet::from([MANIFEST_STEM.to_string()]);
    let mut names = BTreeMap::new();

    for participant in participants {
        let stem = file_stem(participant);
        let mut candidate = stem.clone();
        let mut suffix = 2;
        while !taken.insert(candidate.to_ascii_lowercase()) {
            candidate = format!("{stem}-{suffix}");
            suffix += 1;
        }
        if candidate != stem {
            tracing::warn!(
                participant = %participant,
                file = %candidate,
                "Output file name collides, using a suffixed name"
            );
        }
        names.insert(participant.clone(), format!("{candidate}.json"));
    }

    names
}
