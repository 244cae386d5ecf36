//! telegrid CLI: command-line interface for resampling telemetry dumps.
//!
//! Usage:
//!   telegrid resample <INPUT> [OPTIONS]   Resample every participant onto a uniform grid
//!   telegrid lookup <INPUT> --at <MS>     Interpolate one participant at one timestamp
//!   telegrid info <INPUT>                 Show participants, spans, and fields

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use telegrid_common::config::AppConfig;
use telegrid_record_model::frame::FrameView;

mod commands;

#[derive(Parser)]
#[command(
    name = "telegrid",
    about = "Uniform resampling of irregular participant telemetry",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resample every participant in a telemetry dump
    Resample {
        /// Path to the raw telemetry JSON (array or JSONL)
        input: String,

        /// Grid start in milliseconds (defaults to each series' first sample)
        #[arg(long)]
        from: Option<f64>,

        /// Grid end in milliseconds (defaults to each series' last sample)
        #[arg(long)]
        to: Option<f64>,

        /// Grid period in milliseconds
        #[arg(long)]
        period: Option<f64>,

        /// Field to copy instead of interpolate (repeatable; replaces the configured set)
        #[arg(long = "exclude", value_name = "FIELD")]
        exclude: Vec<String>,

        /// Field identifying the participant of each record
        #[arg(long)]
        participant_field: Option<String>,

        /// Keep original timestamps instead of starting each series at zero
        #[arg(long)]
        no_zero_base: bool,

        /// Output view: raw|event|telemetry|snapshot
        #[arg(long, default_value = "raw")]
        view: FrameView,

        /// Output directory (defaults to the configured output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Interpolate one participant at a single timestamp
    Lookup {
        /// Path to the raw telemetry JSON (array or JSONL)
        input: String,

        /// Target timestamp in milliseconds
        #[arg(long)]
        at: f64,

        /// Participant to query (required when the dump has several)
        #[arg(long)]
        participant: Option<String>,

        /// Field to copy instead of interpolate (repeatable; replaces the configured set)
        #[arg(long = "exclude", value_name = "FIELD")]
        exclude: Vec<String>,

        /// Field identifying the participant of each record
        #[arg(long)]
        participant_field: Option<String>,

        /// Keep original timestamps instead of starting each series at zero
        #[arg(long)]
        no_zero_base: bool,
    },

    /// Show participants, record counts, time spans, and fields
    Info {
        /// Path to the raw telemetry JSON (array or JSONL)
        input: String,

        /// Field identifying the participant of each record
        #[arg(long)]
        participant_field: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    telegrid_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Resample {
            input,
            from,
            to,
            period,
            exclude,
            participant_field,
            no_zero_base,
            view,
            output,
            stdout,
        } => {
            commands::resample::run(
                commands::resample::ResampleArgs {
                    input,
                    from_ms: from,
                    to_ms: to,
                    period_ms: period,
                    exclude,
                    participant_field,
                    no_zero_base,
                    view,
                    output,
                    stdout,
                },
                &config,
            )
            .await
        }
        Commands::Lookup {
            input,
            at,
            participant,
            exclude,
            participant_field,
            no_zero_base,
        } => commands::lookup::run(
            commands::lookup::LookupArgs {
                input,
                at_ms: at,
                participant,
                exclude,
                participant_field,
                no_zero_base,
            },
            &config,
        ),
        Commands::Info {
            input,
            participant_field,
        } => commands::info::run(input, participant_field, &config),
    }
}
