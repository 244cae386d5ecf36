//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where resampled output is written when none is given.
    pub output_dir: PathBuf,

    /// Default resampling settings.
    pub resampling: ResamplingDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default resampling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResamplingDefaults {
    /// Grid period in milliseconds.
    pub period_ms: f64,

    /// Fields that are copied from the left bracket instead of interpolated.
    pub excluded_fields: Vec<String>,

    /// Field used to split raw records into per-participant series.
    pub participant_field: String,

    /// Whether each participant's timeline is shifted to start at zero.
    pub zero_base: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "telegrid=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("resampled"),
            resampling: ResamplingDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ResamplingDefaults {
    fn default() -> Self {
        Self {
            period_ms: 10.0,
            excluded_fields: ["id", "gear", "status_flag", "pak_sequence_id"]
                .into_iter()
                .map(String::from)
                .collect(),
            participant_field: "id".to_string(),
            zero_base: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("telegrid").join("config.json")
}
