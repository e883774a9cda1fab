//! Report configuration from environment variables and command-line flags

use crate::aggregator_core::export::ExportFormat;
use crate::aggregator_core::projector::Scenario;
use crate::aggregator_core::stats::DEFAULT_TOP_EMITTERS;
use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(var) => write!(f, "Missing environment variable: {}", var),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration shared by the report binaries
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Dataset to ingest
    pub csv_path: PathBuf,

    /// Entries in the snapshot's top-emitter list
    pub top_emitters_count: usize,

    /// Scenario highlighted in the report
    pub scenario: Scenario,

    /// Countries compared at the latest year
    pub compare_countries: Vec<String>,

    /// File export, if requested
    pub export_format: Option<ExportFormat>,
    pub export_path: Option<PathBuf>,
}

impl ReportConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `CLIMATE_CSV_PATH` (required)
    /// - `TOP_EMITTERS_COUNT` (default: 10)
    /// - `PROJECTION_SCENARIO` (default: current)
    /// - `COMPARE_COUNTRIES` (comma-separated, default: none)
    /// - `EXPORT_FORMAT` (json or csv, default: no export)
    /// - `EXPORT_PATH` (default: exports/observations.<ext>)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Environment first, then `--input`, `--export`, `--output` and
    /// `--scenario` flags from `args` (program name excluded)
    pub fn from_env_and_args(args: &[String]) -> Result<Self, ConfigError> {
        let flags = |key: &str| -> Option<String> {
            let flag = match key {
                "CLIMATE_CSV_PATH" => "--input",
                "EXPORT_FORMAT" => "--export",
                "EXPORT_PATH" => "--output",
                "PROJECTION_SCENARIO" => "--scenario",
                _ => return None,
            };
            flag_value(args, flag)
        };
        Self::from_lookup(|key| flags(key).or_else(|| env::var(key).ok()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let csv_path = lookup("CLIMATE_CSV_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::MissingVariable("CLIMATE_CSV_PATH".to_string()))?;

        let top_emitters_count = match lookup("TOP_EMITTERS_COUNT") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(count) if count >= 1 => count,
                _ => {
                    return Err(ConfigError::InvalidValue(format!(
                        "TOP_EMITTERS_COUNT must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => DEFAULT_TOP_EMITTERS,
        };

        let scenario = match lookup("PROJECTION_SCENARIO") {
            Some(raw) => {
                let scenario = Scenario::from_str(raw.trim());
                if scenario.as_str() != raw.trim() {
                    log::warn!("Invalid PROJECTION_SCENARIO '{}', defaulting to current", raw);
                }
                scenario
            }
            None => Scenario::default(),
        };

        let compare_countries = lookup("COMPARE_COUNTRIES")
            .map(|s| {
                s.split(',')
                    .map(|country| country.trim().to_string())
                    .filter(|country| !country.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let export_format = match lookup("EXPORT_FORMAT") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "json" => Some(ExportFormat::Json),
                "csv" => Some(ExportFormat::Csv),
                _ => {
                    return Err(ConfigError::InvalidValue(format!(
                        "EXPORT_FORMAT must be json or csv, got '{}'",
                        raw
                    )))
                }
            },
            None => None,
        };

        let export_path = export_format.map(|format| {
            lookup("EXPORT_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    let ext = format.extension().unwrap_or("json");
                    PathBuf::from(format!("exports/observations.{}", ext))
                })
        });

        Ok(Self {
            csv_path,
            top_emitters_count,
            scenario,
            compare_countries,
            export_format,
            export_path,
        })
    }
}

/// Value following `flag` in `args`
pub fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Arguments that are neither flags nor flag values
pub fn positional_args(args: &[String]) -> Vec<String> {
    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            positional.push(arg.clone());
        }
    }
    positional
}
