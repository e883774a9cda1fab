//! In-memory export of the processed observation list

use super::normalizer::Observation;
use super::writer_backend::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    /// The observation structures themselves
    Raw,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Raw => "raw",
        }
    }

    /// Case-insensitive; anything other than json/csv means raw
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => ExportFormat::Json,
            "csv" => ExportFormat::Csv,
            _ => ExportFormat::Raw,
        }
    }

    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ExportFormat::Json => Some("json"),
            ExportFormat::Csv => Some("csv"),
            ExportFormat::Raw => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportedData {
    Json(String),
    Csv(String),
    Raw(Vec<Observation>),
}

impl ExportedData {
    /// Text form, `None` for raw exports
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ExportedData::Json(text) | ExportedData::Csv(text) => Some(text),
            ExportedData::Raw(_) => None,
        }
    }
}

/// Pretty JSON array, two-space indented
pub fn to_json(observations: &[Observation]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(observations)?)
}

/// CSV with a header row of observation field names
pub fn to_csv(observations: &[Observation]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for obs in observations {
        writer.serialize(obs)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn export_observations(observations: &[Observation], format: ExportFormat) -> Result<ExportedData, ExportError> {
    match format {
        ExportFormat::Json => Ok(ExportedData::Json(to_json(observations)?)),
        ExportFormat::Csv => Ok(ExportedData::Csv(to_csv(observations)?)),
        ExportFormat::Raw => Ok(ExportedData::Raw(observations.to_vec())),
    }
}
