//! Unified writer interface for file exports
//!
//! Routes writes to either the JSON or the CSV backend based on the requested format.

use super::csv_writer::CsvExportWriter;
use super::export::ExportFormat;
use super::json_writer::JsonExportWriter;
use super::normalizer::Observation;
use super::writer_backend::{ExportBackend, ExportError};
use std::path::PathBuf;

/// Unified writer that routes to either JSON or CSV backend
pub enum ExportWriter {
    Json(JsonExportWriter),
    Csv(CsvExportWriter),
}

impl ExportWriter {
    /// Create a file writer for `format`
    ///
    /// Raw exports have no file form and fall back to JSON.
    pub fn new(format: ExportFormat, path: PathBuf) -> Result<Self, ExportError> {
        match format {
            ExportFormat::Csv => Ok(ExportWriter::Csv(CsvExportWriter::new(path)?)),
            ExportFormat::Json | ExportFormat::Raw => Ok(ExportWriter::Json(JsonExportWriter::new(path)?)),
        }
    }

    /// Write the observation list to the configured backend
    pub async fn write_observations(&mut self, observations: &[Observation]) -> Result<(), ExportError> {
        match self {
            ExportWriter::Json(w) => w.write_observations(observations),
            ExportWriter::Csv(w) => ExportBackend::write_observations(w, observations).await,
        }
    }

    /// Flush pending writes to storage
    pub async fn flush(&mut self) -> Result<(), ExportError> {
        match self {
            ExportWriter::Json(w) => {
                w.flush()?;
                Ok(())
            }
            ExportWriter::Csv(w) => ExportBackend::flush(w).await,
        }
    }

    /// Get backend type for logging
    pub fn backend_type(&self) -> &'static str {
        match self {
            ExportWriter::Json(w) => w.backend_type(),
            ExportWriter::Csv(w) => w.backend_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_by_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data = vec![Observation {
            year: 2020,
            country: "Peru".to_string(),
            total_co2: 1.0,
            ..Default::default()
        }];

        let mut csv = ExportWriter::new(ExportFormat::Csv, temp_dir.path().join("a.csv")).unwrap();
        assert_eq!(csv.backend_type(), "CSV");
        csv.write_observations(&data).await.unwrap();
        csv.flush().await.unwrap();

        let mut json = ExportWriter::new(ExportFormat::Raw, temp_dir.path().join("a.json")).unwrap();
        assert_eq!(json.backend_type(), "JSON");
        json.write_observations(&data).await.unwrap();
        json.flush().await.unwrap();

        assert!(std::fs::read_to_string(temp_dir.path().join("a.csv"))
            .unwrap()
            .starts_with("year,country"));
        assert!(std::fs::read_to_string(temp_dir.path().join("a.json"))
            .unwrap()
            .starts_with('['));
    }
}
