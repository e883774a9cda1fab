//! CSV file writer for exported observations

use super::normalizer::Observation;
use super::writer_backend::{ExportBackend, ExportError};
use async_trait::async_trait;
use std::fs::File;
use std::path::PathBuf;

pub struct CsvExportWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows_written: usize,
}

impl CsvExportWriter {
    pub fn new(path: PathBuf) -> Result<Self, ExportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let writer = csv::Writer::from_path(&path)?;

        log::info!("📝 Writing CSV export to: {}", path.display());
        Ok(Self {
            path,
            writer,
            rows_written: 0,
        })
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}

#[async_trait]
impl ExportBackend for CsvExportWriter {
    async fn write_observations(&mut self, observations: &[Observation]) -> Result<(), ExportError> {
        for obs in observations {
            self.writer.serialize(obs)?;
            self.rows_written += 1;
        }

        log::debug!(
            "✅ CSV export rows written: {} ({})",
            self.rows_written,
            self.path.display()
        );
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), ExportError> {
        self.writer.flush()?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "CSV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_csv_file_export() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("observations.csv");
        let data = vec![
            Observation {
                year: 2019,
                country: "Chile".to_string(),
                total_co2: 80.0,
                ..Default::default()
            },
            Observation {
                year: 2020,
                country: "Chile".to_string(),
                total_co2: 82.5,
                ..Default::default()
            },
        ];

        let mut writer = CsvExportWriter::new(path.clone()).unwrap();
        writer.write_observations(&data).await.unwrap();
        writer.flush().await.unwrap();
        assert_eq!(writer.rows_written(), 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.lines().nth(2).unwrap().starts_with("2020,Chile,,82.5"));
    }
}
