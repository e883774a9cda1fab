//! JSON file writer for exported observations

use super::export::to_json;
use super::normalizer::Observation;
use super::writer_backend::{ExportBackend, ExportError};
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct JsonExportWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonExportWriter {
    pub fn new(path: PathBuf) -> std::io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;

        log::info!("📝 Writing JSON export to: {}", path.display());
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn write_observations(&mut self, observations: &[Observation]) -> Result<(), ExportError> {
        let json = to_json(observations)?;
        writeln!(self.writer, "{}", json)?;
        log::debug!("Wrote {} observations to {}", observations.len(), self.path.display());
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for JsonExportWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[async_trait]
impl ExportBackend for JsonExportWriter {
    async fn write_observations(&mut self, observations: &[Observation]) -> Result<(), ExportError> {
        JsonExportWriter::write_observations(self, observations)
    }

    async fn flush(&mut self) -> Result<(), ExportError> {
        JsonExportWriter::flush(self)?;
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "JSON"
    }
}
