//! Delimited-text reader producing raw records for normalization
//!
//! Reading the file is the single suspend point of an ingestion. Parsing
//! happens in one pass afterwards; a parse failure aborts the whole batch.

use super::normalizer::{normalize_row, ColumnMap, Observation, RawRow};
use csv::StringRecord;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum IngestError {
    Io(std::io::Error),
    Csv(csv::Error),
    IngestionInProgress,
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err)
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Csv(err)
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Io(e) => write!(f, "IO error: {}", e),
            IngestError::Csv(e) => write!(f, "CSV parse error: {}", e),
            IngestError::IngestionInProgress => write!(f, "Another ingestion is already running"),
        }
    }
}

impl std::error::Error for IngestError {}

/// Parsed header plus every non-blank record, before normalization
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: ColumnMap,
    pub records: Vec<StringRecord>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Normalize every record, dropping the ones that fail the row filter
    pub fn normalize(&self) -> Vec<Observation> {
        self.records
            .iter()
            .filter_map(|record| {
                let row = RawRow::new(&self.columns, record);
                let obs = normalize_row(&row);
                if obs.is_none() {
                    log::debug!("Skipping incomplete row: {:?}", record);
                }
                obs
            })
            .collect()
    }
}

/// Parse CSV text with a header row
///
/// Ragged rows are accepted; missing trailing cells read as absent.
pub fn parse_csv<R: Read>(reader: R) -> Result<RawTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = ColumnMap::from_headers(&headers);
    for field in columns.missing_required() {
        log::warn!("⚠️  Required column missing from header: {}", field.header());
    }

    // Blank lines never reach here; delimiter-only rows count as rows
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;

    Ok(RawTable { columns, records })
}

/// Read a dataset file and parse it
pub async fn read_csv_file(path: &Path) -> Result<RawTable, IngestError> {
    let bytes = tokio::fs::read(path).await?;
    log::info!("📖 Read {} bytes from {}", bytes.len(), path.display());
    parse_csv(bytes.as_slice())
}
