//! Ingestion coordinator - owns the observation list and everything derived from it
//!
//! Each ingestion rebuilds the catalog, snapshot and trend table from scratch
//! and commits them together. Queries are pure reads over the committed state.

use super::aggregator::ObservationField;
use super::catalog::{Catalog, YearRange};
use super::export::{export_observations, ExportFormat, ExportedData};
use super::normalizer::Observation;
use super::projector::{GrowthProjector, ProjectionPoint, Scenario};
use super::query::{self, CountryComparison, CountryRankings, CountryStats, EmissionsTemperaturePoint};
use super::reader::{parse_csv, read_csv_file, IngestError, RawTable};
use super::stats::{GlobalSnapshot, StatsEngine};
use super::trend::{TrendBuilder, TrendTable};
use super::writer_backend::ExportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};

/// Result of a successful ingestion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
    /// Raw rows read, before filtering
    pub row_count: usize,
    pub observation_count: usize,
    pub rejected_rows: usize,
    pub country_count: usize,
    pub year_range: YearRange,
    pub global_stats: Option<GlobalSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSummary {
    pub is_loaded: bool,
    pub total_records: usize,
    pub countries: usize,
    pub years: usize,
    pub year_range: YearRange,
    pub global_stats: Option<GlobalSnapshot>,
    pub loaded_at: Option<DateTime<Utc>>,
}

pub struct ClimateCoordinator {
    observations: Vec<Observation>,
    catalog: Catalog,
    global_stats: Option<GlobalSnapshot>,
    trends: TrendTable,
    is_loaded: bool,
    loaded_at: Option<DateTime<Utc>>,
    stats_engine: StatsEngine,
    projector: GrowthProjector,
}

impl ClimateCoordinator {
    pub fn new() -> Self {
        Self::with_engines(StatsEngine::with_defaults(), GrowthProjector::with_defaults())
    }

    pub fn with_engines(stats_engine: StatsEngine, projector: GrowthProjector) -> Self {
        Self {
            observations: Vec::new(),
            catalog: Catalog::default(),
            global_stats: None,
            trends: TrendTable::new(),
            is_loaded: false,
            loaded_at: None,
            stats_engine,
            projector,
        }
    }

    /// Read, parse and process a dataset file
    ///
    /// Nothing is committed when reading or parsing fails.
    pub async fn ingest_file(&mut self, path: &Path) -> Result<IngestSummary, IngestError> {
        let table = read_csv_file(path).await?;
        Ok(self.ingest_table(table))
    }

    pub fn ingest_reader<R: Read>(&mut self, reader: R) -> Result<IngestSummary, IngestError> {
        let table = parse_csv(reader)?;
        Ok(self.ingest_table(table))
    }

    /// Normalize and aggregate a parsed table, replacing all previous state
    pub fn ingest_table(&mut self, table: RawTable) -> IngestSummary {
        let row_count = table.row_count();
        let observations = table.normalize();
        let catalog = Catalog::build(&observations);
        let global_stats = self.stats_engine.snapshot(&observations, &catalog);
        let trends = TrendBuilder::new(&self.stats_engine).build(&observations, &catalog);

        let summary = IngestSummary {
            row_count,
            observation_count: observations.len(),
            rejected_rows: row_count - observations.len(),
            country_count: catalog.countries.len(),
            year_range: catalog.year_range(),
            global_stats: global_stats.clone(),
        };

        self.observations = observations;
        self.catalog = catalog;
        self.global_stats = global_stats;
        self.trends = trends;
        self.is_loaded = true;
        self.loaded_at = Some(Utc::now());

        log::info!(
            "✅ Ingested {} observations from {} rows ({} rejected, {} countries, {}-{})",
            summary.observation_count,
            summary.row_count,
            summary.rejected_rows,
            summary.country_count,
            summary.year_range.min,
            summary.year_range.max
        );
        summary
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn global_stats(&self) -> Option<&GlobalSnapshot> {
        self.global_stats.as_ref()
    }

    pub fn year_range(&self) -> YearRange {
        self.catalog.year_range()
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn data_by_year(&self, year: i32) -> Vec<&Observation> {
        query::by_year(&self.observations, year)
    }

    pub fn data_by_country(&self, country: &str) -> Vec<&Observation> {
        query::by_country(&self.observations, country)
    }

    pub fn data_by_year_range(&self, start: i32, end: i32) -> Vec<&Observation> {
        query::by_year_range(&self.observations, start, end)
    }

    pub fn country_time_series(&self, country: &str) -> Vec<&Observation> {
        query::country_time_series(&self.observations, country)
    }

    pub fn global_trends(&self) -> &TrendTable {
        &self.trends
    }

    pub fn compare_countries<S: AsRef<str>>(&self, countries: &[S], metric: ObservationField) -> Vec<CountryComparison> {
        query::compare_countries(&self.observations, &self.catalog, countries, metric)
    }

    pub fn emissions_temperature_series(&self) -> Vec<EmissionsTemperaturePoint> {
        query::emissions_temperature_series(&self.observations, &self.catalog)
    }

    pub fn generate_projection(&self, scenario: Scenario) -> Vec<ProjectionPoint> {
        self.projector.project(&self.trends, scenario)
    }

    pub fn search_countries(&self, query: &str) -> Vec<&str> {
        query::search_countries(&self.catalog, query)
    }

    pub fn country_stats(&self, country: &str) -> Option<CountryStats> {
        query::country_stats(&self.observations, &self.catalog, country)
    }

    pub fn country_rankings(&self, country: &str) -> CountryRankings {
        query::country_rankings(&self.observations, &self.catalog, country)
    }

    pub fn export_data(&self, format: ExportFormat) -> Result<ExportedData, ExportError> {
        export_observations(&self.observations, format)
    }

    pub fn data_summary(&self) -> DataSummary {
        DataSummary {
            is_loaded: self.is_loaded,
            total_records: self.observations.len(),
            countries: self.catalog.countries.len(),
            years: self.catalog.years.len(),
            year_range: self.catalog.year_range(),
            global_stats: self.global_stats.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

impl Default for ClimateCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Coordinator shared across tasks
///
/// One ingestion may be in flight at a time; a second one is rejected with
/// `IngestError::IngestionInProgress`. Readers share the lock.
#[derive(Clone)]
pub struct SharedCoordinator {
    inner: Arc<RwLock<ClimateCoordinator>>,
    ingesting: Arc<AtomicBool>,
}

/// Clears the in-flight flag however the ingestion ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SharedCoordinator {
    pub fn new(coordinator: ClimateCoordinator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(coordinator)),
            ingesting: Arc::new(AtomicBool::new(false)),
        }
    }

    fn begin_ingestion(&self) -> Result<InFlight<'_>, IngestError> {
        if self
            .ingesting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("⏳ Rejecting ingestion request: another ingestion is running");
            return Err(IngestError::IngestionInProgress);
        }
        Ok(InFlight(&self.ingesting))
    }

    /// Read the file without holding the lock, then commit under the write lock
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestSummary, IngestError> {
        let _in_flight = self.begin_ingestion()?;
        let table = read_csv_file(path).await?;
        let mut coordinator = self.inner.write().await;
        Ok(coordinator.ingest_table(table))
    }

    pub async fn ingest_table(&self, table: RawTable) -> Result<IngestSummary, IngestError> {
        let _in_flight = self.begin_ingestion()?;
        let mut coordinator = self.inner.write().await;
        Ok(coordinator.ingest_table(table))
    }

    pub fn is_ingesting(&self) -> bool {
        self.ingesting.load(Ordering::Acquire)
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, ClimateCoordinator> {
        self.inner.read().await
    }
}
