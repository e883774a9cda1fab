//! Aggregator Core - Climate Dataset Analytics Engine
//!
//! This module turns a country-year emissions dataset into queryable
//! snapshots, trends, comparisons and projections.
//!
//! # Architecture
//!
//! ```text
//! CSV file → reader (RawTable) → normalizer (Observation)
//!     ↓
//! Catalog (distinct countries + years)
//!     ↓
//! StatsEngine (latest-year GlobalSnapshot) + TrendBuilder (per-year YearTrend)
//!     ↓
//! ClimateCoordinator (queries, GrowthProjector scenarios)
//!     ↓
//! ExportWriter → JSON or CSV backend
//! ```

pub mod aggregator;
pub mod catalog;
pub mod coordinator;
pub mod export;
pub mod normalizer;
pub mod projector;
pub mod query;
pub mod reader;
pub mod stats;
pub mod trend;
pub mod writer_backend;
pub mod json_writer;
pub mod csv_writer;
pub mod writer;

pub use aggregator::ObservationField;
pub use catalog::{Catalog, YearRange};
pub use coordinator::{ClimateCoordinator, DataSummary, IngestSummary, SharedCoordinator};
pub use export::{ExportFormat, ExportedData};
pub use normalizer::Observation;
pub use projector::{GrowthProjector, ProjectionPoint, Scenario};
pub use query::{CountryComparison, CountryRankings, CountryStats, EmissionsTemperaturePoint, Rank};
pub use reader::{IngestError, RawTable};
pub use stats::{EmissionSource, EnergySource, GlobalSnapshot, StatsEngine, TopEmitter, YearTrend};
pub use trend::{TrendBuilder, TrendTable};
pub use writer_backend::{ExportBackend, ExportError};
pub use json_writer::JsonExportWriter;
pub use csv_writer::CsvExportWriter;
pub use writer::ExportWriter;
