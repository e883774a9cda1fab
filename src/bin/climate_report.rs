//! Climate Report Binary - Dataset Snapshot, Trends and Projections
//!
//! Ingests a country-year emissions dataset and logs the global snapshot,
//! the per-year trend table, projections for every scenario and the
//! configured country comparison. Optionally exports the processed data.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin climate_report -- --input data/climate.csv --export json
//! ```
//!
//! ## Environment Variables
//!
//! - CLIMATE_CSV_PATH - Dataset to ingest (required unless --input is given)
//! - TOP_EMITTERS_COUNT - Entries in the top-emitter list (default: 10)
//! - PROJECTION_SCENARIO - Scenario shown in detail (default: current)
//! - COMPARE_COUNTRIES - Comma-separated countries to compare (optional)
//! - EXPORT_FORMAT - json or csv (optional, --export)
//! - EXPORT_PATH - Export target (default: exports/observations.<ext>, --output)
//! - RUST_LOG - Logging level (optional, default: info)

use climaflow::aggregator_core::{
    ClimateCoordinator, ExportWriter, GlobalSnapshot, GrowthProjector, ObservationField, Scenario,
    StatsEngine,
};
use climaflow::config::ReportConfig;
use climaflow::format::{format_number, format_percentage};
use std::env;

fn log_snapshot(stats: &GlobalSnapshot) {
    log::info!("🌍 Global snapshot for {}", stats.latest_year);
    log::info!(
        "   Countries: {} ({}-{})",
        stats.total_countries,
        stats.year_range.min,
        stats.year_range.max
    );
    log::info!("   Total emissions: {} Mt", format_number(stats.total_emissions, 2));
    log::info!("   Average per capita: {} t", format_number(stats.average_per_capita, 2));
    log::info!("   Total population: {}", format_number(stats.total_population, 2));
    log::info!("   Average temp change: {}°C", format_number(stats.average_temp_change, 2));

    for (rank, emitter) in stats.top_emitters.iter().enumerate() {
        log::info!(
            "   #{} {} - {} Mt ({} t/person)",
            rank + 1,
            emitter.country,
            format_number(emitter.emissions, 2),
            format_number(emitter.per_capita, 2)
        );
    }

    for share in &stats.energy_mix {
        log::info!(
            "   ⚡ {}: {}",
            share.source.as_str(),
            format_percentage(share.percentage, 1)
        );
    }
    for share in &stats.emissions_by_source {
        log::info!(
            "   🏭 {}: {}",
            share.source.as_str(),
            format_percentage(share.percentage, 1)
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = ReportConfig::from_env_and_args(&args)?;

    log::info!("🚀 Starting Climate Report");
    log::info!("   Dataset: {}", config.csv_path.display());
    log::info!("   Top emitters: {}", config.top_emitters_count);
    log::info!("   Scenario: {}", config.scenario.as_str());

    let mut coordinator = ClimateCoordinator::with_engines(
        StatsEngine::new(config.top_emitters_count),
        GrowthProjector::with_defaults(),
    );
    let summary = coordinator.ingest_file(&config.csv_path).await?;

    match &summary.global_stats {
        Some(stats) => log_snapshot(stats),
        None => log::warn!("⚠️  Dataset contained no usable observations"),
    }

    log::info!("📈 Trends by year:");
    for (year, trend) in coordinator.global_trends() {
        log::info!(
            "   {} - {} Mt, {} t/person, {}°C",
            year,
            format_number(trend.total_emissions, 2),
            format_number(trend.average_per_capita, 2),
            format_number(trend.average_temp_change, 2)
        );
    }

    for scenario in Scenario::all() {
        let points = coordinator.generate_projection(scenario);
        let Some(last) = points.last() else {
            log::info!("🔮 {}: not enough history to project", scenario.as_str());
            continue;
        };
        log::info!(
            "🔮 {}: {} Mt by {}",
            scenario.as_str(),
            format_number(last.predicted, 2),
            last.year
        );
        if scenario == config.scenario {
            for point in &points {
                log::info!("   {} - {} Mt", point.year, format_number(point.predicted, 2));
            }
        }
    }

    if !config.compare_countries.is_empty() {
        log::info!("⚖️  Comparison ({}):", ObservationField::TotalCo2.as_str());
        for entry in coordinator.compare_countries(&config.compare_countries, ObservationField::TotalCo2) {
            let rankings = coordinator.country_rankings(&entry.country);
            log::info!(
                "   {} - {} Mt (rank {} of {})",
                entry.country,
                format_number(entry.value, 2),
                rankings.total_emissions,
                rankings.total_countries
            );
        }
    }

    if let (Some(format), Some(path)) = (config.export_format, config.export_path.clone()) {
        let mut writer = ExportWriter::new(format, path.clone())?;
        writer.write_observations(coordinator.observations()).await?;
        writer.flush().await?;
        log::info!(
            "💾 Exported {} observations via {} backend to {}",
            coordinator.observations().len(),
            writer.backend_type(),
            path.display()
        );
    }

    log::info!("✅ Report complete");
    Ok(())
}
