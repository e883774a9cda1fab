//! Country Lookup Binary
//!
//! Searches the dataset for each query given on the command line and prints
//! stats and rankings for every matching country.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin country_lookup -- --input data/climate.csv china "united k"
//! ```
//!
//! ## Environment Variables
//!
//! - CLIMATE_CSV_PATH - Dataset to ingest (required unless --input is given)
//! - RUST_LOG - Logging level (optional, default: info)

use climaflow::aggregator_core::{ClimateCoordinator, CountryStats};
use climaflow::config::{positional_args, ReportConfig};
use climaflow::format::format_number;
use std::env;

fn print_stats(stats: &CountryStats) {
    println!("{} ({} data points, {}-{})", stats.country, stats.data_points, stats.year_range.start, stats.year_range.end);
    println!(
        "  Latest ({}): {} Mt CO2, {} t/person, {} people",
        stats.latest.year,
        format_number(stats.latest.total_co2, 2),
        format_number(stats.latest.per_capita_co2, 2),
        format_number(stats.latest.population, 2)
    );
    println!(
        "  Change: {} Mt CO2, {} t/person, {}°C",
        format_number(stats.trends.co2_change, 2),
        format_number(stats.trends.per_capita_change, 2),
        format_number(stats.trends.temp_change, 2)
    );
    println!(
        "  Rank: {} by total, {} per capita (of {})",
        stats.rankings.total_emissions, stats.rankings.per_capita_emissions, stats.rankings.total_countries
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = ReportConfig::from_env_and_args(&args)?;
    let queries = positional_args(&args);

    if queries.is_empty() {
        log::warn!("No country queries given; usage: country_lookup [--input <csv>] <query>...");
        return Ok(());
    }

    let mut coordinator = ClimateCoordinator::new();
    coordinator.ingest_file(&config.csv_path).await?;

    for query in &queries {
        let matches = coordinator.search_countries(query);
        if matches.is_empty() {
            println!("🔍 '{}': no matching countries", query);
            continue;
        }

        println!("🔍 '{}': {} match(es)", query, matches.len());
        for country in matches {
            match coordinator.country_stats(country) {
                Some(stats) => print_stats(&stats),
                None => println!("{}: no observations", country),
            }
        }
    }

    Ok(())
}
