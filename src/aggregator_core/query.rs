//! Read-only filters, comparisons and rankings over the observation list

use super::aggregator::{average, sum, ObservationField};
use super::catalog::Catalog;
use super::normalizer::Observation;
use serde::{Serialize, Serializer};

/// 1-based position, or "N/A" when the country is not ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Position(usize),
    NotApplicable,
}

impl Rank {
    pub fn position(&self) -> Option<usize> {
        match self {
            Rank::Position(p) => Some(*p),
            Rank::NotApplicable => None,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Position(p) => write!(f, "#{}", p),
            Rank::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rank::Position(p) => serializer.serialize_u64(*p as u64),
            Rank::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRankings {
    pub total_emissions: Rank,
    pub per_capita_emissions: Rank,
    /// Observations at the latest year, ranked or not
    pub total_countries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryComparison {
    pub country: String,
    pub value: f64,
    pub data: Observation,
}

/// Yearly emissions total paired with the positive-only mean temperature change
///
/// A plotting series, not a correlation coefficient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionsTemperaturePoint {
    pub year: i32,
    #[serde(rename = "totalCO2")]
    pub total_co2: f64,
    pub avg_temp_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
    pub start: i32,
    pub end: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDeltas {
    pub co2_change: f64,
    pub per_capita_change: f64,
    pub temp_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStats {
    pub country: String,
    pub data_points: usize,
    pub year_range: YearSpan,
    pub latest: Observation,
    pub trends: CountryDeltas,
    pub rankings: CountryRankings,
}

pub fn by_year(observations: &[Observation], year: i32) -> Vec<&Observation> {
    observations.iter().filter(|o| o.year == year).collect()
}

pub fn by_country<'a>(observations: &'a [Observation], country: &str) -> Vec<&'a Observation> {
    observations.iter().filter(|o| o.country == country).collect()
}

/// Inclusive on both ends
pub fn by_year_range(observations: &[Observation], start: i32, end: i32) -> Vec<&Observation> {
    observations
        .iter()
        .filter(|o| o.year >= start && o.year <= end)
        .collect()
}

/// A country's records in ascending year order
pub fn country_time_series<'a>(observations: &'a [Observation], country: &str) -> Vec<&'a Observation> {
    let mut series = by_country(observations, country);
    series.sort_by_key(|o| o.year);
    series
}

/// Latest-year values of `metric` for the requested countries, largest first
///
/// Countries without a record at the latest year are skipped.
pub fn compare_countries<S: AsRef<str>>(
    observations: &[Observation],
    catalog: &Catalog,
    countries: &[S],
    metric: ObservationField,
) -> Vec<CountryComparison> {
    let Some(latest_year) = catalog.latest_year() else {
        return Vec::new();
    };

    let mut comparison: Vec<CountryComparison> = countries
        .iter()
        .filter_map(|country| {
            let country = country.as_ref();
            observations
                .iter()
                .find(|o| o.country == country && o.year == latest_year)
                .map(|data| CountryComparison {
                    country: country.to_string(),
                    value: metric.value(data),
                    data: data.clone(),
                })
        })
        .collect();

    comparison.sort_by(|a, b| b.value.total_cmp(&a.value));
    comparison
}

pub fn emissions_temperature_series(
    observations: &[Observation],
    catalog: &Catalog,
) -> Vec<EmissionsTemperaturePoint> {
    catalog
        .years
        .iter()
        .map(|&year| {
            let subset = by_year(observations, year);
            EmissionsTemperaturePoint {
                year,
                total_co2: sum(subset.iter().copied(), ObservationField::TotalCo2),
                avg_temp_change: average(subset.iter().copied(), ObservationField::TempChange),
            }
        })
        .filter(|point| point.total_co2 > 0.0 && point.avg_temp_change != 0.0)
        .collect()
}

pub fn country_stats(observations: &[Observation], catalog: &Catalog, country: &str) -> Option<CountryStats> {
    let series = country_time_series(observations, country);
    let earliest = *series.first()?;
    let latest = *series.last()?;

    Some(CountryStats {
        country: country.to_string(),
        data_points: series.len(),
        year_range: YearSpan {
            start: earliest.year,
            end: latest.year,
        },
        latest: latest.clone(),
        trends: CountryDeltas {
            co2_change: latest.total_co2 - earliest.total_co2,
            per_capita_change: latest.per_capita_co2 - earliest.per_capita_co2,
            temp_change: latest.temp_change - earliest.temp_change,
        },
        rankings: country_rankings(observations, catalog, country),
    })
}

pub fn country_rankings(observations: &[Observation], catalog: &Catalog, country: &str) -> CountryRankings {
    let latest = match catalog.latest_year() {
        Some(year) => by_year(observations, year),
        None => Vec::new(),
    };

    CountryRankings {
        total_emissions: rank_by(&latest, country, ObservationField::TotalCo2),
        per_capita_emissions: rank_by(&latest, country, ObservationField::PerCapitaCo2),
        total_countries: latest.len(),
    }
}

/// Position of `country` among positive values of `field`, descending
fn rank_by(subset: &[&Observation], country: &str, field: ObservationField) -> Rank {
    let mut ranked: Vec<&Observation> = subset
        .iter()
        .copied()
        .filter(|o| field.value(o) > 0.0)
        .collect();
    ranked.sort_by(|a, b| field.value(b).total_cmp(&field.value(a)));

    ranked
        .iter()
        .position(|o| o.country == country)
        .map_or(Rank::NotApplicable, |idx| Rank::Position(idx + 1))
}

/// Case-insensitive substring search over catalog countries
pub fn search_countries<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    catalog
        .countries
        .iter()
        .filter(|country| country.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}
