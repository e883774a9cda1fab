//! Global snapshot statistics for a single year

use super::aggregator::{average, sum, ObservationField};
use super::catalog::{Catalog, YearRange};
use super::normalizer::Observation;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_EMITTERS: usize = 10;

/// A source whose share of a combined total is reported
pub trait MixSource: Copy {
    fn field(&self) -> ObservationField;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergySource {
    Coal,
    Gas,
    Petroleum,
    Nuclear,
    Renewables,
}

impl EnergySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergySource::Coal => "coal",
            EnergySource::Gas => "gas",
            EnergySource::Petroleum => "petroleum",
            EnergySource::Nuclear => "nuclear",
            EnergySource::Renewables => "renewables",
        }
    }

    pub fn all() -> [EnergySource; 5] {
        [
            EnergySource::Coal,
            EnergySource::Gas,
            EnergySource::Petroleum,
            EnergySource::Nuclear,
            EnergySource::Renewables,
        ]
    }
}

impl MixSource for EnergySource {
    fn field(&self) -> ObservationField {
        match self {
            EnergySource::Coal => ObservationField::CoalEnergy,
            EnergySource::Gas => ObservationField::GasEnergy,
            EnergySource::Petroleum => ObservationField::PetroleumEnergy,
            EnergySource::Nuclear => ObservationField::NuclearEnergy,
            EnergySource::Renewables => ObservationField::RenewablesEnergy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionSource {
    Coal,
    Oil,
    Gas,
    Cement,
    Flaring,
    Other,
}

impl EmissionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmissionSource::Coal => "coal",
            EmissionSource::Oil => "oil",
            EmissionSource::Gas => "gas",
            EmissionSource::Cement => "cement",
            EmissionSource::Flaring => "flaring",
            EmissionSource::Other => "other",
        }
    }

    pub fn all() -> [EmissionSource; 6] {
        [
            EmissionSource::Coal,
            EmissionSource::Oil,
            EmissionSource::Gas,
            EmissionSource::Cement,
            EmissionSource::Flaring,
            EmissionSource::Other,
        ]
    }
}

impl MixSource for EmissionSource {
    fn field(&self) -> ObservationField {
        match self {
            EmissionSource::Coal => ObservationField::CoalCo2,
            EmissionSource::Oil => ObservationField::OilCo2,
            EmissionSource::Gas => ObservationField::GasCo2,
            EmissionSource::Cement => ObservationField::CementCo2,
            EmissionSource::Flaring => ObservationField::FlaringCo2,
            EmissionSource::Other => ObservationField::OtherCo2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceShare<S> {
    pub source: S,
    pub value: f64,
    /// Share of the combined total, 0-100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEmitter {
    pub country: String,
    pub emissions: f64,
    pub per_capita: f64,
    pub population: f64,
}

/// Totals and averages shared by the snapshot and every trend year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTrend {
    pub total_emissions: f64,
    pub average_per_capita: f64,
    pub total_population: f64,
    pub average_temp_change: f64,
    pub energy_mix: Vec<SourceShare<EnergySource>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSnapshot {
    pub total_countries: usize,
    pub year_range: YearRange,
    pub latest_year: i32,
    pub total_emissions: f64,
    pub average_per_capita: f64,
    pub total_population: f64,
    pub average_temp_change: f64,
    pub top_emitters: Vec<TopEmitter>,
    pub energy_mix: Vec<SourceShare<EnergySource>>,
    pub emissions_by_source: Vec<SourceShare<EmissionSource>>,
}

pub struct StatsEngine {
    top_emitters_count: usize,
}

impl StatsEngine {
    pub fn new(top_emitters_count: usize) -> Self {
        Self { top_emitters_count }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_TOP_EMITTERS)
    }

    pub fn top_emitters_count(&self) -> usize {
        self.top_emitters_count
    }

    /// Snapshot over the catalog's latest year, `None` without observations
    pub fn snapshot(&self, observations: &[Observation], catalog: &Catalog) -> Option<GlobalSnapshot> {
        if observations.is_empty() {
            return None;
        }
        let latest_year = catalog.latest_year()?;
        let latest: Vec<&Observation> = observations
            .iter()
            .filter(|o| o.year == latest_year)
            .collect();

        let totals = self.year_totals(latest.iter().copied());

        Some(GlobalSnapshot {
            total_countries: catalog.countries.len(),
            year_range: catalog.year_range(),
            latest_year,
            total_emissions: totals.total_emissions,
            average_per_capita: totals.average_per_capita,
            total_population: totals.total_population,
            average_temp_change: totals.average_temp_change,
            top_emitters: top_emitters(latest.iter().copied(), self.top_emitters_count),
            energy_mix: totals.energy_mix,
            emissions_by_source: emissions_by_source(latest.iter().copied()),
        })
    }

    /// Totals, positive-only averages and energy mix over one year's subset
    pub fn year_totals<'a, I>(&self, observations: I) -> YearTrend
    where
        I: IntoIterator<Item = &'a Observation>,
        I::IntoIter: Clone,
    {
        let iter = observations.into_iter();
        YearTrend {
            total_emissions: sum(iter.clone(), ObservationField::TotalCo2),
            average_per_capita: average(iter.clone(), ObservationField::PerCapitaCo2),
            total_population: sum(iter.clone(), ObservationField::Population),
            // Negative temperature changes fall out of the positive-only average
            average_temp_change: average(iter.clone(), ObservationField::TempChange),
            energy_mix: energy_mix(iter),
        }
    }
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Largest emitters first; entries without positive emissions are skipped
///
/// Equal emissions keep their input order.
pub fn top_emitters<'a, I>(observations: I, count: usize) -> Vec<TopEmitter>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut emitters: Vec<&Observation> = observations
        .into_iter()
        .filter(|o| o.total_co2 > 0.0)
        .collect();
    emitters.sort_by(|a, b| b.total_co2.total_cmp(&a.total_co2));

    emitters
        .into_iter()
        .take(count)
        .map(|o| TopEmitter {
            country: o.country.clone(),
            emissions: o.total_co2,
            per_capita: o.per_capita_co2,
            population: o.population,
        })
        .collect()
}

pub fn energy_mix<'a, I>(observations: I) -> Vec<SourceShare<EnergySource>>
where
    I: IntoIterator<Item = &'a Observation>,
    I::IntoIter: Clone,
{
    share_breakdown(observations, &EnergySource::all())
}

pub fn emissions_by_source<'a, I>(observations: I) -> Vec<SourceShare<EmissionSource>>
where
    I: IntoIterator<Item = &'a Observation>,
    I::IntoIter: Clone,
{
    share_breakdown(observations, &EmissionSource::all())
}

/// Per-source sums with their share of the combined total
///
/// Empty when the combined total is zero.
pub fn share_breakdown<'a, I, S>(observations: I, sources: &[S]) -> Vec<SourceShare<S>>
where
    I: IntoIterator<Item = &'a Observation>,
    I::IntoIter: Clone,
    S: MixSource,
{
    let iter = observations.into_iter();
    let values: Vec<(S, f64)> = sources
        .iter()
        .map(|source| (*source, sum(iter.clone(), source.field())))
        .collect();
    let total: f64 = values.iter().map(|(_, value)| value).sum();

    if total == 0.0 {
        return Vec::new();
    }

    values
        .into_iter()
        .map(|(source, value)| SourceShare {
            source,
            value,
            percentage: value / total * 100.0,
        })
        .collect()
}
