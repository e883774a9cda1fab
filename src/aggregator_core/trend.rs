//! Per-year trend table built from the stats engine's year totals

use super::catalog::Catalog;
use super::normalizer::Observation;
use super::stats::{StatsEngine, YearTrend};
use std::collections::BTreeMap;

/// Year → aggregate over that year's observations
pub type TrendTable = BTreeMap<i32, YearTrend>;

pub struct TrendBuilder<'a> {
    engine: &'a StatsEngine,
}

impl<'a> TrendBuilder<'a> {
    pub fn new(engine: &'a StatsEngine) -> Self {
        Self { engine }
    }

    /// One entry per catalog year, including years with no usable values
    pub fn build(&self, observations: &[Observation], catalog: &Catalog) -> TrendTable {
        let mut by_year: BTreeMap<i32, Vec<&Observation>> =
            catalog.years.iter().map(|year| (*year, Vec::new())).collect();
        for obs in observations {
            if let Some(bucket) = by_year.get_mut(&obs.year) {
                bucket.push(obs);
            }
        }

        by_year
            .into_iter()
            .map(|(year, subset)| {
                log::debug!("Building trend for {} ({} observations)", year, subset.len());
                (year, self.engine.year_totals(subset.iter().copied()))
            })
            .collect()
    }
}
