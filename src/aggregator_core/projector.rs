//! Compounding-growth projection of total emissions under named scenarios
//!
//! This is a naive extrapolation of recent year-over-year growth, not a
//! fitted statistical model.

use super::trend::TrendTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    #[default]
    Current,
    Optimistic,
    Pessimistic,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Current => "current",
            Scenario::Optimistic => "optimistic",
            Scenario::Pessimistic => "pessimistic",
        }
    }

    /// Exact lowercase names only; anything else falls back to `Current`
    pub fn from_str(s: &str) -> Self {
        match s {
            "optimistic" => Scenario::Optimistic,
            "pessimistic" => Scenario::Pessimistic,
            _ => Scenario::Current,
        }
    }

    /// Factor applied to the observed average growth rate
    pub fn growth_multiplier(&self) -> f64 {
        match self {
            Scenario::Current => 1.0,
            Scenario::Optimistic => 0.5,
            Scenario::Pessimistic => 1.5,
        }
    }

    pub fn all() -> [Scenario; 3] {
        [Scenario::Current, Scenario::Optimistic, Scenario::Pessimistic]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: i32,
    /// Never negative
    pub predicted: f64,
    pub scenario: Scenario,
}

pub struct GrowthProjector {
    min_history_years: usize,
    growth_window_years: usize,
    horizon_years: i32,
}

impl GrowthProjector {
    pub fn new(min_history_years: usize, growth_window_years: usize, horizon_years: i32) -> Self {
        Self {
            min_history_years,
            growth_window_years,
            horizon_years,
        }
    }

    /// 3 years of history required, growth from the last 5 trend years,
    /// 11 projected points (start year plus 10)
    pub fn with_defaults() -> Self {
        Self::new(3, 5, 10)
    }

    /// Project total emissions from the year after the latest trend year
    ///
    /// # Returns
    /// Empty when the trend table has fewer than `min_history_years` years.
    pub fn project(&self, trends: &TrendTable, scenario: Scenario) -> Vec<ProjectionPoint> {
        if trends.len() < self.min_history_years {
            return Vec::new();
        }
        let Some((&last_year, last)) = trends.iter().next_back() else {
            return Vec::new();
        };

        let recent: Vec<f64> = trends
            .values()
            .skip(trends.len().saturating_sub(self.growth_window_years))
            .map(|t| t.total_emissions)
            .collect();
        let rate = average_growth_rate(&recent) * scenario.growth_multiplier();

        let start_year = last_year + 1;
        let last_value = last.total_emissions;

        (start_year..=start_year + self.horizon_years)
            .map(|year| {
                let predicted = last_value * (1.0 + rate).powi(year - start_year);
                ProjectionPoint {
                    year,
                    predicted: predicted.max(0.0),
                    scenario,
                }
            })
            .collect()
    }
}

impl Default for GrowthProjector {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Mean relative change between consecutive values
///
/// Transitions whose prior value is not positive are skipped. 0.0 when no
/// transition qualifies.
pub fn average_growth_rate(values: &[f64]) -> f64 {
    let rates: Vec<f64> = values
        .windows(2)
        .filter(|pair| pair[0] > 0.0)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect();

    if rates.is_empty() {
        return 0.0;
    }
    rates.iter().sum::<f64>() / rates.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator_core::stats::YearTrend;

    fn trend_table(values: &[(i32, f64)]) -> TrendTable {
        values
            .iter()
            .map(|&(year, total)| {
                (
                    year,
                    YearTrend {
                        total_emissions: total,
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_requires_three_years() {
        let projector = GrowthProjector::with_defaults();
        assert!(projector.project(&TrendTable::new(), Scenario::Current).is_empty());
        assert!(projector
            .project(&trend_table(&[(2000, 1.0), (2001, 2.0)]), Scenario::Current)
            .is_empty());
        assert_eq!(
            projector
                .project(&trend_table(&[(2000, 1.0), (2001, 2.0), (2002, 3.0)]), Scenario::Current)
                .len(),
            11
        );
    }

    #[test]
    fn test_eleven_points_from_next_year() {
        let trends = trend_table(&[(2018, 100.0), (2019, 110.0), (2020, 121.0)]);
        let points = GrowthProjector::with_defaults().project(&trends, Scenario::Current);

        assert_eq!(points.len(), 11);
        assert_eq!(points[0].year, 2021);
        assert_eq!(points[10].year, 2031);
        // First point is the last observed total, unscaled
        assert_eq!(points[0].predicted, 121.0);
        assert!((points[1].predicted - 133.1).abs() < 1e-9);
        assert!(points.iter().all(|p| p.scenario == Scenario::Current));
    }

    #[test]
    fn test_optimistic_halves_growth_rate() {
        let trends = trend_table(&[(2018, 100.0), (2019, 110.0), (2020, 121.0)]);
        let projector = GrowthProjector::with_defaults();

        let current = projector.project(&trends, Scenario::Current);
        let optimistic = projector.project(&trends, Scenario::Optimistic);
        let pessimistic = projector.project(&trends, Scenario::Pessimistic);

        let rate = |points: &[ProjectionPoint]| points[1].predicted / points[0].predicted - 1.0;
        assert!((rate(&optimistic) - rate(&current) * 0.5).abs() < 1e-12);
        assert!((rate(&pessimistic) - rate(&current) * 1.5).abs() < 1e-12);
        assert_eq!(optimistic.len(), 11);
    }

    #[test]
    fn test_growth_window_uses_last_five_years() {
        // Early collapse is outside the five-year window
        let trends = trend_table(&[
            (2014, 1000.0),
            (2015, 10.0),
            (2016, 100.0),
            (2017, 100.0),
            (2018, 100.0),
            (2019, 100.0),
            (2020, 100.0),
        ]);
        let points = GrowthProjector::with_defaults().project(&trends, Scenario::Pessimistic);
        assert!(points.iter().all(|p| p.predicted == 100.0));
    }

    #[test]
    fn test_prediction_floored_at_zero() {
        let trends = trend_table(&[(2000, 100.0), (2001, 10.0), (2002, 1.0)]);
        let points = GrowthProjector::with_defaults().project(&trends, Scenario::Pessimistic);
        // rate = -0.9 * 1.5 = -1.35, so odd powers go negative
        assert!(points.iter().all(|p| p.predicted >= 0.0));
        assert_eq!(points[1].predicted, 0.0);
    }

    #[test]
    fn test_average_growth_rate_skips_non_positive_priors() {
        assert_eq!(average_growth_rate(&[0.0, 5.0, 10.0]), 1.0);
        assert_eq!(average_growth_rate(&[-1.0, 5.0]), 0.0);
        assert_eq!(average_growth_rate(&[7.0]), 0.0);
        assert_eq!(average_growth_rate(&[]), 0.0);
    }

    #[test]
    fn test_unknown_scenario_falls_back_to_current() {
        assert_eq!(Scenario::from_str("optimistic"), Scenario::Optimistic);
        assert_eq!(Scenario::from_str("pessimistic"), Scenario::Pessimistic);
        assert_eq!(Scenario::from_str("Optimistic"), Scenario::Current);
        assert_eq!(Scenario::from_str("PESSIMISTIC"), Scenario::Current);
        assert_eq!(Scenario::from_str(" optimistic"), Scenario::Current);
        assert_eq!(Scenario::from_str("apocalyptic"), Scenario::Current);
        assert_eq!(Scenario::from_str(""), Scenario::Current);
    }
}
