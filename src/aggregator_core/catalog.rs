//! Distinct countries and years present in the observation list

use super::normalizer::Observation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Lexicographically sorted, deduplicated
    pub countries: Vec<String>,
    /// Ascending, deduplicated
    pub years: Vec<i32>,
}

impl Catalog {
    /// Build the catalog from the full observation list
    ///
    /// The result does not depend on input order.
    pub fn build(observations: &[Observation]) -> Self {
        let countries: BTreeSet<&str> = observations.iter().map(|o| o.country.as_str()).collect();
        let years: BTreeSet<i32> = observations.iter().map(|o| o.year).collect();

        Self {
            countries: countries.into_iter().map(str::to_string).collect(),
            years: years.into_iter().collect(),
        }
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// `{0, 0}` when no years exist
    pub fn year_range(&self) -> YearRange {
        match (self.years.first(), self.years.last()) {
            (Some(&min), Some(&max)) => YearRange { min, max },
            _ => YearRange::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_observation(year: i32, country: &str) -> Observation {
        Observation {
            year,
            country: country.to_string(),
            total_co2: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_catalog_sorted_and_deduplicated() {
        let data = vec![
            create_test_observation(2001, "Peru"),
            create_test_observation(1999, "Chile"),
            create_test_observation(2001, "Chile"),
            create_test_observation(2000, "Argentina"),
        ];

        let catalog = Catalog::build(&data);
        assert_eq!(catalog.countries, vec!["Argentina", "Chile", "Peru"]);
        assert_eq!(catalog.years, vec![1999, 2000, 2001]);
        assert_eq!(catalog.year_range(), YearRange { min: 1999, max: 2001 });
        assert_eq!(catalog.latest_year(), Some(2001));
    }

    #[test]
    fn test_catalog_independent_of_order() {
        let mut data = vec![
            create_test_observation(2010, "b"),
            create_test_observation(2005, "a"),
            create_test_observation(2010, "c"),
        ];
        let first = Catalog::build(&data);
        data.reverse();
        let second = Catalog::build(&data);

        assert_eq!(first, second);
        assert_eq!(Catalog::build(&data), second);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::build(&[]);
        assert!(catalog.is_empty());
        assert!(catalog.countries.is_empty());
        assert_eq!(catalog.year_range(), YearRange { min: 0, max: 0 });
        assert_eq!(catalog.latest_year(), None);
    }
}
