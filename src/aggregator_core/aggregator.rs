//! Sum and positive-only average over any subset of observations

use super::normalizer::Observation;
use serde::{Deserialize, Serialize};

/// Numeric Observation fields addressable by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationField {
    #[default]
    #[serde(rename = "totalCO2")]
    TotalCo2,
    #[serde(rename = "coalCO2")]
    CoalCo2,
    #[serde(rename = "oilCO2")]
    OilCo2,
    #[serde(rename = "gasCO2")]
    GasCo2,
    #[serde(rename = "cementCO2")]
    CementCo2,
    #[serde(rename = "flaringCO2")]
    FlaringCo2,
    #[serde(rename = "otherCO2")]
    OtherCo2,
    #[serde(rename = "perCapitaCO2")]
    PerCapitaCo2,
    #[serde(rename = "totalEnergy")]
    TotalEnergy,
    #[serde(rename = "coalEnergy")]
    CoalEnergy,
    #[serde(rename = "gasEnergy")]
    GasEnergy,
    #[serde(rename = "petroleumEnergy")]
    PetroleumEnergy,
    #[serde(rename = "nuclearEnergy")]
    NuclearEnergy,
    #[serde(rename = "renewablesEnergy")]
    RenewablesEnergy,
    #[serde(rename = "ch4")]
    Ch4,
    #[serde(rename = "population")]
    Population,
    #[serde(rename = "tempChange")]
    TempChange,
}

impl ObservationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationField::TotalCo2 => "totalCO2",
            ObservationField::CoalCo2 => "coalCO2",
            ObservationField::OilCo2 => "oilCO2",
            ObservationField::GasCo2 => "gasCO2",
            ObservationField::CementCo2 => "cementCO2",
            ObservationField::FlaringCo2 => "flaringCO2",
            ObservationField::OtherCo2 => "otherCO2",
            ObservationField::PerCapitaCo2 => "perCapitaCO2",
            ObservationField::TotalEnergy => "totalEnergy",
            ObservationField::CoalEnergy => "coalEnergy",
            ObservationField::GasEnergy => "gasEnergy",
            ObservationField::PetroleumEnergy => "petroleumEnergy",
            ObservationField::NuclearEnergy => "nuclearEnergy",
            ObservationField::RenewablesEnergy => "renewablesEnergy",
            ObservationField::Ch4 => "ch4",
            ObservationField::Population => "population",
            ObservationField::TempChange => "tempChange",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|field| field.as_str() == s)
    }

    pub fn value(&self, obs: &Observation) -> f64 {
        match self {
            ObservationField::TotalCo2 => obs.total_co2,
            ObservationField::CoalCo2 => obs.coal_co2,
            ObservationField::OilCo2 => obs.oil_co2,
            ObservationField::GasCo2 => obs.gas_co2,
            ObservationField::CementCo2 => obs.cement_co2,
            ObservationField::FlaringCo2 => obs.flaring_co2,
            ObservationField::OtherCo2 => obs.other_co2,
            ObservationField::PerCapitaCo2 => obs.per_capita_co2,
            ObservationField::TotalEnergy => obs.total_energy,
            ObservationField::CoalEnergy => obs.coal_energy,
            ObservationField::GasEnergy => obs.gas_energy,
            ObservationField::PetroleumEnergy => obs.petroleum_energy,
            ObservationField::NuclearEnergy => obs.nuclear_energy,
            ObservationField::RenewablesEnergy => obs.renewables_energy,
            ObservationField::Ch4 => obs.ch4,
            ObservationField::Population => obs.population,
            ObservationField::TempChange => obs.temp_change,
        }
    }

    pub fn all() -> [ObservationField; 17] {
        [
            ObservationField::TotalCo2,
            ObservationField::CoalCo2,
            ObservationField::OilCo2,
            ObservationField::GasCo2,
            ObservationField::CementCo2,
            ObservationField::FlaringCo2,
            ObservationField::OtherCo2,
            ObservationField::PerCapitaCo2,
            ObservationField::TotalEnergy,
            ObservationField::CoalEnergy,
            ObservationField::GasEnergy,
            ObservationField::PetroleumEnergy,
            ObservationField::NuclearEnergy,
            ObservationField::RenewablesEnergy,
            ObservationField::Ch4,
            ObservationField::Population,
            ObservationField::TempChange,
        ]
    }
}

/// Arithmetic sum of `field`
pub fn sum<'a, I>(observations: I, field: ObservationField) -> f64
where
    I: IntoIterator<Item = &'a Observation>,
{
    observations.into_iter().map(|obs| field.value(obs)).sum()
}

/// Mean of `field` over entries where it is strictly positive
///
/// Zero and negative values are treated as "no data" and excluded from both
/// the numerator and the count. Returns 0.0 when nothing qualifies.
pub fn average<'a, I>(observations: I, field: ObservationField) -> f64
where
    I: IntoIterator<Item = &'a Observation>,
{
    let (total, count) = observations
        .into_iter()
        .map(|obs| field.value(obs))
        .filter(|value| *value > 0.0)
        .fold((0.0, 0usize), |(total, count), value| (total + value, count + 1));

    if count == 0 {
        return 0.0;
    }
    total / count as f64
}
