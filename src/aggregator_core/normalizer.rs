//! Row normalization from raw CSV records to the unified Observation struct

use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One normalized country-year record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub country: String,
    pub iso: Option<String>,
    #[serde(rename = "totalCO2")]
    pub total_co2: f64,
    #[serde(rename = "coalCO2")]
    pub coal_co2: f64,
    #[serde(rename = "oilCO2")]
    pub oil_co2: f64,
    #[serde(rename = "gasCO2")]
    pub gas_co2: f64,
    #[serde(rename = "cementCO2")]
    pub cement_co2: f64,
    #[serde(rename = "flaringCO2")]
    pub flaring_co2: f64,
    #[serde(rename = "otherCO2")]
    pub other_co2: f64,
    #[serde(rename = "perCapitaCO2")]
    pub per_capita_co2: f64,
    #[serde(rename = "totalEnergy")]
    pub total_energy: f64,
    #[serde(rename = "coalEnergy")]
    pub coal_energy: f64,
    #[serde(rename = "gasEnergy")]
    pub gas_energy: f64,
    #[serde(rename = "petroleumEnergy")]
    pub petroleum_energy: f64,
    #[serde(rename = "nuclearEnergy")]
    pub nuclear_energy: f64,
    #[serde(rename = "renewablesEnergy")]
    pub renewables_energy: f64,
    pub ch4: f64,
    pub population: f64,
    #[serde(rename = "tempChange")]
    pub temp_change: f64,
}

/// Input columns of the emissions dataset, keyed by their exact header names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceField {
    Year,
    Country,
    Iso,
    TotalCo2,
    CoalCo2,
    OilCo2,
    GasCo2,
    CementCo2,
    FlaringCo2,
    OtherCo2,
    PerCapitaCo2,
    TotalEnergy,
    CoalEnergy,
    GasEnergy,
    PetroleumEnergy,
    NuclearEnergy,
    RenewablesEnergy,
    Ch4,
    Population,
    TempChange,
}

impl SourceField {
    pub fn header(&self) -> &'static str {
        match self {
            SourceField::Year => "Year",
            SourceField::Country => "Country",
            SourceField::Iso => "ISO.alpha-3",
            SourceField::TotalCo2 => "Total.CO2",
            SourceField::CoalCo2 => "Coal.CO2",
            SourceField::OilCo2 => "Oil.CO2",
            SourceField::GasCo2 => "Gas.CO2",
            SourceField::CementCo2 => "Cement.CO2",
            SourceField::FlaringCo2 => "Flaring.CO2",
            SourceField::OtherCo2 => "Other.CO2",
            SourceField::PerCapitaCo2 => "Per.Capita.CO2",
            SourceField::TotalEnergy => "Total.Energy.Production",
            SourceField::CoalEnergy => "Coal.Energy",
            SourceField::GasEnergy => "Gas.Energy",
            SourceField::PetroleumEnergy => "Petroleum.and.other.liquids.Energy",
            SourceField::NuclearEnergy => "Nuclear.Energy",
            SourceField::RenewablesEnergy => "Renewables.and.other.Energy",
            SourceField::Ch4 => "CH4",
            SourceField::Population => "Population",
            SourceField::TempChange => "Temp_Change",
        }
    }

    pub fn from_header(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|field| field.header() == s)
    }

    /// Columns a row must carry (truthy) to become an Observation
    pub fn required() -> [SourceField; 3] {
        [SourceField::Year, SourceField::Country, SourceField::TotalCo2]
    }

    pub fn all() -> [SourceField; 20] {
        [
            SourceField::Year,
            SourceField::Country,
            SourceField::Iso,
            SourceField::TotalCo2,
            SourceField::CoalCo2,
            SourceField::OilCo2,
            SourceField::GasCo2,
            SourceField::CementCo2,
            SourceField::FlaringCo2,
            SourceField::OtherCo2,
            SourceField::PerCapitaCo2,
            SourceField::TotalEnergy,
            SourceField::CoalEnergy,
            SourceField::GasEnergy,
            SourceField::PetroleumEnergy,
            SourceField::NuclearEnergy,
            SourceField::RenewablesEnergy,
            SourceField::Ch4,
            SourceField::Population,
            SourceField::TempChange,
        ]
    }
}

/// Header positions resolved once per file
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: HashMap<SourceField, usize>,
}

impl ColumnMap {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            if let Some(field) = SourceField::from_header(name.trim()) {
                // First occurrence wins on duplicated headers
                positions.entry(field).or_insert(idx);
            }
        }
        Self { positions }
    }

    pub fn position(&self, field: SourceField) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    pub fn contains(&self, field: SourceField) -> bool {
        self.positions.contains_key(&field)
    }

    /// Required columns absent from the header row
    pub fn missing_required(&self) -> Vec<SourceField> {
        SourceField::required()
            .into_iter()
            .filter(|field| !self.contains(*field))
            .collect()
    }
}

/// A raw record viewed through the column schema
pub struct RawRow<'a> {
    columns: &'a ColumnMap,
    record: &'a StringRecord,
}

impl<'a> RawRow<'a> {
    pub fn new(columns: &'a ColumnMap, record: &'a StringRecord) -> Self {
        Self { columns, record }
    }

    pub fn get(&self, field: SourceField) -> Option<&'a str> {
        self.columns
            .position(field)
            .and_then(|idx| self.record.get(idx))
            .map(str::trim)
    }

    fn number(&self, field: SourceField) -> f64 {
        self.get(field).map(parse_number).unwrap_or(0.0)
    }
}

/// Normalize one raw row, or `None` when the row is filtered out
///
/// # Filtering
/// - `Year`, `Country` and `Total.CO2` must be truthy (present, non-empty,
///   not numeric zero, not `false`)
/// - A year with no leading integer rejects the row
///
/// Every other numeric field degrades to 0.0 on its own.
pub fn normalize_row(row: &RawRow<'_>) -> Option<Observation> {
    let required_present = SourceField::required()
        .into_iter()
        .all(|field| row.get(field).map_or(false, is_truthy));
    if !required_present {
        return None;
    }

    let year = row.get(SourceField::Year).and_then(parse_year)?;
    let country = row.get(SourceField::Country)?.to_string();
    let iso = row
        .get(SourceField::Iso)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(Observation {
        year,
        country,
        iso,
        total_co2: row.number(SourceField::TotalCo2),
        coal_co2: row.number(SourceField::CoalCo2),
        oil_co2: row.number(SourceField::OilCo2),
        gas_co2: row.number(SourceField::GasCo2),
        cement_co2: row.number(SourceField::CementCo2),
        flaring_co2: row.number(SourceField::FlaringCo2),
        other_co2: row.number(SourceField::OtherCo2),
        per_capita_co2: row.number(SourceField::PerCapitaCo2),
        total_energy: row.number(SourceField::TotalEnergy),
        coal_energy: row.number(SourceField::CoalEnergy),
        gas_energy: row.number(SourceField::GasEnergy),
        petroleum_energy: row.number(SourceField::PetroleumEnergy),
        nuclear_energy: row.number(SourceField::NuclearEnergy),
        renewables_energy: row.number(SourceField::RenewablesEnergy),
        ch4: row.number(SourceField::Ch4),
        population: row.number(SourceField::Population),
        temp_change: row.number(SourceField::TempChange),
    })
}

/// Truthiness of a raw cell as the dataset tooling has always applied it
fn is_truthy(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("false") {
        return false;
    }
    match raw.parse::<f64>() {
        // NaN compares unequal to zero, so a "NaN" cell stays truthy
        Ok(value) => value != 0.0,
        Err(_) => true,
    }
}

/// Parse the longest leading decimal number, 0.0 when there is none
pub fn parse_number(raw: &str) -> f64 {
    let prefix = numeric_prefix(raw.trim());
    prefix
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Parse the leading integer of a year cell (`"2019.0"` → 2019)
pub fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    raw[..end].parse().ok()
}

fn numeric_prefix(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let mantissa_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    let mantissa = &raw[mantissa_start..end];
    if mantissa.is_empty() || mantissa == "." {
        return "";
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    &raw[..end]
}
