//! Direct encoding of single records against a fixed category catalogue
//!
//! Produces the same vector as `encode` followed by `adjust`, without
//! materializing columns for categories the model never sees.

use super::encoder::{indicator_name, AIRLINE_PREFIX, FLIGHT_TYPE_PREFIX, MONTH_PREFIX};
use crate::models::{FeatureVector, FlightAttributes, FEATURE_COUNT};

/// Version tag of the indicator layout below
pub const CATALOGUE_VERSION: &str = "top10-v1";

/// One model column: the attribute it reads and the value it indicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Airline(&'static str),
    FlightType(&'static str),
    Month(i64),
}

impl Indicator {
    pub fn matches<R: FlightAttributes + ?Sized>(&self, record: &R) -> bool {
        match *self {
            Indicator::Airline(name) => record.airline() == name,
            Indicator::FlightType(code) => record.flight_type() == code,
            Indicator::Month(month) => record.month() == month,
        }
    }

    pub fn column_name(&self) -> String {
        match *self {
            Indicator::Airline(name) => indicator_name(AIRLINE_PREFIX, name),
            Indicator::FlightType(code) => indicator_name(FLIGHT_TYPE_PREFIX, code),
            Indicator::Month(month) => indicator_name(MONTH_PREFIX, month),
        }
    }
}

const INDICATORS: [Indicator; FEATURE_COUNT] = [
    Indicator::Airline("Latin American Wings"),
    Indicator::Month(7),
    Indicator::Month(10),
    Indicator::Airline("Grupo LATAM"),
    Indicator::Month(12),
    Indicator::FlightType("I"),
    Indicator::Month(4),
    Indicator::Month(11),
    Indicator::Airline("Sky Airline"),
    Indicator::Airline("Copa Air"),
];

/// Versioned catalogue of the categories the classifier consumes
#[derive(Debug, Clone, Copy)]
pub struct FeatureCatalogue {
    version: &'static str,
    indicators: &'static [Indicator; FEATURE_COUNT],
}

impl Default for FeatureCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureCatalogue {
    pub const fn new() -> Self {
        Self {
            version: CATALOGUE_VERSION,
            indicators: &INDICATORS,
        }
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn indicators(&self) -> &'static [Indicator; FEATURE_COUNT] {
        self.indicators
    }

    /// Out-of-catalogue values leave every indicator of their block at zero.
    pub fn encode<R: FlightAttributes + ?Sized>(&self, record: &R) -> FeatureVector {
        self.indicators
            .map(|indicator| if indicator.matches(record) { 1.0 } else { 0.0 })
    }

    pub fn encode_batch<R: FlightAttributes>(&self, records: &[R]) -> Vec<FeatureVector> {
        records.iter().map(|r| self.encode(r)).collect()
    }
}
