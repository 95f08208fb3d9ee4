//! Core data models for flight delay prediction

use serde::{Deserialize, Serialize};

/// Number of columns in every model feature vector
pub const FEATURE_COUNT: usize = 10;

/// Fixed-width numeric row consumed by the classifier
pub type FeatureVector = [f32; FEATURE_COUNT];

/// Categorical attributes shared by serving and training records
pub trait FlightAttributes {
    fn airline(&self) -> &str;
    fn flight_type(&self) -> &str;
    fn month(&self) -> i64;
}

/// A flight as received by the serving endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Operating airline name
    #[serde(rename = "OPERA")]
    pub airline: String,
    /// `I` for international, `N` for national
    #[serde(rename = "TIPOVUELO")]
    pub flight_type: String,
    /// Month of year, 1-12
    #[serde(rename = "MES")]
    pub month: i64,
}

impl FlightRecord {
    pub fn new(airline: impl Into<String>, flight_type: impl Into<String>, month: i64) -> Self {
        Self {
            airline: airline.into(),
            flight_type: flight_type.into(),
            month,
        }
    }
}

impl FlightAttributes for FlightRecord {
    fn airline(&self) -> &str {
        &self.airline
    }

    fn flight_type(&self) -> &str {
        &self.flight_type
    }

    fn month(&self) -> i64 {
        self.month
    }
}

/// A historical flight row used to fit the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    #[serde(rename = "OPERA")]
    pub airline: String,
    #[serde(rename = "TIPOVUELO")]
    pub flight_type: String,
    #[serde(rename = "MES")]
    pub month: i64,
    /// Scheduled departure, `YYYY-MM-DD HH:MM:SS`
    #[serde(rename = "Fecha-I")]
    pub scheduled_departure: String,
    /// Actual departure, `YYYY-MM-DD HH:MM:SS`
    #[serde(rename = "Fecha-O")]
    pub actual_departure: String,
}

impl TrainingRecord {
    pub fn new(
        airline: impl Into<String>,
        flight_type: impl Into<String>,
        month: i64,
        scheduled_departure: impl Into<String>,
        actual_departure: impl Into<String>,
    ) -> Self {
        Self {
            airline: airline.into(),
            flight_type: flight_type.into(),
            month,
            scheduled_departure: scheduled_departure.into(),
            actual_departure: actual_departure.into(),
        }
    }
}

impl FlightAttributes for TrainingRecord {
    fn airline(&self) -> &str {
        &self.airline
    }

    fn flight_type(&self) -> &str {
        &self.flight_type
    }

    fn month(&self) -> i64 {
        self.month
    }
}

/// Serving request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub flights: Vec<FlightRecord>,
}

/// Serving response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predict: Vec<u8>,
}
