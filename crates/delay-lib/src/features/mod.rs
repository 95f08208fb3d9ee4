//! Feature engineering for delay prediction
//!
//! Training path: temporal delta, one-hot encoding, `reduce`.
//! Serving path: catalogue encoding, equivalent to one-hot encoding
//! followed by `adjust`.

mod aligner;
mod catalogue;
mod encoder;
mod temporal;

pub use aligner::{adjust, reduce, AlignedFeatures, TOP_10_FEATURES};
pub use catalogue::{FeatureCatalogue, Indicator, CATALOGUE_VERSION};
pub use encoder::{
    encode, indicator_name, FeatureTable, AIRLINE_PREFIX, FLIGHT_TYPE_PREFIX, MONTH_PREFIX,
};
pub use temporal::{
    delay_label, minutes_difference, DELAY_THRESHOLD_MINUTES, EARLY_DEPARTURE_TOLERANCE_SECS,
    TIMESTAMP_FORMAT,
};

use crate::models::FlightAttributes;

/// Model-aligned features for a serving batch
pub fn serving_features<R: FlightAttributes>(records: &[R]) -> AlignedFeatures {
    AlignedFeatures::from_rows(FeatureCatalogue::new().encode_batch(records))
}
