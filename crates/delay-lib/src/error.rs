//! Error taxonomy for the delay prediction pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, DelayError>;

/// Errors raised by feature engineering, validation and the model lifecycle
#[derive(Debug, Error)]
pub enum DelayError {
    /// A timestamp or request body could not be decoded
    #[error("parse error: {0}")]
    Parse(String),

    /// A serving record lies outside the domain the classifier was trained on
    #[error("record {index} rejected: {reason}")]
    Validation { index: usize, reason: String },

    /// A training-time feature table lacks one of the model columns
    #[error("feature column '{0}' missing from encoded table")]
    MissingColumn(String),

    /// Feature rows and labels disagree in length
    #[error("{features} feature rows but {labels} labels")]
    ShapeMismatch { features: usize, labels: usize },

    /// The training partition has no rows to learn from
    #[error("training partition is empty")]
    EmptyTrainingSet,

    /// `predict` was called on a classifier that has not been fitted
    #[error("classifier has not been fitted")]
    NotFitted,

    /// `fit` was called on a classifier that is already fitted
    #[error("classifier is already fitted; construct a new instance to retrain")]
    AlreadyFitted,

    /// `get_model` was called before initialization completed
    #[error("model has not been initialized")]
    NotInitialized,

    /// An earlier initialization attempt failed and has not been reset
    #[error("model initialization previously failed: {0}")]
    InitializationFailed(String),

    /// The training dataset file does not exist
    #[error("training data source not found at {}", .0.display())]
    DataSourceMissing(PathBuf),

    /// The training dataset could not be decoded
    #[error("failed to read training data: {0}")]
    Dataset(#[from] csv::Error),

    /// The external learner rejected its input
    #[error("learner failure: {0}")]
    Learner(String),
}

impl DelayError {
    /// True for errors caused by the caller's input rather than by the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, DelayError::Parse(_) | DelayError::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(DelayError::Parse("bad".into()).is_client_error());
        assert!(DelayError::Validation {
            index: 0,
            reason: "month 14".into()
        }
        .is_client_error());
        assert!(!DelayError::NotFitted.is_client_error());
        assert!(!DelayError::NotInitialized.is_client_error());
        assert!(!DelayError::DataSourceMissing(PathBuf::from("/nope")).is_client_error());
    }

    #[test]
    fn test_display_includes_context() {
        let err = DelayError::MissingColumn("MES_7".into());
        assert!(err.to_string().contains("MES_7"));

        let err = DelayError::DataSourceMissing(PathBuf::from("/data/data.csv"));
        assert!(err.to_string().contains("/data/data.csv"));
    }
}
