//! Flight delay prediction library
//!
//! This crate provides the core functionality for:
//! - Feature engineering (scheduling delta, one-hot encoding, alignment)
//! - Validation of serving requests
//! - The delay classifier and its external learner
//! - The shared model lifecycle used by the serving endpoint
//! - Observability

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod features;
pub mod lifecycle;
pub mod models;
pub mod observability;
pub mod validation;

pub use classifier::{ClassificationReport, DelayClassifier, GbdtLearner, Learner};
pub use dataset::{CsvSource, MemorySource, TrainingSource};
pub use error::{DelayError, Result};
pub use lifecycle::ModelManager;
pub use models::*;
pub use observability::{ServiceMetrics, StructuredLogger};
