//! Supervised learner behind the delay classifier

use super::params::Hyperparameters;
use crate::error::{DelayError, Result};
use crate::models::{FeatureVector, FEATURE_COUNT};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use tracing::debug;

/// Loss used by the boosted trees; expects labels of -1 and 1
const LOSS: &str = "LogLikelyhood";

/// Black-box binary learner
pub trait Learner: Send + Sync {
    /// Train on aligned rows with binary labels
    fn fit(&mut self, x: &[FeatureVector], y: &[u8], params: &Hyperparameters) -> Result<()>;

    /// One label in `{0, 1}` per row, in input order
    fn predict(&self, x: &[FeatureVector]) -> Result<Vec<u8>>;

    /// Human readable name for logs
    fn name(&self) -> &str {
        "learner"
    }
}

/// Gradient-boosted decision trees with a weighted positive class
#[derive(Default)]
pub struct GbdtLearner {
    model: Option<GBDT>,
    threshold: f32,
}

impl GbdtLearner {
    pub fn new() -> Self {
        Self::default()
    }

    fn config(params: &Hyperparameters) -> Config {
        let mut config = Config::new();
        config.set_feature_size(FEATURE_COUNT);
        config.set_shrinkage(params.learning_rate);
        config.set_max_depth(params.max_depth);
        config.set_iterations(params.boost_rounds);
        // Full data and feature sampling keeps training deterministic
        config.set_data_sample_ratio(1.0);
        config.set_feature_sample_ratio(1.0);
        config.set_loss(LOSS);
        config
    }
}

impl Learner for GbdtLearner {
    fn fit(&mut self, x: &[FeatureVector], y: &[u8], params: &Hyperparameters) -> Result<()> {
        if x.len() != y.len() {
            return Err(DelayError::ShapeMismatch {
                features: x.len(),
                labels: y.len(),
            });
        }

        let mut train = DataVec::with_capacity(x.len());
        for (row, &label) in x.iter().zip(y) {
            let (weight, target) = if label == 1 {
                (params.scale_pos_weight, 1.0)
            } else {
                (1.0, -1.0)
            };
            train.push(Data::new_training_data(row.to_vec(), weight, target, None));
        }

        let mut gbdt = GBDT::new(&Self::config(params));
        gbdt.fit(&mut train);
        debug!(rows = x.len(), rounds = params.boost_rounds, "Boosted trees fitted");

        self.model = Some(gbdt);
        self.threshold = params.decision_threshold;
        Ok(())
    }

    fn predict(&self, x: &[FeatureVector]) -> Result<Vec<u8>> {
        let model = self.model.as_ref().ok_or(DelayError::NotFitted)?;
        if x.is_empty() {
            return Ok(Vec::new());
        }

        let test: DataVec = x
            .iter()
            .map(|row| Data::new_test_data(row.to_vec(), None))
            .collect();
        let probabilities = model.predict(&test);
        if probabilities.len() != x.len() {
            return Err(DelayError::Learner(format!(
                "{} predictions for {} rows",
                probabilities.len(),
                x.len()
            )));
        }

        Ok(probabilities
            .into_iter()
            .map(|p| u8::from(p > self.threshold))
            .collect())
    }

    fn name(&self) -> &str {
        "gbdt"
    }
}
