//! Fixed model hyperparameters

use serde::Serialize;

/// Seed recorded with the hyperparameters; the boosting learner has no random state to seed
pub const LEARNER_SEED: u64 = 1;

/// Boosting shrinkage
pub const LEARNING_RATE: f32 = 0.01;

/// Positive-class weight used unless the training data is more imbalanced
pub const DEFAULT_SCALE_POS_WEIGHT: f32 = 4.4;

/// Seed of the training/held-out partition
pub const SPLIT_SEED: u64 = 42;

/// Share of rows kept out of training for evaluation
pub const HOLDOUT_FRACTION: f64 = 0.33;

/// Maximum depth of each boosted tree
pub const MAX_DEPTH: u32 = 6;

/// Number of boosting rounds
pub const BOOST_ROUNDS: usize = 100;

/// Probability above which a flight is predicted as delayed
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Hyperparameters of one classifier instance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hyperparameters {
    /// Reported only; training is deterministic without it
    pub seed: u64,
    pub learning_rate: f32,
    pub scale_pos_weight: f32,
    pub max_depth: u32,
    pub boost_rounds: usize,
    pub decision_threshold: f32,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            seed: LEARNER_SEED,
            learning_rate: LEARNING_RATE,
            scale_pos_weight: DEFAULT_SCALE_POS_WEIGHT,
            max_depth: MAX_DEPTH,
            boost_rounds: BOOST_ROUNDS,
            decision_threshold: DECISION_THRESHOLD,
        }
    }
}

/// Negative-to-positive label ratio, `None` without positive labels
pub fn imbalance_scale(labels: &[u8]) -> Option<f32> {
    let positives = labels.iter().filter(|&&y| y == 1).count();
    if positives == 0 {
        return None;
    }
    let negatives = labels.len() - positives;
    Some(negatives as f32 / positives as f32)
}

/// Positive-class weight to train with.
///
/// The computed ratio replaces `default` only when it exceeds 1; the
/// correction is never lowered below the default otherwise.
pub fn resolve_scale_pos_weight(labels: &[u8], default: f32) -> f32 {
    match imbalance_scale(labels) {
        Some(scale) if scale > 1.0 => scale,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(negatives: usize, positives: usize) -> Vec<u8> {
        let mut y = vec![0u8; negatives];
        y.extend(std::iter::repeat(1u8).take(positives));
        y
    }

    #[test]
    fn test_imbalance_scale_ratio() {
        assert_eq!(imbalance_scale(&labels(80, 20)), Some(4.0));
        assert_eq!(imbalance_scale(&labels(90, 10)), Some(9.0));
        assert_eq!(imbalance_scale(&labels(50, 50)), Some(1.0));
        assert_eq!(imbalance_scale(&labels(10, 40)), Some(0.25));
    }

    #[test]
    fn test_imbalance_scale_is_order_independent() {
        let mut y = labels(30, 10);
        let sorted = imbalance_scale(&y);
        y.reverse();
        assert_eq!(imbalance_scale(&y), sorted);
        assert_eq!(sorted, Some(3.0));
    }

    #[test]
    fn test_imbalance_scale_without_positives() {
        assert_eq!(imbalance_scale(&labels(10, 0)), None);
        assert_eq!(imbalance_scale(&[]), None);
    }

    #[test]
    fn test_scale_overrides_default_when_larger_than_one() {
        assert_eq!(resolve_scale_pos_weight(&labels(90, 10), DEFAULT_SCALE_POS_WEIGHT), 9.0);
        // Any ratio above 1 wins, even below the default
        assert_eq!(resolve_scale_pos_weight(&labels(80, 20), DEFAULT_SCALE_POS_WEIGHT), 4.0);
    }

    #[test]
    fn test_scale_keeps_default_otherwise() {
        assert_eq!(
            resolve_scale_pos_weight(&labels(50, 50), DEFAULT_SCALE_POS_WEIGHT),
            DEFAULT_SCALE_POS_WEIGHT
        );
        assert_eq!(
            resolve_scale_pos_weight(&labels(10, 40), DEFAULT_SCALE_POS_WEIGHT),
            DEFAULT_SCALE_POS_WEIGHT
        );
        assert_eq!(
            resolve_scale_pos_weight(&labels(10, 0), DEFAULT_SCALE_POS_WEIGHT),
            DEFAULT_SCALE_POS_WEIGHT
        );
    }

    #[test]
    fn test_default_hyperparameters() {
        let params = Hyperparameters::default();
        assert_eq!(params.seed, 1);
        assert_eq!(params.learning_rate, 0.01);
        assert_eq!(params.scale_pos_weight, 4.4);
    }
}
