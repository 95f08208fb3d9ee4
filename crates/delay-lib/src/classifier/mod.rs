//! Delay classifier: preprocessing orchestration, fitting and prediction

mod learner;
mod params;
mod report;
mod split;

pub use learner::{GbdtLearner, Learner};
pub use params::{
    imbalance_scale, resolve_scale_pos_weight, Hyperparameters, BOOST_ROUNDS, DECISION_THRESHOLD,
    DEFAULT_SCALE_POS_WEIGHT, HOLDOUT_FRACTION, LEARNER_SEED, LEARNING_RATE, MAX_DEPTH,
    SPLIT_SEED,
};
pub use report::{ClassMetrics, ClassificationReport};
pub use split::{train_test_split, Partition};

use crate::error::{DelayError, Result};
use crate::features::{delay_label, encode, minutes_difference, reduce, AlignedFeatures};
use crate::models::TrainingRecord;
use tracing::{debug, info, warn};

/// Output of [`DelayClassifier::preprocess`]
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    pub features: AlignedFeatures,
    /// Delay labels, present when target derivation was requested
    pub target: Option<Vec<u8>>,
}

/// Rows withheld from training, kept for evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Holdout {
    pub features: AlignedFeatures,
    pub target: Vec<u8>,
}

#[derive(Debug)]
enum State {
    Unfitted,
    Fitted { holdout: Holdout },
}

/// Binary delay classifier over the model feature columns.
///
/// Moves one way from unfitted to fitted; retraining means building a new
/// instance.
pub struct DelayClassifier<L: Learner = GbdtLearner> {
    learner: L,
    params: Hyperparameters,
    state: State,
}

impl DelayClassifier<GbdtLearner> {
    pub fn new() -> Self {
        Self::with_learner(GbdtLearner::new())
    }
}

impl Default for DelayClassifier<GbdtLearner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Learner> DelayClassifier<L> {
    pub fn with_learner(learner: L) -> Self {
        let params = Hyperparameters::default();
        info!(
            learner = learner.name(),
            seed = params.seed,
            learning_rate = params.learning_rate,
            scale_pos_weight = params.scale_pos_weight,
            "Set up delay classifier"
        );
        Self {
            learner,
            params,
            state: State::Unfitted,
        }
    }

    pub fn params(&self) -> &Hyperparameters {
        &self.params
    }

    pub fn learner(&self) -> &L {
        &self.learner
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, State::Fitted { .. })
    }

    /// Rows withheld by `fit`, available once fitted
    pub fn holdout(&self) -> Option<&Holdout> {
        match &self.state {
            State::Fitted { holdout } => Some(holdout),
            State::Unfitted => None,
        }
    }

    /// Turn raw training rows into aligned features, plus delay labels when
    /// `derive_target` is set.
    ///
    /// Every row's scheduling delta is computed, so malformed timestamps
    /// fail here whether or not labels are requested.
    pub fn preprocess(&self, data: &[TrainingRecord], derive_target: bool) -> Result<Preprocessed> {
        info!(rows = data.len(), derive_target, "Processing training data");

        let minutes = data
            .iter()
            .map(|r| minutes_difference(&r.scheduled_departure, &r.actual_departure))
            .collect::<Result<Vec<f64>>>()?;

        let features = reduce(&encode(data))?;
        let target = derive_target.then(|| minutes.iter().map(|&m| delay_label(m)).collect());

        Ok(Preprocessed { features, target })
    }

    /// Fit on the training partition of a seeded split.
    ///
    /// The positive-class weight is recomputed from the training partition
    /// and replaces the default when it exceeds 1.
    pub fn fit(&mut self, features: &AlignedFeatures, target: &[u8]) -> Result<()> {
        if self.is_fitted() {
            return Err(DelayError::AlreadyFitted);
        }
        if features.len() != target.len() {
            return Err(DelayError::ShapeMismatch {
                features: features.len(),
                labels: target.len(),
            });
        }

        let partition = train_test_split(features.len(), HOLDOUT_FRACTION, SPLIT_SEED);
        info!(
            training = partition.train.len(),
            testing = partition.holdout.len(),
            "Split data into training and held-out partitions"
        );
        if partition.train.is_empty() {
            return Err(DelayError::EmptyTrainingSet);
        }

        let x_train = features.select(&partition.train);
        let y_train: Vec<u8> = partition.train.iter().map(|&i| target[i]).collect();

        match imbalance_scale(&y_train) {
            Some(scale) => debug!(scale, "Computed class-imbalance scale"),
            None => warn!("Training partition has no delayed flights, keeping default weight"),
        }
        self.params.scale_pos_weight =
            resolve_scale_pos_weight(&y_train, self.params.scale_pos_weight);

        self.learner.fit(x_train.rows(), &y_train, &self.params)?;
        info!(
            scale_pos_weight = self.params.scale_pos_weight,
            "Delay classifier fitted"
        );

        self.state = State::Fitted {
            holdout: Holdout {
                features: features.select(&partition.holdout),
                target: partition.holdout.iter().map(|&i| target[i]).collect(),
            },
        };
        Ok(())
    }

    /// One label per row, in input order
    pub fn predict(&self, features: &AlignedFeatures) -> Result<Vec<u8>> {
        if !self.is_fitted() {
            return Err(DelayError::NotFitted);
        }
        debug!(rows = features.len(), "Running prediction");
        if features.is_empty() {
            return Ok(Vec::new());
        }

        let labels = self.learner.predict(features.rows())?;
        if labels.len() != features.len() || labels.iter().any(|&y| y > 1) {
            return Err(DelayError::Learner(format!(
                "learner returned {} labels for {} rows",
                labels.len(),
                features.len()
            )));
        }
        Ok(labels)
    }

    /// Metrics of the fitted model over its held-out partition
    pub fn evaluate(&self) -> Result<ClassificationReport> {
        let holdout = self.holdout().ok_or(DelayError::NotFitted)?;
        let predicted = self.predict(&holdout.features)?;
        Ok(ClassificationReport::new(&holdout.target, &predicted))
    }
}
