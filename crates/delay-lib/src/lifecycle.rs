//! Lifecycle of the single classifier shared by all serving requests
//!
//! The classifier is fitted once from the training source and published
//! behind an `Arc`; readers never take a lock. A failed initialization is
//! remembered and only retried after an explicit `reset_failure`.

use crate::classifier::{DelayClassifier, GbdtLearner, Learner};
use crate::dataset::TrainingSource;
use crate::error::{DelayError, Result};
use crate::observability::{ServiceMetrics, StructuredLogger};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::Instant;
use tracing::{info, warn};

const FIT_PANICKED: &str = "fit pass panicked";

type LearnerFactory<L> = Box<dyn Fn() -> L + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum InitState {
    Pending,
    Failed(String),
}

/// Owner of the shared, fitted delay classifier
pub struct ModelManager<L: Learner = GbdtLearner> {
    source: Box<dyn TrainingSource>,
    make_learner: LearnerFactory<L>,
    model: OnceLock<Arc<DelayClassifier<L>>>,
    init: Mutex<InitState>,
    fit_passes: AtomicU64,
    metrics: ServiceMetrics,
    logger: StructuredLogger,
}

impl ModelManager<GbdtLearner> {
    pub fn new(source: impl TrainingSource + 'static) -> Self {
        Self::with_learner_factory(source, GbdtLearner::new)
    }
}

impl<L: Learner + 'static> ModelManager<L> {
    pub fn with_learner_factory(
        source: impl TrainingSource + 'static,
        make_learner: impl Fn() -> L + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Box::new(source),
            make_learner: Box::new(make_learner),
            model: OnceLock::new(),
            init: Mutex::new(InitState::Pending),
            fit_passes: AtomicU64::new(0),
            metrics: ServiceMetrics::new(),
            logger: StructuredLogger::new("model-manager"),
        }
    }

    /// Fit the shared classifier unless it is already fitted.
    ///
    /// Concurrent callers block until the single fit pass finishes and then
    /// observe its outcome. Blocks the calling thread.
    pub fn initialize(&self) -> Result<()> {
        if self.model.get().is_some() {
            return Ok(());
        }

        let mut state = self.lock_state();

        if self.model.get().is_some() {
            return Ok(());
        }
        if let InitState::Failed(reason) = &*state {
            return Err(DelayError::InitializationFailed(reason.clone()));
        }

        let started = Instant::now();
        match self.train() {
            Ok(classifier) => {
                let fit_secs = started.elapsed().as_secs_f64();
                let weight = classifier.params().scale_pos_weight;
                self.metrics.set_model_fitted(fit_secs, weight);
                self.logger
                    .log_model_initialized(&self.source.describe(), fit_secs, weight);
                // Only reachable once: the lock is held and the cell was empty.
                let _ = self.model.set(Arc::new(classifier));
                Ok(())
            }
            Err(e) => {
                self.logger
                    .log_model_initialization_failed(&self.source.describe(), &e.to_string());
                *state = InitState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Lock the init state, recovering it after a fit pass that panicked.
    ///
    /// A panic leaves the state `Pending` with no model; it is recorded as a
    /// failure so that it surfaces like any other and `reset_failure` applies.
    fn lock_state(&self) -> MutexGuard<'_, InitState> {
        match self.init.lock() {
            Ok(state) => state,
            Err(poisoned) => {
                let mut state = poisoned.into_inner();
                self.init.clear_poison();
                if *state == InitState::Pending && self.model.get().is_none() {
                    warn!(source = %self.source.describe(), "Previous fit pass panicked");
                    *state = InitState::Failed(FIT_PANICKED.to_string());
                }
                state
            }
        }
    }

    fn train(&self) -> Result<DelayClassifier<L>> {
        self.fit_passes.fetch_add(1, Ordering::SeqCst);
        info!(source = %self.source.describe(), "Initializing shared classifier");

        let data = self.source.load()?;
        let mut classifier = DelayClassifier::with_learner((self.make_learner)());
        let prepared = classifier.preprocess(&data, true)?;
        let target = prepared.target.unwrap_or_default();
        classifier.fit(&prepared.features, &target)?;
        Ok(classifier)
    }

    /// The fitted classifier, shared read-only
    pub fn get_model(&self) -> Result<Arc<DelayClassifier<L>>> {
        self.model.get().cloned().ok_or(DelayError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.model.get().is_some()
    }

    /// Number of fit passes started by this manager
    pub fn fit_passes(&self) -> u64 {
        self.fit_passes.load(Ordering::SeqCst)
    }

    /// Last initialization failure, if it has not been reset
    pub fn failure(&self) -> Option<String> {
        match &*self.lock_state() {
            InitState::Failed(reason) => Some(reason.clone()),
            InitState::Pending => None,
        }
    }

    /// Operator action: allow the next `initialize` call to try again.
    pub fn reset_failure(&self) {
        *self.lock_state() = InitState::Pending;
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}
