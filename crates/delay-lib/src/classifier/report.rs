//! Held-out classification metrics

use serde::Serialize;

/// Precision, recall and F1 for one label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

impl ClassMetrics {
    fn compute(truth: &[u8], predicted: &[u8], label: u8) -> Self {
        let mut tp = 0usize;
        let mut fp = 0usize;
        let mut fn_ = 0usize;
        for (&t, &p) in truth.iter().zip(predicted) {
            match (t == label, p == label) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            precision,
            recall,
            f1_score,
            support: tp + fn_,
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Per-label metrics over a labelled partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub on_time: ClassMetrics,
    pub delayed: ClassMetrics,
    pub accuracy: f64,
    pub rows: usize,
}

impl ClassificationReport {
    /// Compare predicted labels against the truth, row by row
    pub fn new(truth: &[u8], predicted: &[u8]) -> Self {
        let rows = truth.len().min(predicted.len());
        let truth = &truth[..rows];
        let predicted = &predicted[..rows];
        let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();

        Self {
            on_time: ClassMetrics::compute(truth, predicted, 0),
            delayed: ClassMetrics::compute(truth, predicted, 1),
            accuracy: ratio(correct, rows),
            rows,
        }
    }
}
