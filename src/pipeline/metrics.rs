//! Binary classification metrics and confusion matrix

use serde::Serialize;

use super::error::{PipelineError, Result};

/// Accuracy, precision, recall and F1 for the positive class (label 1).
///
/// Precision, recall and F1 are reported as `0.0` when undefined, i.e. when
/// the positive class is never predicted or never present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// 2x2 counts: rows are actual classes, columns predicted classes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMatrix {
    pub labels: [f64; 2],
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn true_negatives(&self) -> usize {
        self.counts[0][0]
    }

    pub fn false_positives(&self) -> usize {
        self.counts[0][1]
    }

    pub fn false_negatives(&self) -> usize {
        self.counts[1][0]
    }

    pub fn true_positives(&self) -> usize {
        self.counts[1][1]
    }
}

/// Score predictions against the true labels
pub fn evaluate(y_true: &[f64], y_pred: &[f64]) -> Result<ClassificationMetrics> {
    let cm = confusion_matrix(y_true, y_pred, [0.0, 1.0])?;

    let tp = cm.true_positives() as f64;
    let fp = cm.false_positives() as f64;
    let fn_ = cm.false_negatives() as f64;
    let tn = cm.true_negatives() as f64;

    let precision = safe_ratio(tp, tp + fp);
    let recall = safe_ratio(tp, tp + fn_);
    let f1 = safe_ratio(2.0 * precision * recall, precision + recall);

    Ok(ClassificationMetrics {
        accuracy: (tp + tn) / cm.total() as f64,
        precision,
        recall,
        f1,
    })
}

/// Count actual-vs-predicted pairs, ordered by `labels`.
///
/// Every value in both slices must be one of `labels`.
pub fn confusion_matrix(y_true: &[f64], y_pred: &[f64], labels: [f64; 2]) -> Result<ConfusionMatrix> {
    if y_true.len() != y_pred.len() {
        return Err(PipelineError::Shape(format!(
            "{} true labels but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(PipelineError::Shape(
            "cannot score an empty prediction set".to_string(),
        ));
    }

    let position = |value: f64| -> Result<usize> {
        labels
            .iter()
            .position(|&l| l == value)
            .ok_or_else(|| PipelineError::Shape(format!("unexpected label {value}")))
    };

    let mut counts = [[0usize; 2]; 2];
    for (&actual, &predicted) in y_true.iter().zip(y_pred) {
        counts[position(actual)?][position(predicted)?] += 1;
    }

    Ok(ConfusionMatrix { labels, counts })
}

fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
