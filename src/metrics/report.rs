//! Structured evaluation reports
//!
//! Reports are plain records: `Display` renders the textual report and
//! `Serialize` yields a `class -> metric -> value` mapping in which
//! undefined (NaN) metrics become `null`.

use crate::core::{ClassifyError, Result};
use crate::metrics::ConfusionMatrix;
use crate::utils::labels::unique_labels;
use serde::Serialize;
use std::fmt;

/// One-vs-rest statistics for a single class
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub specificity: f64,
}

impl From<&ConfusionMatrix> for ClassMetrics {
    fn from(cm: &ConfusionMatrix) -> Self {
        Self {
            accuracy: cm.accuracy(),
            precision: cm.precision(),
            recall: cm.recall(),
            f1_score: cm.f1_score(),
            specificity: cm.specificity(),
        }
    }
}

/// Confusion counts and metrics for one class label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub label: i64,
    pub confusion: ConfusionMatrix,
    pub metrics: ClassMetrics,
}

/// Overall accuracy plus per-class one-vs-rest metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MulticlassReport {
    /// Fraction (0-1) of exactly matching labels
    pub overall_accuracy: f64,
    /// Per-class reports, in first-seen order of the true labels
    pub classes: Vec<ClassReport>,
}

impl MulticlassReport {
    /// Build the report from true labels and predictions
    pub fn from_predictions(y_true: &[i64], y_pred: &[i64]) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(ClassifyError::InvalidInput(format!(
                "got {} true labels but {} predictions",
                y_true.len(),
                y_pred.len()
            )));
        }

        let classes = unique_labels(y_true)
            .into_iter()
            .map(|label| {
                let confusion = ConfusionMatrix::one_vs_rest(y_true, y_pred, label)?;
                Ok(ClassReport {
                    label,
                    metrics: ClassMetrics::from(&confusion),
                    confusion,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(actual, pred)| actual == pred)
            .count();
        let overall_accuracy = if y_true.is_empty() {
            f64::NAN
        } else {
            correct as f64 / y_true.len() as f64
        };

        Ok(Self {
            overall_accuracy,
            classes,
        })
    }

    /// Look up the report for one class label
    pub fn class(&self, label: i64) -> Option<&ClassReport> {
        self.classes.iter().find(|c| c.label == label)
    }
}

impl fmt::Display for MulticlassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Overall Accuracy: {}", format_metric(self.overall_accuracy))?;
        writeln!(f, "Metrics per class:")?;
        for class in &self.classes {
            let m = &class.metrics;
            writeln!(f)?;
            writeln!(f, "Class {}:", class.label)?;
            writeln!(f, "  Accuracy: {}", format_metric(m.accuracy))?;
            writeln!(f, "  Precision: {}", format_metric(m.precision))?;
            writeln!(f, "  Recall: {}", format_metric(m.recall))?;
            writeln!(f, "  F1-Score: {}", format_metric(m.f1_score))?;
            writeln!(f, "  Specificity: {}", format_metric(m.specificity))?;
        }
        Ok(())
    }
}

/// Full binary evaluation over the label space `{0, 1}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryReport {
    pub confusion: ConfusionMatrix,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub specificity: f64,
    pub balanced_accuracy: f64,
    pub mcc: f64,
}

impl BinaryReport {
    /// Build the report from `{0, 1}` labels and predictions
    pub fn from_predictions(y_true: &[i64], y_pred: &[i64]) -> Result<Self> {
        let confusion = ConfusionMatrix::binary(y_true, y_pred)?;
        Ok(Self::from(confusion))
    }
}

impl From<ConfusionMatrix> for BinaryReport {
    fn from(confusion: ConfusionMatrix) -> Self {
        Self {
            accuracy: confusion.accuracy(),
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1_score: confusion.f1_score(),
            specificity: confusion.specificity(),
            balanced_accuracy: confusion.balanced_accuracy(),
            mcc: confusion.mcc(),
            confusion,
        }
    }
}

impl fmt::Display for BinaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evaluation Metrics:")?;
        writeln!(f, "--------------------")?;
        writeln!(
            f,
            "TP: {}  FP: {}  TN: {}  FN: {}",
            self.confusion.true_positives,
            self.confusion.false_positives,
            self.confusion.true_negatives,
            self.confusion.false_negatives
        )?;
        writeln!(f, "Accuracy: {}", format_metric(self.accuracy))?;
        writeln!(f, "Precision: {}", format_metric(self.precision))?;
        writeln!(f, "Recall (Sensitivity): {}", format_metric(self.recall))?;
        writeln!(f, "F1-Score: {}", format_metric(self.f1_score))?;
        writeln!(f, "Specificity: {}", format_metric(self.specificity))?;
        writeln!(
            f,
            "Balanced Accuracy: {}",
            format_metric(self.balanced_accuracy)
        )?;
        writeln!(
            f,
            "Matthews Correlation Coefficient (MCC): {}",
            format_metric(self.mcc)
        )
    }
}

/// Four decimals, or `undefined` for NaN
pub fn format_metric(value: f64) -> String {
    if value.is_nan() {
        "undefined".to_string()
    } else {
        format!("{value:.4}")
    }
}
