//! Confusion matrix and the statistics derived from it
//!
//! Every ratio with a zero denominator evaluates to `f64::NAN`. Callers see
//! an undefined metric instead of a silently coerced zero.

use crate::core::{ClassifyError, Result};
use serde::Serialize;

/// Counts of a binary (or one-vs-rest) classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub true_negatives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    pub fn new(tp: usize, tn: usize, fp: usize, fn_: usize) -> Self {
        Self {
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }

    /// Count `class` as the positive label and every other label as negative
    pub fn one_vs_rest(y_true: &[i64], y_pred: &[i64], class: i64) -> Result<Self> {
        check_lengths(y_true, y_pred)?;

        let mut cm = Self::default();
        for (&actual, &pred) in y_true.iter().zip(y_pred.iter()) {
            match (actual == class, pred == class) {
                (true, true) => cm.true_positives += 1,
                (true, false) => cm.false_negatives += 1,
                (false, true) => cm.false_positives += 1,
                (false, false) => cm.true_negatives += 1,
            }
        }
        Ok(cm)
    }

    /// Count outcomes over the strict label space `{0, 1}`, with `1` positive
    pub fn binary(y_true: &[i64], y_pred: &[i64]) -> Result<Self> {
        check_lengths(y_true, y_pred)?;

        let mut cm = Self::default();
        for (i, (&actual, &pred)) in y_true.iter().zip(y_pred.iter()).enumerate() {
            match (actual, pred) {
                (1, 1) => cm.true_positives += 1,
                (1, 0) => cm.false_negatives += 1,
                (0, 1) => cm.false_positives += 1,
                (0, 0) => cm.true_negatives += 1,
                _ => {
                    return Err(ClassifyError::UnsupportedLabelSpace(format!(
                        "binary metrics require labels in {{0, 1}}, sample {i} has true label {actual} and prediction {pred}"
                    )))
                }
            }
        }
        Ok(cm)
    }

    /// Total number of counted samples
    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN)
    pub fn accuracy(&self) -> f64 {
        ratio(
            (self.true_positives + self.true_negatives) as f64,
            self.total() as f64,
        )
    }

    /// Calculate precision: TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives as f64,
            (self.true_positives + self.false_positives) as f64,
        )
    }

    /// Calculate recall (sensitivity): TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives as f64,
            (self.true_positives + self.false_negatives) as f64,
        )
    }

    /// Calculate F1 score: 2 * (precision * recall) / (precision + recall)
    pub fn f1_score(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        ratio(2.0 * p * r, p + r)
    }

    /// Calculate specificity: TN / (TN + FP)
    pub fn specificity(&self) -> f64 {
        ratio(
            self.true_negatives as f64,
            (self.true_negatives + self.false_positives) as f64,
        )
    }

    /// Mean of recall and specificity
    pub fn balanced_accuracy(&self) -> f64 {
        (self.recall() + self.specificity()) / 2.0
    }

    /// Matthews correlation coefficient
    ///
    /// (TP·TN − FP·FN) / sqrt((TP+FP)(TP+FN)(TN+FP)(TN+FN))
    pub fn mcc(&self) -> f64 {
        let tp = self.true_positives as f64;
        let tn = self.true_negatives as f64;
        let fp = self.false_positives as f64;
        let fn_ = self.false_negatives as f64;

        let numerator = tp * tn - fp * fn_;
        let denominator = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        ratio(numerator, denominator)
    }
}

/// Division that reports a zero denominator as NaN
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

fn check_lengths(y_true: &[i64], y_pred: &[i64]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(ClassifyError::InvalidInput(format!(
            "got {} true labels but {} predictions",
            y_true.len(),
            y_pred.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_confusion_metrics() {
        let cm = ConfusionMatrix::new(10, 5, 2, 3);

        assert_eq!(cm.total(), 20);
        assert_eq!(cm.accuracy(), 0.75);
        assert_eq!(cm.precision(), 10.0 / 12.0);
        assert_eq!(cm.recall(), 10.0 / 13.0);
        assert_eq!(cm.specificity(), 5.0 / 7.0);
        assert_relative_eq!(
            cm.f1_score(),
            2.0 * (10.0 / 12.0) * (10.0 / 13.0) / (10.0 / 12.0 + 10.0 / 13.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            cm.balanced_accuracy(),
            (10.0 / 13.0 + 5.0 / 7.0) / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_perfect_classifier() {
        let cm = ConfusionMatrix::new(5, 5, 0, 0);

        assert_eq!(cm.accuracy(), 1.0);
        assert_eq!(cm.precision(), 1.0);
        assert_eq!(cm.recall(), 1.0);
        assert_eq!(cm.f1_score(), 1.0);
        assert_eq!(cm.specificity(), 1.0);
        assert_eq!(cm.balanced_accuracy(), 1.0);
        assert_relative_eq!(cm.mcc(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mcc_all_wrong() {
        let cm = ConfusionMatrix::new(0, 0, 4, 6);
        assert_relative_eq!(cm.mcc(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mcc_known_value() {
        // (6*3 - 1*2) / sqrt(7 * 8 * 4 * 5)
        let cm = ConfusionMatrix::new(6, 3, 1, 2);
        assert_relative_eq!(cm.mcc(), 16.0 / 1120f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_denominators_are_undefined() {
        // Nothing predicted positive and nothing actually positive
        let cm = ConfusionMatrix::new(0, 4, 0, 0);

        assert_eq!(cm.accuracy(), 1.0);
        assert!(cm.precision().is_nan());
        assert!(cm.recall().is_nan());
        assert!(cm.f1_score().is_nan());
        assert_eq!(cm.specificity(), 1.0);
        assert!(cm.balanced_accuracy().is_nan());
        assert!(cm.mcc().is_nan());

        let empty = ConfusionMatrix::default();
        assert!(empty.accuracy().is_nan());
    }

    #[test]
    fn test_f1_undefined_when_precision_and_recall_are_zero() {
        let cm = ConfusionMatrix::new(0, 2, 3, 1);
        assert_eq!(cm.precision(), 0.0);
        assert_eq!(cm.recall(), 0.0);
        assert!(cm.f1_score().is_nan());
    }

    #[test]
    fn test_one_vs_rest_counts() {
        let y_true = [1, 2, 3, 1, 2, 3];
        let y_pred = [1, 2, 1, 1, 3, 3];

        let cm = ConfusionMatrix::one_vs_rest(&y_true, &y_pred, 1).unwrap();
        assert_eq!(cm, ConfusionMatrix::new(2, 3, 1, 0));

        let cm = ConfusionMatrix::one_vs_rest(&y_true, &y_pred, 2).unwrap();
        assert_eq!(cm, ConfusionMatrix::new(1, 4, 0, 1));
    }

    #[test]
    fn test_binary_counts() {
        let cm = ConfusionMatrix::binary(&[1, 1, 0, 0, 1], &[1, 0, 1, 0, 1]).unwrap();
        assert_eq!(cm, ConfusionMatrix::new(2, 1, 1, 1));
    }

    #[test]
    fn test_binary_rejects_other_labels() {
        let result = ConfusionMatrix::binary(&[0, 1, 2], &[0, 1, 1]);
        assert!(matches!(
            result,
            Err(ClassifyError::UnsupportedLabelSpace(_))
        ));

        let result = ConfusionMatrix::binary(&[0, 1], &[0, -1]);
        assert!(matches!(
            result,
            Err(ClassifyError::UnsupportedLabelSpace(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            ConfusionMatrix::one_vs_rest(&[1, 2], &[1], 1),
            Err(ClassifyError::InvalidInput(_))
        ));
    }
}
