//! Core type definitions shared by the classifiers

use crate::core::{ClassifyError, Result};

/// Prediction result containing the winning class and its decision value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// Predicted class label
    pub label: i64,
    /// Raw decision function value of the winning classifier
    pub decision_value: f64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: i64, decision_value: f64) -> Self {
        Self {
            label,
            decision_value,
        }
    }

    /// Get confidence as absolute value of decision value
    pub fn confidence(&self) -> f64 {
        self.decision_value.abs()
    }
}

/// Labelled sample matrix with a constant feature count
///
/// Rows always share one feature count. [`Dataset::new`] and the CSV loader
/// also reject empty input, but the test part returned by
/// [`train_test_split`](crate::data::train_test_split) may be empty, so an
/// empty `Dataset` is not a valid training set.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<i64>,
}

impl Dataset {
    /// Create a dataset, rejecting empty, ragged or mismatched input
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<i64>) -> Result<Self> {
        validate_training_data(&features, &labels)?;
        Ok(Self { features, labels })
    }

    /// Build a dataset from rows already known to be valid
    pub(crate) fn from_parts(features: Vec<Vec<f64>>, labels: Vec<i64>) -> Self {
        Self { features, labels }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of features per sample
    pub fn dim(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    /// Consume the dataset, returning `(X, y)`
    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<i64>) {
        (self.features, self.labels)
    }
}

/// Hyperparameters for hinge-loss sub-gradient descent
#[derive(Debug, Clone, PartialEq)]
pub struct SgdConfig {
    /// Step size applied to every update
    pub learning_rate: f64,
    /// L2 regularization strength
    pub lambda: f64,
    /// Number of full passes over the training samples
    pub n_iters: usize,
}

impl Default for SgdConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            lambda: 0.01,
            n_iters: 1000,
        }
    }
}

impl SgdConfig {
    /// Check that the hyperparameters describe a usable descent
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ClassifyError::InvalidParameter(format!(
                "learning rate must be positive and finite, got: {}",
                self.learning_rate
            )));
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(ClassifyError::InvalidParameter(format!(
                "lambda must be non-negative and finite, got: {}",
                self.lambda
            )));
        }
        Ok(())
    }
}

/// Growth limits for the decision tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    /// Maximum depth of the tree, 0 means unlimited
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { max_depth: 5 }
    }
}

/// Validate a training pair: non-empty, equal lengths, equal-width non-empty rows
pub fn validate_training_data(x: &[Vec<f64>], y: &[i64]) -> Result<()> {
    if x.is_empty() {
        return Err(ClassifyError::InvalidInput(
            "training data contains no samples".to_string(),
        ));
    }
    if x.len() != y.len() {
        return Err(ClassifyError::InvalidInput(format!(
            "got {} samples but {} labels",
            x.len(),
            y.len()
        )));
    }
    validate_rows(x)?;
    Ok(())
}

/// Validate that all rows are non-empty and share one width, returning it
pub fn validate_rows(x: &[Vec<f64>]) -> Result<usize> {
    let width = x.first().map_or(0, Vec::len);
    for (i, row) in x.iter().enumerate() {
        if row.is_empty() {
            return Err(ClassifyError::InvalidInput(format!(
                "sample {i} has an empty feature vector"
            )));
        }
        if row.len() != width {
            return Err(ClassifyError::InvalidInput(format!(
                "sample {i} has {} features, expected {width}",
                row.len()
            )));
        }
    }
    Ok(width)
}

/// Check that every row has exactly `expected` features
pub(crate) fn check_width(x: &[Vec<f64>], expected: usize) -> Result<()> {
    match x.iter().find(|row| row.len() != expected) {
        Some(row) => Err(ClassifyError::DimensionMismatch {
            expected,
            actual: row.len(),
        }),
        None => Ok(()),
    }
}
