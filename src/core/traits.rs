//! Core traits for the classifiers

use crate::core::{ClassifyError, Dataset, Result};

/// A model that learns integer class labels from dense feature rows
pub trait Classifier: Send + Sync {
    /// Train on `x` with one label per row, replacing any previous state
    fn fit(&mut self, x: &[Vec<f64>], y: &[i64]) -> Result<()>;

    /// Predict one class label per row
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<i64>>;

    /// Train on a validated dataset
    fn fit_dataset(&mut self, dataset: &Dataset) -> Result<()> {
        self.fit(dataset.features(), dataset.labels())
    }

    /// Percentage (0-100) of rows whose predicted label equals the true label
    ///
    /// Empty input has no defined accuracy and yields NaN.
    fn evaluate(&self, x: &[Vec<f64>], y: &[i64]) -> Result<f64> {
        if x.len() != y.len() {
            return Err(ClassifyError::InvalidInput(format!(
                "got {} samples but {} labels",
                x.len(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Ok(f64::NAN);
        }

        let predictions = self.predict(x)?;
        let correct = predictions
            .iter()
            .zip(y.iter())
            .filter(|(pred, actual)| pred == actual)
            .count();

        Ok(correct as f64 / y.len() as f64 * 100.0)
    }
}
