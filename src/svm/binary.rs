//! Binary linear SVM trained by hinge-loss sub-gradient descent

use crate::core::{check_width, validate_training_data, ClassifyError, Result, SgdConfig};
use crate::utils::columns::dot;
use log::debug;

/// Linear classifier `f(x) = w·x + b` separating `+1` from `-1`
///
/// Labels passed to [`fit`](BinarySvm::fit) are remapped: any value `<= 0`
/// becomes `-1`, everything else `+1`.
#[derive(Debug, Clone, Default)]
pub struct BinarySvm {
    config: SgdConfig,
    weights: Option<Vec<f64>>,
    bias: f64,
}

impl BinarySvm {
    /// Create an untrained model with the given hyperparameters
    pub fn new(config: SgdConfig) -> Self {
        Self {
            config,
            weights: None,
            bias: 0.0,
        }
    }

    /// Train from zero weights and zero bias
    ///
    /// Runs `n_iters` epochs over the samples in input order. For each
    /// sample with margin `y_i (w·x_i + b) >= 1` only the regularization
    /// decay `w -= lr * 2λw` is applied; otherwise
    /// `w -= lr * (2λw - y_i x_i)` and `b -= lr * y_i`.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[i64]) -> Result<()> {
        validate_training_data(x, y)?;
        self.config.validate()?;

        let lr = self.config.learning_rate;
        let lambda = self.config.lambda;
        let signs: Vec<f64> = y
            .iter()
            .map(|&label| if label <= 0 { -1.0 } else { 1.0 })
            .collect();

        let mut weights = vec![0.0; x[0].len()];
        let mut bias = 0.0;

        for _ in 0..self.config.n_iters {
            for (x_i, &y_i) in x.iter().zip(signs.iter()) {
                let margin = y_i * (dot(x_i, &weights) + bias);
                if margin >= 1.0 {
                    for w in weights.iter_mut() {
                        *w -= lr * (2.0 * lambda * *w);
                    }
                } else {
                    for (w, &x_ij) in weights.iter_mut().zip(x_i.iter()) {
                        *w -= lr * (2.0 * lambda * *w - y_i * x_ij);
                    }
                    bias -= lr * y_i;
                }
            }
        }

        debug!(
            "Binary SVM fitted on {} samples, {} features: bias={:.6}",
            x.len(),
            weights.len(),
            bias
        );

        self.weights = Some(weights);
        self.bias = bias;
        Ok(())
    }

    /// Raw decision value `w·x + b` for every row (not thresholded)
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        let weights = self.weights.as_ref().ok_or(ClassifyError::ModelNotTrained)?;
        check_width(x, weights.len())?;
        Ok(x.iter().map(|row| dot(row, weights) + self.bias).collect())
    }

    /// Raw decision value for a single row
    pub fn decision_value(&self, row: &[f64]) -> Result<f64> {
        let weights = self.weights.as_ref().ok_or(ClassifyError::ModelNotTrained)?;
        if row.len() != weights.len() {
            return Err(ClassifyError::DimensionMismatch {
                expected: weights.len(),
                actual: row.len(),
            });
        }
        Ok(dot(row, weights) + self.bias)
    }

    /// Trained weight vector, `None` before `fit`
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }
}
