//! One-vs-rest ensemble of binary linear SVMs

use crate::core::{
    check_width, validate_training_data, Classifier, ClassifyError, Prediction, Result, SgdConfig,
};
use crate::metrics::MulticlassReport;
use crate::svm::BinarySvm;
use crate::utils::labels::unique_labels;
use log::{debug, warn};

/// Multi-class SVM holding one binary model per training label
///
/// Classes keep the order in which they first appear in the training labels,
/// and `models()[i]` separates `classes()[i]` from every other label.
#[derive(Debug, Clone, Default)]
pub struct MultiClassSvm {
    config: SgdConfig,
    classes: Vec<i64>,
    models: Vec<BinarySvm>,
}

impl MultiClassSvm {
    /// Create an empty ensemble; members are created by `fit`
    pub fn new(config: SgdConfig) -> Self {
        Self {
            config,
            classes: Vec::new(),
            models: Vec::new(),
        }
    }

    /// Predict with the winning class score for every row
    ///
    /// The winner is the member with the strictly greatest raw score, so
    /// an exact tie keeps the class seen first during training.
    pub fn predict_detailed(&self, x: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        let first = self.models.first().ok_or(ClassifyError::ModelNotTrained)?;
        let n_features = first.weights().map_or(0, <[f64]>::len);
        check_width(x, n_features)?;

        x.iter()
            .map(|row| {
                let scores = self
                    .models
                    .iter()
                    .map(|svm| svm.decision_value(row))
                    .collect::<Result<Vec<f64>>>()?;

                let mut best: Option<usize> = None;
                let mut max_score = f64::NEG_INFINITY;
                for (j, &score) in scores.iter().enumerate() {
                    if score > max_score {
                        max_score = score;
                        best = Some(j);
                    }
                }

                let winner = best.unwrap_or(0);
                Ok(Prediction::new(self.classes[winner], scores[winner]))
            })
            .collect()
    }

    /// Per-class one-vs-rest metrics plus overall accuracy on `(x, y)`
    pub fn analyze(&self, x: &[Vec<f64>], y: &[i64]) -> Result<MulticlassReport> {
        if x.len() != y.len() {
            return Err(ClassifyError::InvalidInput(format!(
                "got {} samples but {} labels",
                x.len(),
                y.len()
            )));
        }
        let predictions = self.predict(x)?;
        MulticlassReport::from_predictions(y, &predictions)
    }

    /// Class labels in first-seen training order
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Member models, aligned with [`classes`](MultiClassSvm::classes)
    pub fn models(&self) -> &[BinarySvm] {
        &self.models
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        !self.models.is_empty()
    }
}

impl Classifier for MultiClassSvm {
    /// Train one binary SVM per unique label, relabelling `+1` for that
    /// label and `-1` for all others
    fn fit(&mut self, x: &[Vec<f64>], y: &[i64]) -> Result<()> {
        validate_training_data(x, y)?;
        self.config.validate()?;

        let classes = unique_labels(y);
        if classes.len() == 1 {
            warn!(
                "Training data contains a single class ({}), every prediction will be that class",
                classes[0]
            );
        }

        let models = classes
            .iter()
            .map(|&class| {
                let y_binary: Vec<i64> = y
                    .iter()
                    .map(|&label| if label == class { 1 } else { -1 })
                    .collect();
                let mut svm = BinarySvm::new(self.config.clone());
                svm.fit(x, &y_binary)?;
                debug!("Fitted one-vs-rest SVM for class {class}");
                Ok(svm)
            })
            .collect::<Result<Vec<_>>>()?;

        self.classes = classes;
        self.models = models;
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<i64>> {
        Ok(self
            .predict_detailed(x)?
            .into_iter()
            .map(|p| p.label)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_blobs() -> (Vec<Vec<f64>>, Vec<i64>) {
        let x = vec![
            vec![5.0, 0.0],
            vec![5.5, 0.5],
            vec![4.5, -0.5],
            vec![0.0, 5.0],
            vec![0.5, 5.5],
            vec![-0.5, 4.5],
            vec![-5.0, -5.0],
            vec![-5.5, -4.5],
            vec![-4.5, -5.5],
        ];
        let y = vec![10, 10, 10, 20, 20, 20, 30, 30, 30];
        (x, y)
    }

    #[test]
    fn test_one_model_per_class_in_first_seen_order() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let y = vec![7, -2, 7, 0];

        let mut svm = MultiClassSvm::new(SgdConfig::default());
        svm.fit(&x, &y).unwrap();

        assert_eq!(svm.classes(), &[7, -2, 0]);
        assert_eq!(svm.models().len(), 3);
        assert!(svm.models().iter().all(BinarySvm::is_fitted));
    }

    #[test]
    fn test_members_use_one_vs_rest_relabelling() {
        let (x, y) = three_blobs();
        let config = SgdConfig {
            n_iters: 50,
            ..SgdConfig::default()
        };

        let mut ensemble = MultiClassSvm::new(config.clone());
        ensemble.fit(&x, &y).unwrap();

        for (i, &class) in ensemble.classes().iter().enumerate() {
            let y_binary: Vec<i64> = y.iter().map(|&l| if l == class { 1 } else { -1 }).collect();
            let mut expected = BinarySvm::new(config.clone());
            expected.fit(&x, &y_binary).unwrap();

            assert_eq!(ensemble.models()[i].weights(), expected.weights());
            assert_eq!(ensemble.models()[i].bias(), expected.bias());
        }
    }

    #[test]
    fn test_three_class_training_accuracy() {
        let (x, y) = three_blobs();
        let mut svm = MultiClassSvm::new(SgdConfig::default());
        svm.fit(&x, &y).unwrap();

        assert_eq!(svm.predict(&x).unwrap(), y);
        assert_eq!(svm.evaluate(&x, &y).unwrap(), 100.0);
        assert!(svm.evaluate(&[], &[]).unwrap().is_nan());
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        // Zero epochs leave every member at w = 0, b = 0, so all scores tie
        let mut svm = MultiClassSvm::new(SgdConfig {
            n_iters: 0,
            ..SgdConfig::default()
        });
        svm.fit(&[vec![1.0], vec![2.0], vec![3.0]], &[4, 9, 2]).unwrap();

        let predictions = svm.predict_detailed(&[vec![0.5], vec![-8.0]]).unwrap();
        assert_eq!(predictions[0], Prediction::new(4, 0.0));
        assert_eq!(predictions[1].label, 4);
    }

    #[test]
    fn test_refit_replaces_classes() {
        let mut svm = MultiClassSvm::new(SgdConfig::default());
        svm.fit(&[vec![1.0], vec![-1.0]], &[1, 2]).unwrap();
        svm.fit(&[vec![1.0], vec![-1.0], vec![0.0]], &[5, 6, 7])
            .unwrap();

        assert_eq!(svm.classes(), &[5, 6, 7]);
        assert_eq!(svm.models().len(), 3);
    }

    #[test]
    fn test_analyze_reports_every_test_class() {
        let (x, y) = three_blobs();
        let mut svm = MultiClassSvm::new(SgdConfig::default());
        svm.fit(&x, &y).unwrap();

        let report = svm.analyze(&x, &y).unwrap();
        assert_eq!(report.overall_accuracy, 1.0);
        assert_eq!(report.classes.len(), 3);
        for class in &report.classes {
            assert_eq!(class.metrics.precision, 1.0);
            assert_eq!(class.metrics.recall, 1.0);
            assert_eq!(class.metrics.specificity, 1.0);
        }
    }

    #[test]
    fn test_errors() {
        let svm = MultiClassSvm::default();
        assert!(matches!(
            svm.predict(&[vec![1.0]]),
            Err(ClassifyError::ModelNotTrained)
        ));

        let mut svm = MultiClassSvm::new(SgdConfig::default());
        assert!(matches!(
            svm.fit(&[vec![1.0], vec![2.0]], &[1]),
            Err(ClassifyError::InvalidInput(_))
        ));
        assert!(!svm.is_fitted());

        svm.fit(&[vec![1.0, 2.0], vec![2.0, 1.0]], &[0, 1]).unwrap();
        assert!(matches!(
            svm.predict(&[vec![1.0]]),
            Err(ClassifyError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            svm.analyze(&[vec![1.0, 2.0]], &[0, 1]),
            Err(ClassifyError::InvalidInput(_))
        ));
    }
}
