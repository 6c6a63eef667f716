//! High-level API for training and evaluating classifiers
//!
//! This module wraps the SVM ensemble and the decision tree in builder-style
//! entry points that work directly on [`Dataset`] values and CSV files.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rclassify::api::{SvmClassifier, TreeClassifier};
//! use rclassify::data::{train_test_split, CsvDataset};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = CsvDataset::from_file("iris.csv")?;
//! let (train, test) = train_test_split(&dataset, 0.2, 42)?;
//!
//! let svm = SvmClassifier::new()
//!     .with_learning_rate(0.001)
//!     .with_lambda(0.01)
//!     .with_iterations(1000)
//!     .fit(&train)?;
//! println!("{}", svm.analyze(&test)?);
//!
//! let tree = TreeClassifier::new().with_max_depth(5).fit(&train)?;
//! println!("Accuracy: {:.2}%", tree.evaluate(&test)?);
//! tree.save_flowchart("tree.mmd")?;
//! # Ok(())
//! # }
//! ```

use crate::core::{Classifier, Dataset, Prediction, Result, SgdConfig, TreeConfig};
use crate::data::CsvDataset;
use crate::metrics::{BinaryReport, MulticlassReport};
use crate::svm::MultiClassSvm;
use crate::tree::{DecisionTree, Node};
use std::path::Path;

/// One-vs-rest linear SVM with builder pattern
#[derive(Debug, Clone, Default)]
pub struct SvmClassifier {
    config: SgdConfig,
}

impl SvmClassifier {
    /// Create a classifier with default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier from an explicit configuration
    pub fn with_config(config: SgdConfig) -> Self {
        Self { config }
    }

    /// Set the sub-gradient step size
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    /// Set the L2 regularization strength
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.config.lambda = lambda;
        self
    }

    /// Set the number of passes over the training data
    pub fn with_iterations(mut self, n_iters: usize) -> Self {
        self.config.n_iters = n_iters;
        self
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    /// Train on a dataset
    pub fn fit(self, dataset: &Dataset) -> Result<TrainedSvm> {
        let mut model = MultiClassSvm::new(self.config);
        model.fit_dataset(dataset)?;
        Ok(TrainedSvm { model })
    }

    /// Train from a CSV file (automatically detects headers)
    pub fn train_from_csv<P: AsRef<Path>>(self, path: P) -> Result<TrainedSvm> {
        let dataset = CsvDataset::from_file(path)?;
        self.fit(&dataset)
    }
}

/// Fitted SVM ensemble with a dataset-level interface
#[derive(Debug, Clone)]
pub struct TrainedSvm {
    model: MultiClassSvm,
}

impl TrainedSvm {
    /// Predict one label per row
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<i64>> {
        self.model.predict(x)
    }

    /// Predict labels together with the winning scores
    pub fn predict_detailed(&self, x: &[Vec<f64>]) -> Result<Vec<Prediction>> {
        self.model.predict_detailed(x)
    }

    /// Accuracy on a dataset as a percentage
    pub fn evaluate(&self, dataset: &Dataset) -> Result<f64> {
        self.model.evaluate(dataset.features(), dataset.labels())
    }

    /// Per-class metrics on a dataset
    pub fn analyze(&self, dataset: &Dataset) -> Result<MulticlassReport> {
        self.model.analyze(dataset.features(), dataset.labels())
    }

    pub fn classes(&self) -> &[i64] {
        self.model.classes()
    }

    /// Get the underlying ensemble
    pub fn inner(&self) -> &MultiClassSvm {
        &self.model
    }
}

/// Entropy decision tree with builder pattern
#[derive(Debug, Clone, Default)]
pub struct TreeClassifier {
    config: TreeConfig,
}

impl TreeClassifier {
    /// Create a classifier with the default depth limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of split levels (0 = unlimited)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Train on a dataset
    pub fn fit(self, dataset: &Dataset) -> Result<TrainedTree> {
        let mut tree = DecisionTree::new(self.config);
        tree.fit_dataset(dataset)?;
        Ok(TrainedTree { tree })
    }

    /// Train from a CSV file (automatically detects headers)
    pub fn train_from_csv<P: AsRef<Path>>(self, path: P) -> Result<TrainedTree> {
        let dataset = CsvDataset::from_file(path)?;
        self.fit(&dataset)
    }
}

/// Fitted decision tree with a dataset-level interface
#[derive(Debug, Clone)]
pub struct TrainedTree {
    tree: DecisionTree,
}

impl TrainedTree {
    /// Predict one label per row
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<i64>> {
        self.tree.predict(x)
    }

    /// Accuracy on a dataset as a percentage
    pub fn evaluate(&self, dataset: &Dataset) -> Result<f64> {
        self.tree.evaluate(dataset.features(), dataset.labels())
    }

    /// Binary metrics on a dataset labelled with `{0, 1}`
    pub fn analyze(&self, dataset: &Dataset) -> Result<BinaryReport> {
        self.tree.analyze(dataset.features(), dataset.labels())
    }

    /// Per-class metrics for any label set
    pub fn analyze_multiclass(&self, dataset: &Dataset) -> Result<MulticlassReport> {
        let predictions = self.tree.predict(dataset.features())?;
        MulticlassReport::from_predictions(dataset.labels(), &predictions)
    }

    /// Render the tree as flowchart text
    pub fn to_flowchart(&self) -> Result<String> {
        self.tree.to_flowchart()
    }

    /// Write the flowchart to a file
    pub fn save_flowchart<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.tree.save_flowchart(path)
    }

    /// Get tree shape information
    pub fn info(&self) -> TreeInfo {
        TreeInfo {
            depth: self.tree.depth().unwrap_or(0),
            n_leaves: self.tree.n_leaves().unwrap_or(0),
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.tree.root()
    }

    /// Get the underlying tree
    pub fn inner(&self) -> &DecisionTree {
        &self.tree
    }
}

/// Shape of a fitted tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeInfo {
    pub depth: usize,
    pub n_leaves: usize,
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;
    use crate::data::train_test_split;

    /// Train an SVM ensemble on CSV data with default parameters
    pub fn train_svm_csv<P: AsRef<Path>>(path: P) -> Result<TrainedSvm> {
        SvmClassifier::new().train_from_csv(path)
    }

    /// Train a decision tree on CSV data with default parameters
    pub fn train_tree_csv<P: AsRef<Path>>(path: P) -> Result<TrainedTree> {
        TreeClassifier::new().train_from_csv(path)
    }

    /// Split, train a default SVM ensemble and report on the held-out part
    pub fn evaluate_svm(dataset: &Dataset, test_ratio: f64, seed: u64) -> Result<MulticlassReport> {
        let (train, test) = train_test_split(dataset, test_ratio, seed)?;
        SvmClassifier::new().fit(&train)?.analyze(&test)
    }

    /// Split, train a default tree and report binary metrics on the
    /// held-out part
    pub fn evaluate_tree(dataset: &Dataset, test_ratio: f64, seed: u64) -> Result<BinaryReport> {
        let (train, test) = train_test_split(dataset, test_ratio, seed)?;
        TreeClassifier::new().fit(&train)?.analyze(&test)
    }
}
