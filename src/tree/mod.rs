//! Entropy-based binary decision tree
//!
//! The tree is grown recursively. At each node every feature and every
//! distinct value of that feature among the node's samples is tried as a
//! `<=` threshold, and the split with the largest information gain wins.
//! Growth stops at pure nodes, at `max_depth`, or when no value separates
//! the samples.

pub mod flowchart;
pub mod node;
pub mod split;

pub use self::node::*;
pub use self::split::*;

use crate::core::{
    check_width, validate_training_data, Classifier, ClassifyError, Result, TreeConfig,
};
use crate::metrics::BinaryReport;
use crate::utils::labels::{is_pure, majority_label};
use log::debug;

/// Decision tree classifier over integer labels
#[derive(Debug, Clone, Default)]
pub struct DecisionTree {
    config: TreeConfig,
    root: Option<Node>,
    n_features: usize,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            root: None,
            n_features: 0,
        }
    }

    /// Tree limited to `max_depth` levels of splits (0 = unlimited)
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self::new(TreeConfig { max_depth })
    }

    fn build_node(&self, x: &[Vec<f64>], y: &[i64], rows: &[usize], depth: usize) -> Result<Node> {
        let labels: Vec<i64> = rows.iter().map(|&row| y[row]).collect();
        let majority = majority_label(&labels).ok_or_else(|| {
            ClassifyError::InvalidInput("cannot grow a node from an empty subset".to_string())
        })?;

        let depth_reached = self.config.max_depth > 0 && depth >= self.config.max_depth;
        if is_pure(&labels) || depth_reached {
            return Ok(Node::leaf(majority));
        }

        let split = match best_split(x, y, rows) {
            Some(split) => split,
            None => return Ok(Node::leaf(majority)),
        };

        let (left_rows, right_rows) = partition(x, rows, split.feature, split.threshold);
        // Both sides are non-empty, so depth never exceeds the row count
        let left = self.build_node(x, y, &left_rows, depth + 1)?;
        let right = self.build_node(x, y, &right_rows, depth + 1)?;

        Ok(Node::internal(split.feature, split.threshold, left, right))
    }

    /// Binary metrics over the label space `{0, 1}` with `1` as positive
    ///
    /// Labels outside `{0, 1}` in either `y` or the predictions are an
    /// [`UnsupportedLabelSpace`](ClassifyError::UnsupportedLabelSpace) error;
    /// use [`MulticlassReport`](crate::metrics::MulticlassReport) for other
    /// label sets.
    pub fn analyze(&self, x: &[Vec<f64>], y: &[i64]) -> Result<BinaryReport> {
        if x.len() != y.len() {
            return Err(ClassifyError::InvalidInput(format!(
                "got {} samples but {} labels",
                x.len(),
                y.len()
            )));
        }
        let predictions = self.predict(x)?;
        BinaryReport::from_predictions(y, &predictions)
    }

    /// Root of the fitted tree, `None` before `fit`
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Depth of the fitted tree (a single leaf has depth 0)
    pub fn depth(&self) -> Option<usize> {
        self.root.as_ref().map(Node::depth)
    }

    pub fn n_leaves(&self) -> Option<usize> {
        self.root.as_ref().map(Node::n_leaves)
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }
}

impl Classifier for DecisionTree {
    fn fit(&mut self, x: &[Vec<f64>], y: &[i64]) -> Result<()> {
        validate_training_data(x, y)?;

        let rows: Vec<usize> = (0..x.len()).collect();
        let root = self.build_node(x, y, &rows, 0)?;
        debug!(
            "Decision tree fitted on {} samples: depth={}, leaves={}",
            x.len(),
            root.depth(),
            root.n_leaves()
        );

        self.n_features = x[0].len();
        self.root = Some(root);
        Ok(())
    }

    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<i64>> {
        let root = self.root.as_ref().ok_or(ClassifyError::ModelNotTrained)?;
        check_width(x, self.n_features)?;
        Ok(x.iter().map(|row| root.predict(row)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::ConfusionMatrix;

    fn grid() -> (Vec<Vec<f64>>, Vec<i64>) {
        (
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
            vec![0, 0, 1, 1],
        )
    }

    #[test]
    fn test_depth_one_stump_on_separable_grid() {
        let (x, y) = grid();
        let mut tree = DecisionTree::with_max_depth(1);
        tree.fit(&x, &y).unwrap();

        assert_eq!(
            tree.root(),
            Some(&Node::internal(0, 0.0, Node::leaf(0), Node::leaf(1)))
        );
        assert_eq!(tree.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_single_label_gives_single_leaf() {
        let x = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let y = vec![42, 42, 42];

        let mut tree = DecisionTree::with_max_depth(0);
        tree.fit(&x, &y).unwrap();

        assert_eq!(tree.root(), Some(&Node::leaf(42)));
        assert_eq!(tree.predict(&x).unwrap(), vec![42, 42, 42]);
        assert_eq!(tree.predict(&[vec![-100.0, 100.0]]).unwrap(), vec![42]);
    }

    #[test]
    fn test_zero_gain_split_is_still_taken() {
        // XOR: every root candidate has zero gain, yet splitting lets the
        // children separate the classes
        let x = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let y = vec![0, 1, 1, 0];

        let mut tree = DecisionTree::with_max_depth(0);
        tree.fit(&x, &y).unwrap();

        assert_eq!(tree.depth(), Some(2));
        assert_eq!(tree.n_leaves(), Some(4));
        assert_eq!(tree.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_inseparable_samples_become_majority_leaf() {
        let x = vec![vec![1.0], vec![1.0], vec![1.0]];
        let y = vec![0, 1, 1];

        let mut tree = DecisionTree::default();
        tree.fit(&x, &y).unwrap();
        assert_eq!(tree.root(), Some(&Node::leaf(1)));
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x: Vec<Vec<f64>> = (0..16).map(|i| vec![i as f64]).collect();
        let y: Vec<i64> = (0..16).map(|i| i % 2).collect();

        let mut shallow = DecisionTree::with_max_depth(2);
        shallow.fit(&x, &y).unwrap();
        assert!(shallow.depth().unwrap() <= 2);

        let mut full = DecisionTree::with_max_depth(0);
        full.fit(&x, &y).unwrap();
        assert_eq!(full.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_arbitrary_labels_and_repeatable_predictions() {
        let x = vec![vec![1.0], vec![2.0], vec![10.0], vec![11.0], vec![20.0]];
        let y = vec![-7, -7, 300, 300, 5];

        let mut tree = DecisionTree::with_max_depth(0);
        tree.fit(&x, &y).unwrap();

        let first = tree.predict(&x).unwrap();
        assert_eq!(first, y);
        assert_eq!(tree.predict(&x).unwrap(), first);
    }

    #[test]
    fn test_predictions_match_leaf_routing() {
        let x = vec![
            vec![2.7, 1.0],
            vec![1.3, 3.0],
            vec![3.6, 2.0],
            vec![7.5, 1.0],
            vec![9.0, 3.0],
            vec![7.4, 0.5],
        ];
        let y = vec![0, 0, 1, 1, 1, 0];

        let mut tree = DecisionTree::with_max_depth(2);
        tree.fit(&x, &y).unwrap();
        let root = tree.root().unwrap();

        let predictions = tree.predict(&x).unwrap();
        for (row, &pred) in x.iter().zip(predictions.iter()) {
            assert_eq!(root.predict(row), pred);
        }
    }

    #[test]
    fn test_refit_replaces_tree() {
        let (x, y) = grid();
        let mut tree = DecisionTree::with_max_depth(1);
        tree.fit(&x, &y).unwrap();
        tree.fit(&x, &[3, 3, 3, 3]).unwrap();
        assert_eq!(tree.root(), Some(&Node::leaf(3)));
    }

    #[test]
    fn test_analyze_binary() {
        let (x, y) = grid();
        let mut tree = DecisionTree::with_max_depth(1);
        tree.fit(&x, &y).unwrap();

        let report = tree.analyze(&x, &y).unwrap();
        assert_eq!(report.confusion, ConfusionMatrix::new(2, 2, 0, 0));
        assert_eq!(report.accuracy, 1.0);
        assert_eq!(report.mcc, 1.0);
    }

    #[test]
    fn test_analyze_rejects_non_binary_labels() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0]];
        let y = vec![0, 1, 2];
        let mut tree = DecisionTree::default();
        tree.fit(&x, &y).unwrap();

        assert!(matches!(
            tree.analyze(&x, &y),
            Err(ClassifyError::UnsupportedLabelSpace(_))
        ));
    }

    #[test]
    fn test_errors() {
        let tree = DecisionTree::default();
        assert!(matches!(
            tree.predict(&[vec![1.0]]),
            Err(ClassifyError::ModelNotTrained)
        ));

        let mut tree = DecisionTree::default();
        assert!(matches!(
            tree.fit(&[vec![1.0]], &[]),
            Err(ClassifyError::InvalidInput(_))
        ));
        assert!(matches!(
            tree.fit(&[vec![1.0], vec![]], &[0, 1]),
            Err(ClassifyError::InvalidInput(_))
        ));

        let (x, y) = grid();
        tree.fit(&x, &y).unwrap();
        assert!(matches!(
            tree.predict(&[vec![1.0]]),
            Err(ClassifyError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_evaluate_percentage() {
        let (x, y) = grid();
        let mut tree = DecisionTree::with_max_depth(1);
        tree.fit(&x, &y).unwrap();

        assert_eq!(tree.evaluate(&x, &y).unwrap(), 100.0);
        assert_eq!(tree.evaluate(&x, &[1, 1, 1, 1]).unwrap(), 50.0);
        assert!(tree.evaluate(&[], &[]).unwrap().is_nan());
    }

    #[test]
    fn test_unlimited_depth_on_alternating_labels() {
        let x: Vec<Vec<f64>> = (0..200).map(|i| vec![i as f64]).collect();
        let y: Vec<i64> = (0..200).map(|i| i % 2).collect();
        let mut tree = DecisionTree::with_max_depth(0);
        tree.fit(&x, &y).unwrap();

        // Every sample needs its own leaf
        assert_eq!(tree.n_leaves(), Some(200));
        assert!(tree.depth().unwrap() < 200);
        assert_eq!(tree.evaluate(&x, &y).unwrap(), 100.0);
    }
}
