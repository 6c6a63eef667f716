//! Linear SVM and entropy decision tree classifiers
//!
//! Two supervised learners over dense `f64` feature rows and integer class
//! labels:
//!
//! - a one-vs-rest ensemble of linear SVMs trained by hinge-loss
//!   sub-gradient descent ([`MultiClassSvm`])
//! - a recursive entropy decision tree with `<=` threshold splits
//!   ([`DecisionTree`])
//!
//! Both are evaluated with a shared confusion-matrix metrics engine.

pub mod api;
pub mod core;
pub mod data;
pub mod metrics;
pub mod svm;
pub mod tree;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{SvmClassifier, TrainedSvm, TrainedTree, TreeClassifier, TreeInfo};
pub use crate::core::error::*;
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::data::{train_test_split, CsvDataset, CsvOptions};
pub use crate::metrics::{BinaryReport, ClassMetrics, ClassReport, ConfusionMatrix, MulticlassReport};
pub use crate::svm::{BinarySvm, MultiClassSvm};
pub use crate::tree::{DecisionTree, Node};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
