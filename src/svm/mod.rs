//! Linear support vector machines
//!
//! [`BinarySvm`] is trained by hinge-loss sub-gradient descent and returns
//! raw decision values. [`MultiClassSvm`] combines one binary model per
//! class label and predicts the label with the highest score.

pub mod binary;
pub mod multiclass;

pub use self::binary::*;
pub use self::multiclass::*;
