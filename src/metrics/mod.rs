//! Confusion-matrix metrics engine
//!
//! Shared by the SVM ensemble (per-class one-vs-rest analysis) and the
//! decision tree (binary `{0, 1}` analysis).

pub mod confusion;
pub mod report;

pub use self::confusion::*;
pub use self::report::*;
