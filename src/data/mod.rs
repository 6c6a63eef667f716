//! Dataset loading and splitting
//!
//! Loaders produce a validated [`Dataset`](crate::core::Dataset); the
//! classifiers themselves only ever see plain `(X, y)` slices.

pub mod csv;
pub mod split;

pub use self::csv::*;
pub use self::split::*;
