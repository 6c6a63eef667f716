//! Entropy-based split search

use crate::utils::columns::unique_column_values;
use crate::utils::labels::label_counts;

/// A `(feature, threshold)` split and the information gain it achieves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    pub feature: usize,
    pub threshold: f64,
    pub gain: f64,
}

/// Shannon entropy (base 2) of the label distribution
///
/// Only labels that occur contribute, so `0·log2(0)` never arises.
pub fn entropy(y: &[i64]) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    let total = y.len() as f64;
    label_counts(y)
        .into_iter()
        .map(|(_, count)| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Parent entropy minus the size-weighted entropy of the two children
pub fn information_gain(parent: &[i64], left: &[i64], right: &[i64]) -> f64 {
    weighted_gain(entropy(parent), parent.len(), left, right)
}

fn weighted_gain(parent_entropy: f64, n: usize, left: &[i64], right: &[i64]) -> f64 {
    let n = n as f64;
    let left_weight = left.len() as f64 / n;
    let right_weight = right.len() as f64 / n;
    parent_entropy - (left_weight * entropy(left) + right_weight * entropy(right))
}

/// Split `rows` into `x[row][feature] <= threshold` and the rest
pub fn partition(
    x: &[Vec<f64>],
    rows: &[usize],
    feature: usize,
    threshold: f64,
) -> (Vec<usize>, Vec<usize>) {
    rows.iter()
        .copied()
        .partition(|&row| x[row][feature] <= threshold)
}

/// Every valid split of `rows`, in evaluation order
///
/// Features are visited by index and thresholds in the order their values
/// first appear in the column. Candidates leaving one side empty are skipped.
pub fn candidate_splits(x: &[Vec<f64>], y: &[i64], rows: &[usize]) -> Vec<Split> {
    let mut candidates = Vec::new();
    for_each_candidate(x, y, rows, |split| candidates.push(split));
    candidates
}

/// The candidate with the highest gain; ties keep the earliest candidate
///
/// Returns `None` if no feature value separates `rows`.
pub fn best_split(x: &[Vec<f64>], y: &[i64], rows: &[usize]) -> Option<Split> {
    let mut best: Option<Split> = None;
    let mut best_gain = f64::NEG_INFINITY;
    for_each_candidate(x, y, rows, |split| {
        if split.gain > best_gain {
            best_gain = split.gain;
            best = Some(split);
        }
    });
    best
}

fn for_each_candidate<F: FnMut(Split)>(x: &[Vec<f64>], y: &[i64], rows: &[usize], mut visit: F) {
    let n_features = match rows.first() {
        Some(&row) => x[row].len(),
        None => return,
    };
    let labels: Vec<i64> = rows.iter().map(|&row| y[row]).collect();
    let parent_entropy = entropy(&labels);

    for feature in 0..n_features {
        for threshold in unique_column_values(x, rows, feature) {
            let mut left = Vec::new();
            let mut right = Vec::new();
            for &row in rows {
                if x[row][feature] <= threshold {
                    left.push(y[row]);
                } else {
                    right.push(y[row]);
                }
            }
            if left.is_empty() || right.is_empty() {
                continue;
            }
            visit(Split {
                feature,
                threshold,
                gain: weighted_gain(parent_entropy, rows.len(), &left, &right),
            });
        }
    }
}
