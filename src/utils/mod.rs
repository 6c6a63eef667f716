//! Utility functions shared by the classifiers and the metrics engine

/// Label bookkeeping with deterministic first-seen ordering
pub mod labels {
    use std::collections::{HashMap, HashSet};

    /// Distinct labels in the order they first appear
    pub fn unique_labels(y: &[i64]) -> Vec<i64> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for &label in y {
            if seen.insert(label) {
                unique.push(label);
            }
        }
        unique
    }

    /// Occurrence count of each label, ordered by first appearance
    pub fn label_counts(y: &[i64]) -> Vec<(i64, usize)> {
        let mut position: HashMap<i64, usize> = HashMap::new();
        let mut counts: Vec<(i64, usize)> = Vec::new();
        for &label in y {
            match position.get(&label) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    position.insert(label, counts.len());
                    counts.push((label, 1));
                }
            }
        }
        counts
    }

    /// Most frequent label; ties go to the label seen first
    ///
    /// Returns `None` for an empty slice.
    pub fn majority_label(y: &[i64]) -> Option<i64> {
        let mut best: Option<(i64, usize)> = None;
        for (label, count) in label_counts(y) {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((label, count)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// True if every label is equal (vacuously true when empty)
    pub fn is_pure(y: &[i64]) -> bool {
        y.windows(2).all(|w| w[0] == w[1])
    }
}

/// Column access over row-major feature matrices
pub mod columns {
    /// Distinct values of one feature column in row order
    ///
    /// Values are compared by bit pattern, so `0.0` and `-0.0` are distinct
    /// candidates and every NaN payload is its own value.
    pub fn unique_column_values(x: &[Vec<f64>], rows: &[usize], feature: usize) -> Vec<f64> {
        let mut seen = std::collections::HashSet::new();
        let mut values = Vec::new();
        for &row in rows {
            let value = x[row][feature];
            if seen.insert(value.to_bits()) {
                values.push(value);
            }
        }
        values
    }

    /// Dot product of two equally long slices
    pub fn dot(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::columns::*;
    use super::labels::*;

    #[test]
    fn test_unique_labels_first_seen_order() {
        assert_eq!(unique_labels(&[3, 1, 3, 7, 1, -2]), vec![3, 1, 7, -2]);
        assert!(unique_labels(&[]).is_empty());
    }

    #[test]
    fn test_label_counts() {
        assert_eq!(label_counts(&[5, 2, 5, 5, 2, 9]), vec![(5, 3), (2, 2), (9, 1)]);
    }

    #[test]
    fn test_majority_label() {
        assert_eq!(majority_label(&[1, 0, 0, 1, 0]), Some(0));
        assert_eq!(majority_label(&[4]), Some(4));
        assert_eq!(majority_label(&[]), None);
    }

    #[test]
    fn test_majority_label_tie_goes_to_first_seen() {
        assert_eq!(majority_label(&[2, 1, 1, 2]), Some(2));
        assert_eq!(majority_label(&[1, 2, 2, 1]), Some(1));
    }

    #[test]
    fn test_is_pure() {
        assert!(is_pure(&[1, 1, 1]));
        assert!(is_pure(&[]));
        assert!(!is_pure(&[1, 0]));
    }

    #[test]
    fn test_unique_column_values() {
        let x = vec![vec![1.0, 5.0], vec![0.5, 5.0], vec![1.0, 3.0]];
        assert_eq!(unique_column_values(&x, &[0, 1, 2], 0), vec![1.0, 0.5]);
        assert_eq!(unique_column_values(&x, &[2, 0], 1), vec![3.0, 5.0]);
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
    }
}
