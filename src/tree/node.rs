//! Decision tree nodes

/// A node of a fitted decision tree
///
/// Internal nodes own both children, so a tree is always acyclic and every
/// internal node has exactly two subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Terminal node predicting a single class label
    Leaf { label: i64 },
    /// Routes `x[feature] <= threshold` left and everything else right
    Internal {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(label: i64) -> Self {
        Node::Leaf { label }
    }

    pub fn internal(feature: usize, threshold: f64, left: Node, right: Node) -> Self {
        Node::Internal {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Follow the splits from this node down to a leaf label
    ///
    /// `row` must have more than `feature` entries for every split on the
    /// path; callers check the width up front.
    pub fn predict(&self, row: &[f64]) -> i64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { label } => return *label,
                Node::Internal {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Number of edges on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}
