//! CART decision-tree classifier.
//!
//! # Algorithm
//!
//! Recursive binary splitting on axis-aligned thresholds, chosen to minimize
//! Gini impurity. Candidate thresholds are the midpoints between consecutive
//! distinct feature values. The tree is grown until nodes are pure (or no
//! split improves impurity), so it reproduces a deterministic labeling of a
//! conflict-free training set exactly. Construction is fully deterministic:
//! features are scanned in order and only strictly better splits are kept.
//!
//! # Reference
//! Breiman et al. (1984), "Classification and Regression Trees"

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Leaf {
        label: u8,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted binary decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Fits a tree to the given rows and 0/1 labels.
    ///
    /// An empty training set yields a constant-0 tree.
    pub fn fit(rows: &[Vec<f64>], labels: &[u8]) -> Self {
        let indices: Vec<usize> = (0..rows.len().min(labels.len())).collect();
        Self {
            root: build(rows, labels, &indices),
        }
    }

    /// Predicts the label for one feature vector.
    pub fn predict(&self, features: &[f64]) -> u8 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { label } => return *label,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }
}

fn build(rows: &[Vec<f64>], labels: &[u8], indices: &[usize]) -> Node {
    if indices.is_empty() {
        return Node::Leaf { label: 0 };
    }

    let positives = indices.iter().filter(|&&i| labels[i] == 1).count();
    if positives == 0 {
        return Node::Leaf { label: 0 };
    }
    if positives == indices.len() {
        return Node::Leaf { label: 1 };
    }

    match best_split(rows, labels, indices) {
        Some((feature, threshold)) => {
            let (left, right): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .copied()
                .partition(|&i| rows[i][feature] <= threshold);
            Node::Split {
                feature,
                threshold,
                left: Box::new(build(rows, labels, &left)),
                right: Box::new(build(rows, labels, &right)),
            }
        }
        // Conflicting labels on identical feature vectors: majority leaf.
        None => Node::Leaf {
            label: u8::from(2 * positives > indices.len()),
        },
    }
}

/// Finds the (feature, threshold) pair minimizing weighted Gini impurity,
/// or `None` when no split separates the rows.
fn best_split(rows: &[Vec<f64>], labels: &[u8], indices: &[usize]) -> Option<(usize, f64)> {
    let features = rows[indices[0]].len();
    let total = indices.len() as f64;
    let mut best: Option<(usize, f64)> = None;
    let mut best_impurity = f64::INFINITY;

    for feature in 0..features {
        let mut values: Vec<f64> = indices.iter().map(|&i| rows[i][feature]).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let mut left = [0_usize; 2];
            let mut right = [0_usize; 2];
            for &i in indices {
                let side = if rows[i][feature] <= threshold {
                    &mut left
                } else {
                    &mut right
                };
                side[labels[i] as usize] += 1;
            }
            let nl = (left[0] + left[1]) as f64;
            let nr = (right[0] + right[1]) as f64;
            let impurity = (nl * gini(left) + nr * gini(right)) / total;
            if impurity < best_impurity {
                best_impurity = impurity;
                best = Some((feature, threshold));
            }
        }
    }

    best
}

fn gini(counts: [usize; 2]) -> f64 {
    let n = (counts[0] + counts[1]) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let p0 = counts[0] as f64 / n;
    let p1 = counts[1] as f64 / n;
    1.0 - p0 * p0 - p1 * p1
}
