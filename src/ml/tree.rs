// ============================================================
// Layer 5 — Regression Tree (CART)
// ============================================================
// One member of the forest. Grown top-down on a list of sample
// indices (a bootstrap resample may contain duplicates):
//
//   1. Node value = mean target of its samples
//   2. Stop if the node is pure, too small, or at max depth
//   3. Otherwise try every feature, visited in a random order,
//      and every threshold between consecutive distinct values;
//      keep the split with the lowest summed squared error
//   4. Recurse into left (x <= threshold) and right (x > threshold)
//
// Squared error is minimised through the equivalent proxy
//
//   sum_left² / n_left + sum_right² / n_right   (maximise)
//
// Nodes live in one flat Vec in pre-order, so a child index is
// always larger than its parent's. Prediction walks from node 0.

use rand::{rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// None grows until leaves are pure or too small
    pub max_depth:         Option<usize>,
    /// A node needs at least this many samples to be split
    pub min_samples_split: usize,
    /// Each child of a split keeps at least this many samples
    pub min_samples_leaf:  usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth:         None,
            min_samples_split: 2,
            min_samples_leaf:  1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

struct Split {
    feature:   usize,
    threshold: f64,
}

struct Grower<'a> {
    x:          &'a [Vec<f64>],
    y:          &'a [f64],
    params:     &'a TreeParams,
    n_features: usize,
    nodes:      Vec<TreeNode>,
}

impl RegressionTree {
    /// Grow a tree on the rows of `x`/`y` selected by `samples`.
    ///
    /// `samples` must be non-empty and every row of `x` must have
    /// the same width.
    pub fn fit(
        x:       &[Vec<f64>],
        y:       &[f64],
        samples: Vec<usize>,
        params:  &TreeParams,
        rng:     &mut StdRng,
    ) -> Self {
        let mut grower = Grower {
            x,
            y,
            params,
            n_features: x.first().map_or(0, Vec::len),
            nodes:      Vec::new(),
        };
        grower.grow(samples, 0, rng);
        Self { nodes: grower.nodes }
    }

    /// Walk from the root to a leaf. `features` must be at least
    /// as wide as the data the tree was grown on.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split { feature, threshold, left, right } => {
                    idx = if features[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, TreeNode::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], idx: usize) -> usize {
            match &nodes[idx] {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() { 0 } else { walk(&self.nodes, 0) }
    }

    /// Structural check for a decoded tree. A valid tree always
    /// terminates in `predict` and never indexes out of bounds.
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(format!("leaf {i} holds a non-finite value"));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= n_features {
                        return Err(format!("node {i} splits on feature {feature} of {n_features}"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i} has a non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {i} points at invalid child {child}"));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Grower<'_> {
    fn grow(&mut self, samples: Vec<usize>, depth: usize, rng: &mut StdRng) -> usize {
        let id    = self.nodes.len();
        let value = mean_of(self.y, &samples);
        self.nodes.push(TreeNode::Leaf { value });

        if !self.can_split(&samples, depth, value) {
            return id;
        }

        let Some(split) = self.best_split(&samples, rng) else {
            return id;
        };

        let x = self.x;
        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| x[i][split.feature] <= split.threshold);

        let left_id  = self.grow(left, depth + 1, rng);
        let right_id = self.grow(right, depth + 1, rng);

        self.nodes[id] = TreeNode::Split {
            feature:   split.feature,
            threshold: split.threshold,
            left:      left_id,
            right:     right_id,
        };
        id
    }

    fn can_split(&self, samples: &[usize], depth: usize, mean: f64) -> bool {
        let n = samples.len();
        if n < self.params.min_samples_split.max(2) || n < 2 * self.params.min_samples_leaf.max(1) {
            return false;
        }
        if self.params.max_depth.is_some_and(|max| depth >= max) {
            return false;
        }
        // Pure node: every target equals the mean
        samples.iter().any(|&i| self.y[i] != mean)
    }

    fn best_split(&self, samples: &[usize], rng: &mut StdRng) -> Option<Split> {
        let n         = samples.len();
        let min_leaf  = self.params.min_samples_leaf.max(1);
        let total_sum: f64 = samples.iter().map(|&i| self.y[i]).sum();

        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(rng);

        let mut best: Option<(f64, Split)> = None;
        let mut order = samples.to_vec();

        for feature in features {
            order.sort_by(|&a, &b| self.x[a][feature].total_cmp(&self.x[b][feature]));

            let mut left_sum = 0.0;
            for k in 0..n - 1 {
                left_sum += self.y[order[k]];

                let lo = self.x[order[k]][feature];
                let hi = self.x[order[k + 1]][feature];
                if hi <= lo {
                    continue;
                }

                let n_left  = k + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let right_sum = total_sum - left_sum;
                let score = left_sum * left_sum / n_left as f64
                    + right_sum * right_sum / n_right as f64;

                if best.as_ref().map_or(true, |(s, _)| score > *s) {
                    let mut threshold = lo + (hi - lo) / 2.0;
                    if threshold >= hi {
                        threshold = lo;
                    }
                    best = Some((score, Split { feature, threshold }));
                }
            }
        }

        best.map(|(_, split)| split)
    }
}

fn mean_of(y: &[f64], samples: &[usize]) -> f64 {
    samples.iter().map(|&i| y[i]).sum::<f64>() / samples.len() as f64
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn grow(x: &[Vec<f64>], y: &[f64], params: TreeParams) -> RegressionTree {
        let mut rng = StdRng::seed_from_u64(0);
        RegressionTree::fit(x, y, (0..y.len()).collect(), &params, &mut rng)
    }

    #[test]
    fn test_fully_grown_tree_memorises_distinct_rows() {
        let x: Vec<Vec<f64>> = (0..8).map(|i| vec![i as f64, (i % 2) as f64]).collect();
        let y: Vec<f64>      = (0..8).map(|i| (i * i) as f64).collect();
        let tree = grow(&x, &y, TreeParams::default());

        for (row, target) in x.iter().zip(&y) {
            assert_eq!(tree.predict(row), *target);
        }
        assert_eq!(tree.leaf_count(), 8);
        assert!(tree.validate(2).is_ok());
    }

    #[test]
    fn test_pure_node_is_a_single_leaf() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![7.0, 7.0, 7.0];
        let tree = grow(&x, &y, TreeParams::default());
        assert_eq!(tree.nodes(), [TreeNode::Leaf { value: 7.0 }]);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_constant_features_cannot_split() {
        let x = vec![vec![1.0], vec![1.0]];
        let y = vec![10.0, 20.0];
        let tree = grow(&x, &y, TreeParams::default());
        assert_eq!(tree.nodes(), [TreeNode::Leaf { value: 15.0 }]);
    }

    #[test]
    fn test_threshold_is_midpoint_and_best_feature_wins() {
        // Feature 1 separates the targets perfectly, feature 0 is noise
        let x = vec![
            vec![0.0, 1.0],
            vec![1.0, 1.0],
            vec![0.0, 5.0],
            vec![1.0, 5.0],
        ];
        let y = vec![1.0, 1.0, 9.0, 9.0];
        let tree = grow(&x, &y, TreeParams::default());
        match &tree.nodes()[0] {
            TreeNode::Split { feature, threshold, .. } => {
                assert_eq!(*feature, 1);
                assert_eq!(*threshold, 3.0);
            }
            other => panic!("expected split at root, got {other:?}"),
        }
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x: Vec<Vec<f64>> = (0..16).map(|i| vec![i as f64]).collect();
        let y: Vec<f64>      = (0..16).map(|i| i as f64).collect();
        let params = TreeParams { max_depth: Some(2), ..TreeParams::default() };
        let tree = grow(&x, &y, params);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn test_min_samples_leaf_respected() {
        let x: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64]).collect();
        let y = vec![0.0, 0.0, 0.0, 0.0, 0.0, 100.0];
        let params = TreeParams { min_samples_leaf: 2, ..TreeParams::default() };
        let tree = grow(&x, &y, params);
        // The outlier cannot be isolated in a leaf of its own
        assert_ne!(tree.predict(&[5.0]), 100.0);
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let tree = RegressionTree {
            nodes: vec![
                TreeNode::Split { feature: 0, threshold: 1.0, left: 0, right: 1 },
                TreeNode::Leaf { value: 1.0 },
            ],
        };
        assert!(tree.validate(1).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_feature() {
        let tree = RegressionTree {
            nodes: vec![
                TreeNode::Split { feature: 3, threshold: 1.0, left: 1, right: 2 },
                TreeNode::Leaf { value: 1.0 },
                TreeNode::Leaf { value: 2.0 },
            ],
        };
        assert!(tree.validate(3).is_err());
        assert!(tree.validate(4).is_ok());
    }
}
