// ============================================================
// Layer 5 — Random Forest Regressor
// ============================================================
// Stage 2 of the pipeline: an ensemble of regression trees.
//
//   master RNG (seed) ──▶ tree seed 1 ──▶ bootstrap + grow tree 1
//                     ──▶ tree seed 2 ──▶ bootstrap + grow tree 2
//                     ...
//   prediction = mean of every tree's prediction
//
// Each tree sees a bootstrap resample: n draws with replacement
// from the n training rows. Tree seeds are drawn in order from a
// single master RNG, so the whole forest is a pure function of
// (data, config).

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::error::{SalaryError, SalaryResult};
use crate::domain::traits::Regressor;
use crate::ml::tree::{RegressionTree, TreeParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: usize,
    pub seed:         u64,
    /// false grows every tree on the full training set
    pub bootstrap:    bool,
    pub tree:         TreeParams,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            seed:         42,
            bootstrap:    true,
            tree:         TreeParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    n_features: usize,
    trees:      Vec<RegressionTree>,
}

impl RandomForestRegressor {
    /// Fit `cfg.n_estimators` trees on the feature rows `x` and targets `y`.
    pub fn fit(x: &[Vec<f64>], y: &[f64], cfg: &ForestConfig) -> SalaryResult<Self> {
        let n = x.len();
        if n == 0 {
            return Err(SalaryError::InsufficientData("no training rows".to_string()));
        }
        if n != y.len() {
            return Err(SalaryError::Schema(format!(
                "{n} feature rows but {} targets",
                y.len()
            )));
        }
        let n_features = x[0].len();
        if let Some(row) = x.iter().position(|r| r.len() != n_features) {
            return Err(SalaryError::Schema(format!(
                "feature row {row} has width {}, expected {n_features}",
                x[row].len()
            )));
        }

        let mut master = StdRng::seed_from_u64(cfg.seed);
        let mut trees  = Vec::with_capacity(cfg.n_estimators);

        for t in 0..cfg.n_estimators {
            let mut rng = StdRng::seed_from_u64(master.gen());

            let samples: Vec<usize> = if cfg.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };

            let tree = RegressionTree::fit(x, y, samples, &cfg.tree, &mut rng);
            tracing::trace!(
                "Tree {}: {} nodes, {} leaves, depth {}",
                t,
                tree.nodes().len(),
                tree.leaf_count(),
                tree.depth()
            );
            trees.push(tree);
        }

        tracing::info!(
            "Fitted random forest: {} trees on {} rows x {} features",
            trees.len(),
            n,
            n_features
        );

        Ok(Self { n_features, trees })
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Structural check for a decoded forest.
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }
}

impl Regressor for RandomForestRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_features(&self, features: &[f64]) -> SalaryResult<f64> {
        if features.len() != self.n_features {
            return Err(SalaryError::InputValidation(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        Ok(sum / self.trees.len() as f64)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let x: Vec<Vec<f64>> = (0..30).map(|i| vec![i as f64, (i % 3) as f64]).collect();
        let y: Vec<f64>      = (0..30).map(|i| 1000.0 + 10.0 * i as f64).collect();
        (x, y)
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = toy_data();
        let cfg = ForestConfig { n_estimators: 10, ..ForestConfig::default() };
        let a = RandomForestRegressor::fit(&x, &y, &cfg).unwrap();
        let b = RandomForestRegressor::fit(&x, &y, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_forest() {
        let (x, y) = toy_data();
        let a = RandomForestRegressor::fit(&x, &y, &ForestConfig { n_estimators: 10, seed: 1, ..ForestConfig::default() }).unwrap();
        let b = RandomForestRegressor::fit(&x, &y, &ForestConfig { n_estimators: 10, seed: 2, ..ForestConfig::default() }).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_prediction_stays_within_target_range() {
        let (x, y) = toy_data();
        let forest = RandomForestRegressor::fit(&x, &y, &ForestConfig::default()).unwrap();
        assert_eq!(forest.trees().len(), 100);
        for row in &x {
            let p = forest.predict_features(row).unwrap();
            assert!((1000.0..=1290.0).contains(&p), "prediction {p}");
        }
    }

    #[test]
    fn test_without_bootstrap_trees_fit_training_rows_exactly() {
        let (x, y) = toy_data();
        let cfg = ForestConfig { n_estimators: 3, bootstrap: false, ..ForestConfig::default() };
        let forest = RandomForestRegressor::fit(&x, &y, &cfg).unwrap();
        for (row, target) in x.iter().zip(&y) {
            assert_eq!(forest.predict_features(row).unwrap(), *target);
        }
    }

    #[test]
    fn test_wrong_width_is_input_validation_error() {
        let (x, y) = toy_data();
        let forest = RandomForestRegressor::fit(&x, &y, &ForestConfig { n_estimators: 2, ..ForestConfig::default() }).unwrap();
        let err = forest.predict_features(&[1.0]).unwrap_err();
        assert!(matches!(err, SalaryError::InputValidation(_)));
    }

    #[test]
    fn test_empty_training_set_rejected() {
        let err = RandomForestRegressor::fit(&[], &[], &ForestConfig::default()).unwrap_err();
        assert!(matches!(err, SalaryError::InsufficientData(_)));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let x = vec![vec![1.0, 2.0], vec![3.0]];
        let err = RandomForestRegressor::fit(&x, &[1.0, 2.0], &ForestConfig::default()).unwrap_err();
        assert!(matches!(err, SalaryError::Schema(_)));
    }
}
