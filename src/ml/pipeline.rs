// ============================================================
// Layer 5 — Salary Pipeline
// ============================================================
// The fitted model as one logical unit:
//
//   EmployeeProfile ──OneHotEncoder──▶ features ──RandomForest──▶ salary
//
// This is the value that gets persisted as the artifact, so it
// owns everything prediction needs and nothing else.

use serde::{Deserialize, Serialize};

use crate::domain::error::{SalaryError, SalaryResult};
use crate::domain::record::{EmployeeProfile, EmployeeRecord};
use crate::domain::traits::{FeatureEncoder, Regressor, SalaryPredictor};
use crate::ml::encoder::OneHotEncoder;
use crate::ml::forest::{ForestConfig, RandomForestRegressor};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryPipeline {
    encoder: OneHotEncoder,
    forest:  RandomForestRegressor,
}

impl SalaryPipeline {
    /// Learn the vocabulary from `records`, encode them, fit the forest.
    pub fn fit(records: &[EmployeeRecord], cfg: &ForestConfig) -> SalaryResult<Self> {
        if records.is_empty() {
            return Err(SalaryError::InsufficientData("no training records".to_string()));
        }

        let encoder = OneHotEncoder::fit(records.iter().map(|r| &r.profile));

        let x: Vec<Vec<f64>> = records.iter().map(|r| encoder.transform(&r.profile)).collect();
        let y: Vec<f64>      = records.iter().map(|r| r.salary).collect();

        let forest = RandomForestRegressor::fit(&x, &y, cfg)?;
        Ok(Self { encoder, forest })
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }

    pub fn forest(&self) -> &RandomForestRegressor {
        &self.forest
    }

    /// Check that a decoded pipeline has a consistent shape.
    pub fn validate(&self) -> SalaryResult<()> {
        self.encoder.validate().map_err(SalaryError::ArtifactLoad)?;
        self.forest.validate().map_err(SalaryError::ArtifactLoad)?;

        if self.encoder.width() != self.forest.n_features() {
            return Err(SalaryError::ArtifactLoad(format!(
                "encoder produces {} features but forest expects {}",
                self.encoder.width(),
                self.forest.n_features()
            )));
        }
        Ok(())
    }
}

impl SalaryPredictor for SalaryPipeline {
    fn predict(&self, profile: &EmployeeProfile) -> SalaryResult<f64> {
        let features = self.encoder.transform(profile);
        self.forest.predict_features(&features)
    }
}
