// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Holds the fitted pipeline for the lifetime of the process.
// Loaded once from the artifact, never mutated afterwards, so
// `&Inferencer` can be shared freely between callers.

use crate::domain::error::SalaryResult;
use crate::domain::record::EmployeeProfile;
use crate::domain::traits::SalaryPredictor;
use crate::infra::artifact::ArtifactStore;
use crate::ml::pipeline::SalaryPipeline;

pub struct Inferencer {
    pipeline: SalaryPipeline,
}

impl Inferencer {
    pub fn new(pipeline: SalaryPipeline) -> Self {
        Self { pipeline }
    }

    pub fn from_artifact(store: &ArtifactStore) -> SalaryResult<Self> {
        let pipeline = store.load_pipeline()?;
        tracing::info!(
            "Model loaded from '{}' ({} trees)",
            store.path().display(),
            pipeline.forest().trees().len()
        );
        Ok(Self::new(pipeline))
    }
}

impl SalaryPredictor for Inferencer {
    fn predict(&self, profile: &EmployeeProfile) -> SalaryResult<f64> {
        let salary = self.pipeline.predict(profile)?;
        tracing::debug!("Predicted {:.2} for {:?}", salary, profile);
        Ok(salary)
    }
}
