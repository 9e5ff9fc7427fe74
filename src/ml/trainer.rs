// ============================================================
// Layer 5 — Training Run
// ============================================================
// Fit on the training subset, then score on the held-out subset.
// The held-out rows never reach the encoder or the forest during
// fitting, so unseen categories there exercise the all-zero path.

use crate::domain::error::SalaryResult;
use crate::domain::record::EmployeeRecord;
use crate::ml::evaluation::{evaluate, EvalMetrics};
use crate::ml::forest::ForestConfig;
use crate::ml::pipeline::SalaryPipeline;

/// A fitted pipeline and how well it did on held-out data.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub pipeline: SalaryPipeline,
    pub metrics:  EvalMetrics,
}

pub fn run_training(
    cfg:      &ForestConfig,
    train:    &[EmployeeRecord],
    held_out: &[EmployeeRecord],
) -> SalaryResult<TrainingOutcome> {
    tracing::info!(
        "Training {} trees (seed {}) on {} rows",
        cfg.n_estimators,
        cfg.seed,
        train.len()
    );

    let pipeline = SalaryPipeline::fit(train, cfg)?;
    tracing::debug!("Encoded features: {:?}", pipeline.encoder().feature_names());

    let metrics  = evaluate(&pipeline, held_out)?;

    tracing::info!(
        "Held-out evaluation on {} rows: MAE={:.2} RMSE={:.2} R2={:.2}",
        held_out.len(),
        metrics.mae,
        metrics.rmse,
        metrics.r2
    );

    Ok(TrainingOutcome { pipeline, metrics })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::domain::record::{EmployeeProfile, LOCATION};
    use crate::domain::traits::SalaryPredictor;

    #[test]
    fn test_vocabulary_comes_from_training_rows_only() {
        // Bangalore appears only in the held-out rows
        let (held_out, train): (Vec<EmployeeRecord>, Vec<EmployeeRecord>) = fixtures::sample_records()
            .into_iter()
            .partition(|r| r.profile.location == "Bangalore");

        let cfg     = ForestConfig { n_estimators: 10, ..ForestConfig::default() };
        let outcome = run_training(&cfg, &train, &held_out).unwrap();

        let locations = outcome
            .pipeline
            .encoder()
            .vocabularies()
            .iter()
            .find(|v| v.column == LOCATION)
            .map(|v| v.categories.clone())
            .unwrap();
        assert_eq!(locations, ["Chennai", "Hyderabad", "Pune"]);

        assert!(outcome.metrics.mae.is_finite());
        assert!(outcome.metrics.rmse.is_finite());
        assert!(outcome.metrics.r2.is_finite());

        // An unseen location encodes like any other unknown value
        let held_out_only = EmployeeProfile::new(6, "Master", "Manager", "Bangalore");
        let made_up      = EmployeeProfile::new(6, "Master", "Manager", "Atlantis");
        assert_eq!(
            outcome.pipeline.predict(&held_out_only).unwrap(),
            outcome.pipeline.predict(&made_up).unwrap()
        );
    }
}
