// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All model math lives here. Other layers only see
// SalaryPipeline, Inferencer and the metric types.
//
//   encoder.rs    — one-hot encoding with a frozen vocabulary
//   tree.rs       — CART regression tree (squared error)
//   forest.rs     — bootstrap ensemble of trees, seeded
//   pipeline.rs   — encoder + forest as one fitted unit
//   evaluation.rs — MAE / RMSE / R² on held-out data
//   trainer.rs    — fit then evaluate
//   inferencer.rs — loaded pipeline serving predictions
//
// Reference: Breiman (2001) Random Forests
//            Breiman et al. (1984) Classification and Regression Trees

pub mod encoder;

pub mod tree;

pub mod forest;

pub mod pipeline;

pub mod evaluation;

/// Fit + held-out evaluation for one training run
pub mod trainer;

/// Loads the artifact once and serves predictions
pub mod inferencer;
