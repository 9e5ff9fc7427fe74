// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline is a fixed two-stage composition:
//
//   EmployeeProfile ──FeatureEncoder──▶ Vec<f64> ──Regressor──▶ f64
//
// Each stage is described by a one-capability trait, and the
// SalaryPredictor trait is what the presentation layer talks to.
// Everything is statically dispatched.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::error::SalaryResult;
use crate::domain::record::{EmployeeProfile, EmployeeRecord};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can load labelled training records.
///
/// Implementations:
///   - CsvRecordLoader → reads a delimited file with a header row
pub trait RecordSource {
    fn load_all(&self) -> SalaryResult<Vec<EmployeeRecord>>;
}

// ─── FeatureEncoder ───────────────────────────────────────────────────────────
/// Turns one profile into a fixed-width numeric feature vector.
pub trait FeatureEncoder {
    /// Length of every vector `transform` returns
    fn width(&self) -> usize;

    /// Encode a profile. Must never fail on unseen categories.
    fn transform(&self, profile: &EmployeeProfile) -> Vec<f64>;
}

// ─── Regressor ────────────────────────────────────────────────────────────────
/// Maps an encoded feature vector to one scalar.
pub trait Regressor {
    /// Number of features the regressor was fitted on
    fn n_features(&self) -> usize;

    fn predict_features(&self, features: &[f64]) -> SalaryResult<f64>;
}

// ─── SalaryPredictor ──────────────────────────────────────────────────────────
/// The core-to-presentation contract: one profile in, one salary out.
///
/// Implementations:
///   - SalaryPipeline → encoder + random forest
pub trait SalaryPredictor {
    fn predict(&self, profile: &EmployeeProfile) -> SalaryResult<f64>;

    /// Predict many profiles. Fails on the first bad one.
    fn predict_batch(&self, profiles: &[EmployeeProfile]) -> SalaryResult<Vec<f64>> {
        profiles.iter().map(|p| self.predict(p)).collect()
    }
}
