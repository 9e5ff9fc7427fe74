// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the core can report, one variant per kind:
//
//   Schema           — dataset is missing a column or a value is mistyped
//   InsufficientData — dataset too small to split into train/held-out
//   Persistence      — the artifact could not be written
//   ArtifactLoad     — the artifact is missing, unreadable or malformed
//   InputValidation  — a prediction request has the wrong arity/types
//   Dataset          — the dataset/input file itself could not be read
//
// Library layers return SalaryResult<T>. The application layer
// wraps these in anyhow; callers can still downcast to SalaryError.

use thiserror::Error;

pub type SalaryResult<T> = std::result::Result<T, SalaryError>;

#[derive(Debug, Error)]
pub enum SalaryError {
    #[error("schema error: {0}")]
    Schema(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("artifact load error: {0}")]
    ArtifactLoad(String),

    #[error("input validation error: {0}")]
    InputValidation(String),

    #[error("dataset error: {0}")]
    Dataset(String),
}
