// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one row per training run to a CSV file so runs can be
// compared over time.
//
// Output file: <artifact dir>/metrics.csv
//
// Example CSV output:
//   seed,n_estimators,train_rows,test_rows,mae,rmse,r2
//   42,100,120,30,61250.0,84021.7,0.97
//   7,100,120,30,58410.3,80117.2,0.98
//
// The header is written only when the file is created.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::error::{SalaryError, SalaryResult};

/// One training run, as logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub seed:         u64,
    pub n_estimators: usize,
    pub train_rows:   usize,
    pub test_rows:    usize,
    pub mae:          f64,
    pub rmse:         f64,
    pub r2:           f64,
}

impl RunMetrics {
    /// True when this run explains more held-out variance than `previous`
    pub fn is_improvement(&self, previous: &RunMetrics) -> bool {
        self.r2 > previous.r2
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Log into `dir/metrics.csv`, creating `dir` if needed.
    pub fn new(dir: impl AsRef<Path>) -> SalaryResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| {
            SalaryError::Persistence(format!("cannot create '{}': {e}", dir.display()))
        })?;
        Ok(Self { csv_path: dir.join("metrics.csv") })
    }

    /// Append one run as a new CSV row.
    pub fn log(&self, m: &RunMetrics) -> SalaryResult<()> {
        let is_new = !self.csv_path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.csv_path)
            .map_err(|e| self.persistence(e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);

        writer.serialize(m).map_err(|e| self.persistence(e))?;
        writer.flush().map_err(|e| self.persistence(e))?;

        tracing::debug!(
            "Logged run metrics to '{}': r2={:.4}",
            self.csv_path.display(),
            m.r2
        );
        Ok(())
    }

    /// Every run logged so far, oldest first. Empty if nothing was logged.
    pub fn history(&self) -> SalaryResult<Vec<RunMetrics>> {
        if !self.csv_path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.csv_path).map_err(|e| {
            SalaryError::Dataset(format!("cannot read '{}': {e}", self.csv_path.display()))
        })?;
        reader
            .deserialize()
            .collect::<Result<Vec<RunMetrics>, _>>()
            .map_err(|e| SalaryError::Dataset(format!("'{}': {e}", self.csv_path.display())))
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    fn persistence(&self, e: impl std::fmt::Display) -> SalaryError {
        SalaryError::Persistence(format!("cannot write '{}': {e}", self.csv_path.display()))
    }
}
