// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Loads the artifact exactly once, then serves predictions for
// as long as the use case lives:
//
//   new(model_path)      → ArtifactStore → Inferencer (read-only)
//   predict(...)         → one typed record      → one salary
//   predict_fields(...)  → four raw string fields → one salary
//   predict_csv(...)     → feature CSV in → same rows + prediction out
//
// Raw inputs go through EmployeeProfile::from_fields, so wrong
// arity or a non-integer experience is rejected before the model
// is touched.

use std::io::{Read, Write};

use anyhow::{Context, Result};

use crate::data::loader::read_profiles;
use crate::domain::record::EmployeeProfile;
use crate::domain::traits::SalaryPredictor;
use crate::infra::artifact::ArtifactStore;
use crate::ml::inferencer::Inferencer;

/// Name of the column appended by batch prediction
pub const PREDICTION_COLUMN: &str = "Predicted_Salary";

pub struct PredictUseCase {
    inferencer: Inferencer,
}

impl PredictUseCase {
    /// Load the model artifact at `model_path`.
    pub fn new(model_path: impl Into<std::path::PathBuf>) -> Result<Self> {
        let store      = ArtifactStore::new(model_path);
        let inferencer = Inferencer::from_artifact(&store)?;
        Ok(Self { inferencer })
    }

    /// The core-to-presentation entry point.
    pub fn predict(
        &self,
        experience: u32,
        education:  &str,
        job_title:  &str,
        location:   &str,
    ) -> Result<f64> {
        let profile = EmployeeProfile::new(experience, education, job_title, location);
        Ok(self.inferencer.predict(&profile)?)
    }

    /// Predict from raw fields in `Experience, Education_Level, Job_Title, Location` order.
    pub fn predict_fields(&self, fields: &[&str]) -> Result<f64> {
        self.predict_profile(EmployeeProfile::from_fields(fields)?)
    }

    /// Predict from one comma-separated line.
    pub fn predict_line(&self, line: &str) -> Result<f64> {
        self.predict_profile(EmployeeProfile::parse_line(line)?)
    }

    fn predict_profile(&self, p: EmployeeProfile) -> Result<f64> {
        self.predict(p.experience, &p.education_level, &p.job_title, &p.location)
    }

    /// Predict every row of a feature CSV and write the rows back
    /// out with an extra `Predicted_Salary` column (rounded).
    /// Returns the number of rows written.
    pub fn predict_csv<R: Read, W: Write>(&self, input: R, output: W) -> Result<usize> {
        let (headers, rows) = read_profiles(input)?;

        let profiles: Vec<EmployeeProfile> = rows.iter().map(|r| r.profile.clone()).collect();
        let predictions = self.inferencer.predict_batch(&profiles)?;

        let mut writer = csv::Writer::from_writer(output);

        let mut header = headers.clone();
        header.push_field(PREDICTION_COLUMN);
        writer.write_record(&header).context("cannot write CSV header")?;

        for (row, salary) in rows.iter().zip(&predictions) {
            let mut out = row.raw.clone();
            out.push_field(&format!("{:.0}", salary.round()));
            writer.write_record(&out).context("cannot write CSV row")?;
        }
        writer.flush().context("cannot flush CSV output")?;

        tracing::info!("Predicted {} rows", predictions.len());
        Ok(predictions.len())
    }
}
