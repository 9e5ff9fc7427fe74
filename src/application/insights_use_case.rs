// ============================================================
// Layer 2 — InsightsUseCase
// ============================================================
// Loads the dataset and summarises it for the exploratory views.
// Reads the CSV independently of training: pointing both at the
// same file is the caller's job.

use anyhow::Result;

use crate::data::{insights::DatasetInsights, loader::CsvRecordLoader};
use crate::domain::traits::RecordSource;

pub struct InsightsUseCase {
    data_path: String,
    bins:      usize,
}

impl InsightsUseCase {
    pub fn new(data_path: impl Into<String>, bins: usize) -> Self {
        Self { data_path: data_path.into(), bins }
    }

    pub fn execute(&self) -> Result<DatasetInsights> {
        let records  = CsvRecordLoader::new(&self.data_path).load_all()?;
        let insights = DatasetInsights::compute(&records, self.bins)?;
        tracing::info!(
            "Summarised {} rows into {} histogram bins",
            insights.rows,
            insights.salary.histogram.len()
        );
        Ok(insights)
    }
}
