// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the CSV dataset          (Layer 4 - data)
//   Step 2: Seeded 80/20 split            (Layer 4 - data)
//   Step 3: Fit encoder + forest,
//           evaluate on held-out rows     (Layer 5 - ml)
//   Step 4: Save the training report      (Layer 6 - infra)
//   Step 5: Save the artifact             (Layer 6 - infra)
//   Step 6: Append to the metrics log     (Layer 6 - infra)
//
// The artifact is replaced by the last step that can fail the
// run: an Err from execute() always leaves the previous artifact
// in place. A metrics log failure after that is only a warning.
//
// The same dataset and seed always produce a byte-identical
// artifact and identical metrics.

use std::collections::BTreeMap;

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{loader::CsvRecordLoader, splitter::split_train_test};
use crate::domain::traits::RecordSource;
use crate::infra::{
    artifact::ArtifactStore,
    metrics::{MetricsLogger, RunMetrics},
};
use crate::ml::evaluation::EvalMetrics;
use crate::ml::forest::ForestConfig;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything that determines a training run. Serialisable so the
// exact settings end up in the training report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:     String,
    pub model_path:    String,
    /// Share of rows held out for evaluation, in (0, 1)
    pub test_fraction: f64,
    pub forest:        ForestConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:     "data/employee_data.csv".to_string(),
            model_path:    "models/salary_model.bin".to_string(),
            test_fraction: 0.2,
            forest:        ForestConfig::default(),
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.test_fraction > 0.0 && self.test_fraction < 1.0,
            "test fraction must be between 0 and 1 (exclusive), got {}",
            self.test_fraction
        );
        ensure!(self.forest.n_estimators >= 1, "n_estimators must be at least 1");
        ensure!(self.forest.tree.min_samples_split >= 2, "min_samples_split must be at least 2");
        ensure!(self.forest.tree.min_samples_leaf >= 1, "min_samples_leaf must be at least 1");
        ensure!(
            self.forest.tree.max_depth != Some(0),
            "max_depth must be at least 1 when given"
        );
        Ok(())
    }
}

// ─── Training Report ─────────────────────────────────────────────────────────
// Written next to the artifact as JSON for human inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub config:           TrainConfig,
    pub train_rows:       usize,
    pub test_rows:        usize,
    /// Distinct categories learned per categorical column
    pub vocabulary_sizes: BTreeMap<String, usize>,
    pub metrics:          EvalMetrics,
}

pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<TrainingReport> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load the dataset ──────────────────────────────────────────
        tracing::info!("Loading dataset from '{}'", cfg.data_path);
        let records = CsvRecordLoader::new(&cfg.data_path).load_all()?;

        // ── Step 2: Train / held-out split ────────────────────────────────────
        let (train, held_out) = split_train_test(records, cfg.test_fraction, cfg.forest.seed)?;
        tracing::info!("Split: {} train, {} held-out", train.len(), held_out.len());

        // ── Step 3: Fit and evaluate ──────────────────────────────────────────
        let outcome = run_training(&cfg.forest, &train, &held_out)?;

        // ── Step 4: Training report ───────────────────────────────────────────
        let store  = ArtifactStore::new(&cfg.model_path);
        let report = TrainingReport {
            config:           cfg.clone(),
            train_rows:       train.len(),
            test_rows:        held_out.len(),
            vocabulary_sizes: outcome
                .pipeline
                .encoder()
                .vocabularies()
                .iter()
                .map(|v| (v.column.clone(), v.categories.len()))
                .collect(),
            metrics:          outcome.metrics,
        };
        store.save_report(&report)?;

        // ── Step 5: Persist the fitted pipeline ───────────────────────────────
        store.save_pipeline(&outcome.pipeline)?;

        // ── Step 6: Metrics log ───────────────────────────────────────────────
        let run = RunMetrics {
            seed:         cfg.forest.seed,
            n_estimators: cfg.forest.n_estimators,
            train_rows:   report.train_rows,
            test_rows:    report.test_rows,
            mae:          report.metrics.mae,
            rmse:         report.metrics.rmse,
            r2:           report.metrics.r2,
        };
        if let Err(e) = append_run(&store, &run) {
            tracing::warn!("Model saved, but the metrics log was not updated: {e}");
        }

        Ok(report)
    }
}

/// Compare with the previous run, then append this one.
fn append_run(store: &ArtifactStore, run: &RunMetrics) -> Result<()> {
    let logger = MetricsLogger::new(store.dir())?;
    match logger.history() {
        Ok(history) => {
            if let Some(previous) = history.last() {
                tracing::info!(
                    "R2 {:.4} vs previous run {:.4} ({})",
                    run.r2,
                    previous.r2,
                    if run.is_improvement(previous) { "improved" } else { "not improved" }
                );
            }
        }
        Err(e) => tracing::warn!("Ignoring unreadable metrics history: {e}"),
    }
    logger.log(run)?;
    tracing::info!("Appended run metrics to '{}'", logger.csv_path().display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::data::fixtures;
    use crate::domain::error::SalaryError;

    fn config(dir: &Path, data_path: &Path) -> TrainConfig {
        TrainConfig {
            data_path:  data_path.display().to_string(),
            model_path: dir.join("models/salary_model.bin").display().to_string(),
            forest:     ForestConfig { n_estimators: 20, ..ForestConfig::default() },
            ..TrainConfig::default()
        }
    }

    fn salary_error(err: &anyhow::Error) -> &SalaryError {
        err.downcast_ref::<SalaryError>().expect("typed SalaryError")
    }

    #[test]
    fn test_trains_and_writes_all_outputs() {
        let dir  = tempfile::tempdir().unwrap();
        let data = fixtures::write_sample_csv(dir.path());
        let cfg  = config(dir.path(), &data);

        let report = TrainUseCase::new(cfg.clone()).execute().unwrap();

        // 144 rows → ceil(28.8) = 29 held out
        assert_eq!(report.test_rows, 29);
        assert_eq!(report.train_rows, 115);
        assert!(report.metrics.r2 > 0.5, "r2 {}", report.metrics.r2);
        assert!(report.metrics.mae.is_finite() && report.metrics.rmse >= report.metrics.mae);

        let store = ArtifactStore::new(&cfg.model_path);
        assert!(store.load_pipeline().is_ok());

        let saved: TrainingReport =
            serde_json::from_str(&fs::read_to_string(store.report_path()).unwrap()).unwrap();
        assert_eq!(saved.config, report.config);
        assert_eq!((saved.train_rows, saved.test_rows), (115, 29));
        assert_eq!(saved.vocabulary_sizes["Job_Title"], 4);
        assert!((saved.metrics.r2 - report.metrics.r2).abs() < 1e-9);

        let logger = MetricsLogger::new(store.dir()).unwrap();
        assert_eq!(logger.history().unwrap().len(), 1);
    }

    #[test]
    fn test_training_twice_is_byte_identical() {
        let dir  = tempfile::tempdir().unwrap();
        let data = fixtures::write_sample_csv(dir.path());

        let cfg_a = config(&dir.path().join("a"), &data);
        let cfg_b = config(&dir.path().join("b"), &data);
        let report_a = TrainUseCase::new(cfg_a.clone()).execute().unwrap();
        let report_b = TrainUseCase::new(cfg_b.clone()).execute().unwrap();

        assert_eq!(report_a.metrics, report_b.metrics);
        assert_eq!(
            fs::read(&cfg_a.model_path).unwrap(),
            fs::read(&cfg_b.model_path).unwrap()
        );
    }

    #[test]
    fn test_missing_salary_column_is_schema_error() {
        let dir  = tempfile::tempdir().unwrap();
        let data = dir.path().join("no_salary.csv");
        fs::write(&data, "Experience,Education_Level,Job_Title,Location\n2,Bachelor,Software Engineer,Pune\n").unwrap();

        let cfg = config(dir.path(), &data);
        let err = TrainUseCase::new(cfg.clone()).execute().unwrap_err();
        assert!(matches!(salary_error(&err), SalaryError::Schema(_)));
        assert!(!Path::new(&cfg.model_path).exists());
    }

    #[test]
    fn test_empty_dataset_is_insufficient_data() {
        let dir  = tempfile::tempdir().unwrap();
        let data = dir.path().join("empty.csv");
        fs::write(&data, format!("{}\n", fixtures::HEADER)).unwrap();

        let err = TrainUseCase::new(config(dir.path(), &data)).execute().unwrap_err();
        assert!(matches!(salary_error(&err), SalaryError::InsufficientData(_)));
    }

    #[test]
    fn test_unwritable_model_path_is_persistence_error() {
        let dir  = tempfile::tempdir().unwrap();
        let data = fixtures::write_sample_csv(dir.path());
        fs::write(dir.path().join("models"), b"occupied").unwrap();

        let err = TrainUseCase::new(config(dir.path(), &data)).execute().unwrap_err();
        assert!(matches!(salary_error(&err), SalaryError::Persistence(_)));
    }

    #[test]
    fn test_failed_report_write_keeps_previous_artifact() {
        let dir  = tempfile::tempdir().unwrap();
        let data = fixtures::write_sample_csv(dir.path());
        let cfg  = config(dir.path(), &data);

        let store = ArtifactStore::new(&cfg.model_path);
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(&cfg.model_path, b"previous artifact").unwrap();
        // A non-empty directory where the report should go cannot be replaced
        fs::create_dir_all(store.report_path().join("occupied")).unwrap();

        let err = TrainUseCase::new(cfg.clone()).execute().unwrap_err();
        assert!(matches!(salary_error(&err), SalaryError::Persistence(_)));
        assert_eq!(fs::read(&cfg.model_path).unwrap(), b"previous artifact");
    }

    #[test]
    fn test_unwritable_metrics_log_does_not_fail_training() {
        let dir  = tempfile::tempdir().unwrap();
        let data = fixtures::write_sample_csv(dir.path());
        let cfg  = config(dir.path(), &data);

        let store = ArtifactStore::new(&cfg.model_path);
        fs::create_dir_all(store.dir().join("metrics.csv").join("occupied")).unwrap();

        TrainUseCase::new(cfg.clone()).execute().unwrap();
        assert!(store.load_pipeline().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected_before_loading() {
        let cfg = TrainConfig { test_fraction: 1.0, data_path: "missing.csv".into(), ..TrainConfig::default() };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(err.downcast_ref::<SalaryError>().is_none());
    }
}
