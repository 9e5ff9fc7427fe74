// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands and all their configurable flags:
//
//   train          — fit and save the model
//   predict        — one prediction, or an interactive session
//   predict-batch  — predict every row of a CSV file
//   insights       — dataset statistics behind the charts
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::ml::forest::ForestConfig;
use crate::ml::tree::TreeParams;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the salary model on a CSV dataset
    Train(TrainArgs),

    /// Predict a salary with a trained model
    Predict(PredictArgs),

    /// Predict salaries for every row of a CSV file
    PredictBatch(PredictBatchArgs),

    /// Print summary statistics of the dataset
    Insights(InsightsArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV with Experience, Education_Level, Job_Title, Location, Salary
    #[arg(long, default_value = "data/employee_data.csv")]
    pub data: String,

    /// Where to write the model artifact (overwritten if present)
    #[arg(long, default_value = "models/salary_model.bin")]
    pub model: String,

    /// Seed for the split, the bootstrap samples and feature order
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Share of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    pub n_estimators: usize,

    /// Maximum tree depth (unlimited when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Minimum samples a node needs before it may split
    #[arg(long, default_value_t = 2)]
    pub min_samples_split: usize,

    /// Minimum samples kept in each leaf
    #[arg(long, default_value_t = 1)]
    pub min_samples_leaf: usize,

    /// Grow every tree on the full training set instead of a bootstrap sample
    #[arg(long)]
    pub no_bootstrap: bool,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:     a.data,
            model_path:    a.model,
            test_fraction: a.test_fraction,
            forest: ForestConfig {
                n_estimators: a.n_estimators,
                seed:         a.seed,
                bootstrap:    !a.no_bootstrap,
                tree: TreeParams {
                    max_depth:         a.max_depth,
                    min_samples_split: a.min_samples_split,
                    min_samples_leaf:  a.min_samples_leaf,
                },
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Model artifact written by `train`
    #[arg(long, default_value = "models/salary_model.bin")]
    pub model: String,

    /// Years of experience. Taken as text so malformed values are
    /// reported by the predictor's own input validation.
    #[arg(long, required_unless_present = "interactive")]
    pub experience: Option<String>,

    /// Education level, e.g. Bachelor, Master, PhD
    #[arg(long, required_unless_present = "interactive")]
    pub education: Option<String>,

    /// Job title, e.g. "Software Engineer"
    #[arg(long, required_unless_present = "interactive")]
    pub job_title: Option<String>,

    /// Location, e.g. Pune
    #[arg(long, required_unless_present = "interactive")]
    pub location: Option<String>,

    /// Read `experience,education,job title,location` lines from stdin
    #[arg(long, conflicts_with_all = ["experience", "education", "job_title", "location"])]
    pub interactive: bool,
}

#[derive(Args, Debug)]
pub struct PredictBatchArgs {
    /// Model artifact written by `train`
    #[arg(long, default_value = "models/salary_model.bin")]
    pub model: String,

    /// CSV with Experience, Education_Level, Job_Title, Location columns
    #[arg(long)]
    pub input: String,

    /// Output CSV (stdout when omitted)
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(Args, Debug)]
pub struct InsightsArgs {
    /// CSV dataset to summarise
    #[arg(long, default_value = "data/employee_data.csv")]
    pub data: String,

    /// Number of salary histogram bins
    #[arg(long, default_value_t = 10)]
    pub bins: usize,

    /// Print JSON instead of text tables
    #[arg(long)]
    pub json: bool,
}
