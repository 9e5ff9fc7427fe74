// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, hands the work to Layer 2, and prints the results.
// Nothing here computes; it only routes and formats.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

/// Text formatting of predictions and insights
pub mod render;

use std::{
    fs,
    io::{self, BufRead, Write},
};

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, InsightsArgs, PredictArgs, PredictBatchArgs, TrainArgs};

use crate::domain::error::SalaryError;

#[derive(Parser, Debug)]
#[command(
    name = "salary-predictor",
    version,
    about = "Train a RandomForest salary model on employee data, then predict salaries."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)        => run_train(args),
            Commands::Predict(args)      => run_predict(args),
            Commands::PredictBatch(args) => run_predict_batch(args),
            Commands::Insights(args)     => run_insights(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on dataset: {}", args.data);

    let report = TrainUseCase::new(args.into()).execute()?;

    println!("MAE: {:.2}", report.metrics.mae);
    println!("RMSE: {:.2}", report.metrics.rmse);
    println!("R2 Score: {:.2}", report.metrics.r2);
    println!("Model trained and saved to '{}'", report.config.model_path);
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    // Loaded once; every prediction below reuses it
    let use_case = PredictUseCase::new(&args.model)?;

    if args.interactive {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return interactive_loop(&use_case, stdin.lock(), stdout.lock());
    }

    let fields = [
        args.experience.as_deref().unwrap_or_default(),
        args.education.as_deref().unwrap_or_default(),
        args.job_title.as_deref().unwrap_or_default(),
        args.location.as_deref().unwrap_or_default(),
    ];
    let salary = use_case.predict_fields(&fields)?;

    println!("Predicted Annual Salary: {}", render::format_salary(salary));
    println!("Powered by RandomForest ML Model");
    Ok(())
}

/// One prediction per input line until EOF or `quit`.
/// Malformed lines are reported and skipped; other errors stop the loop.
fn interactive_loop<R: BufRead, W: Write>(
    use_case: &crate::application::predict_use_case::PredictUseCase,
    input:    R,
    mut out:  W,
) -> Result<()> {
    writeln!(out, "Enter: experience, education, job title, location  (quit to exit)")?;

    for line in input.lines() {
        let line    = line.context("cannot read stdin")?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        match use_case.predict_line(trimmed) {
            Ok(salary) => {
                writeln!(out, "Predicted Annual Salary: {}", render::format_salary(salary))?;
            }
            Err(e) if matches!(e.downcast_ref::<SalaryError>(), Some(SalaryError::InputValidation(_))) => {
                writeln!(out, "error: {e}")?;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn run_predict_batch(args: PredictBatchArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let use_case = PredictUseCase::new(&args.model)?;
    let input = fs::File::open(&args.input)
        .with_context(|| format!("Cannot open input '{}'", args.input))?;

    let rows = match &args.output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Cannot create output '{}'", path))?;
            use_case.predict_csv(input, file)?
        }
        None => use_case.predict_csv(input, io::stdout().lock())?,
    };

    if let Some(path) = &args.output {
        println!("Wrote {} predictions to '{}'", rows, path);
    }
    Ok(())
}

fn run_insights(args: InsightsArgs) -> Result<()> {
    use crate::application::insights_use_case::InsightsUseCase;

    let insights = InsightsUseCase::new(args.data, args.bins).execute()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
    } else {
        print!("{}", render::InsightsTable(&insights));
    }
    Ok(())
}
