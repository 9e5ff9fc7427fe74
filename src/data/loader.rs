// ============================================================
// Layer 4 — CSV Record Loader
// ============================================================
// Loads the employee dataset using the csv crate.
//
// Expected layout (column order is free, extra columns ignored):
//
//   Experience,Education_Level,Job_Title,Location,Salary
//   2,Bachelor,Software Engineer,Pune,600000
//   10,PhD,Tech Lead,Bangalore,2500000
//
// Columns are located by header name, then every row is
// type-checked:
//   - Experience       → u32
//   - Salary           → finite f64 >= 0
//   - categorical cols → non-empty string
//
// A missing column or a mistyped value is a SchemaError that
// names the column (and the 1-based file line for values).
//
// The same header resolution is reused for batch prediction
// input, where Salary is not required and failures are
// InputValidation errors instead.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::{fs, io::Read, path::PathBuf};

use crate::domain::error::{SalaryError, SalaryResult};
use crate::domain::record::{
    EmployeeProfile, EmployeeRecord, EDUCATION_LEVEL, EXPERIENCE, FEATURE_COLUMNS, JOB_TITLE,
    LOCATION, SALARY,
};
use crate::domain::traits::RecordSource;

/// Header names a training file must contain.
const TRAINING_COLUMNS: [&str; 5] = [EXPERIENCE, EDUCATION_LEVEL, JOB_TITLE, LOCATION, SALARY];

/// Loads labelled employee records from a CSV file.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvRecordLoader {
    path: PathBuf,
}

impl CsvRecordLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvRecordLoader {
    fn load_all(&self) -> SalaryResult<Vec<EmployeeRecord>> {
        let file = fs::File::open(&self.path).map_err(|e| {
            SalaryError::Dataset(format!("cannot open '{}': {e}", self.path.display()))
        })?;

        let records = read_records(file)?;
        tracing::info!(
            "Loaded {} records from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

/// Parse labelled records from any reader producing CSV text.
pub fn read_records<R: Read>(reader: R) -> SalaryResult<Vec<EmployeeRecord>> {
    let mut rdr = csv_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| SalaryError::Dataset(format!("cannot read header row: {e}")))?
        .clone();

    // A file with no header at all holds no data
    if headers.iter().all(|h| h.is_empty()) {
        return Err(SalaryError::InsufficientData("dataset file is empty".to_string()));
    }

    let positions = column_positions(&headers, &TRAINING_COLUMNS).map_err(SalaryError::Schema)?;

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        // +2: one for the header row, one for 1-based numbering
        let line = i + 2;
        let row = row.map_err(|e| SalaryError::Schema(format!("line {line}: {e}")))?;

        let field = |idx: usize| row.get(positions[idx]).unwrap_or("");

        let experience = field(0).parse::<u32>().map_err(|_| {
            SalaryError::Schema(format!(
                "line {line}: {EXPERIENCE} must be a non-negative integer, got '{}'",
                field(0)
            ))
        })?;

        let mut categories = [""; 3];
        for (slot, column) in categories.iter_mut().zip(1..=3) {
            let value = field(column);
            if value.is_empty() {
                return Err(SalaryError::Schema(format!(
                    "line {line}: {} is empty",
                    TRAINING_COLUMNS[column]
                )));
            }
            *slot = value;
        }

        let salary = field(4)
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite() && *s >= 0.0)
            .ok_or_else(|| {
                SalaryError::Schema(format!(
                    "line {line}: {SALARY} must be a non-negative number, got '{}'",
                    field(4)
                ))
            })?;

        let profile = EmployeeProfile::new(experience, categories[0], categories[1], categories[2]);
        records.push(EmployeeRecord::new(profile, salary));
    }

    tracing::debug!("Parsed {} rows with columns {:?}", records.len(), positions);
    Ok(records)
}

/// One row of a batch prediction file: the raw CSV row (echoed
/// back in the output) and the profile parsed from it.
#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub raw:     csv::StringRecord,
    pub profile: EmployeeProfile,
}

/// Parse unlabelled prediction inputs.
///
/// Only the four feature columns are required; any other column
/// (including Salary) is carried along untouched in `raw`.
pub fn read_profiles<R: Read>(reader: R) -> SalaryResult<(csv::StringRecord, Vec<ProfileRow>)> {
    let mut rdr = csv_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| SalaryError::InputValidation(format!("cannot read header row: {e}")))?
        .clone();

    let positions = column_positions(&headers, &FEATURE_COLUMNS).map_err(SalaryError::InputValidation)?;

    let mut rows = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let line = i + 2;
        let row = row.map_err(|e| SalaryError::InputValidation(format!("line {line}: {e}")))?;

        let fields: Vec<&str> = positions
            .iter()
            .map(|&p| row.get(p).unwrap_or(""))
            .collect();

        let profile = EmployeeProfile::from_fields(&fields).map_err(|e| match e {
            SalaryError::InputValidation(msg) => {
                SalaryError::InputValidation(format!("line {line}: {msg}"))
            }
            other => other,
        })?;

        rows.push(ProfileRow { raw: row, profile });
    }

    Ok((headers, rows))
}

/// Locate each named column in a header row.
/// Returns an error message listing every missing column.
pub fn column_positions(
    headers: &csv::StringRecord,
    names:   &[&str],
) -> Result<Vec<usize>, String> {
    let mut positions = Vec::with_capacity(names.len());
    let mut missing   = Vec::new();

    for name in names {
        match headers.iter().position(|h| h == *name) {
            Some(p) => positions.push(p),
            None    => missing.push(*name),
        }
    }

    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(format!(
            "missing required column(s): {} (found: {})",
            missing.join(", "),
            headers.iter().collect::<Vec<_>>().join(", ")
        ))
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}
