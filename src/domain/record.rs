// ============================================================
// Layer 3 — Employee Record Domain Types
// ============================================================
// Two types model one row of the dataset:
//
//   EmployeeProfile — the four features the model sees
//                     (Experience, Education_Level, Job_Title, Location)
//   EmployeeRecord  — a profile plus its Salary label
//
// Inference only ever receives an EmployeeProfile, so a salary
// can never leak into a prediction request.
//
// Example row:
//   Experience,Education_Level,Job_Title,Location,Salary
//   2,Bachelor,Software Engineer,Pune,600000
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

use crate::domain::error::{SalaryError, SalaryResult};

// ─── Column Names ─────────────────────────────────────────────────────────────
pub const EXPERIENCE:      &str = "Experience";
pub const EDUCATION_LEVEL: &str = "Education_Level";
pub const JOB_TITLE:       &str = "Job_Title";
pub const LOCATION:        &str = "Location";
pub const SALARY:          &str = "Salary";

/// Feature columns in the order a raw input record lists them.
pub const FEATURE_COLUMNS: [&str; 4] = [EXPERIENCE, EDUCATION_LEVEL, JOB_TITLE, LOCATION];

/// Categorical columns in the order their one-hot blocks appear
/// in the encoded feature vector.
pub const CATEGORICAL_COLUMNS: [&str; 3] = [EDUCATION_LEVEL, JOB_TITLE, LOCATION];

/// The features of one employee: everything the model needs
/// to produce a salary prediction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Years of professional experience
    pub experience: u32,

    /// Highest education, e.g. "Bachelor", "Master", "PhD".
    /// Kept as a string: values never seen during training are
    /// legal and simply match no known category.
    pub education_level: String,

    /// Job title, e.g. "Software Engineer"
    pub job_title: String,

    /// Work location, e.g. "Pune"
    pub location: String,
}

impl EmployeeProfile {
    pub fn new(
        experience:      u32,
        education_level: impl Into<String>,
        job_title:       impl Into<String>,
        location:        impl Into<String>,
    ) -> Self {
        Self {
            experience,
            education_level: education_level.into(),
            job_title:       job_title.into(),
            location:        location.into(),
        }
    }

    /// Build a profile from raw string fields in `FEATURE_COLUMNS` order.
    ///
    /// This is the only type coercion the predictor performs:
    ///   - exactly four fields are required
    ///   - Experience must parse as a non-negative integer
    ///
    /// Categorical fields are accepted as-is (after trimming).
    pub fn from_fields(fields: &[&str]) -> SalaryResult<Self> {
        if fields.len() != FEATURE_COLUMNS.len() {
            return Err(SalaryError::InputValidation(format!(
                "expected {} fields ({}), got {}",
                FEATURE_COLUMNS.len(),
                FEATURE_COLUMNS.join(", "),
                fields.len()
            )));
        }

        let raw_experience = fields[0].trim();
        let experience = raw_experience.parse::<u32>().map_err(|_| {
            SalaryError::InputValidation(format!(
                "{EXPERIENCE} must be a non-negative integer, got '{raw_experience}'"
            ))
        })?;

        Ok(Self::new(
            experience,
            fields[1].trim(),
            fields[2].trim(),
            fields[3].trim(),
        ))
    }

    /// Parse one comma-separated line, e.g. `2, Bachelor, Software Engineer, Pune`
    pub fn parse_line(line: &str) -> SalaryResult<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        Self::from_fields(&fields)
    }

    /// Value of a categorical column by name.
    /// Returns None for the numeric Experience column or unknown names.
    pub fn category(&self, column: &str) -> Option<&str> {
        match column {
            EDUCATION_LEVEL => Some(&self.education_level),
            JOB_TITLE       => Some(&self.job_title),
            LOCATION        => Some(&self.location),
            _               => None,
        }
    }
}

/// A labelled training row: a profile and the salary it earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub profile: EmployeeProfile,

    /// Annual salary in the dataset's currency; the regression target
    pub salary: f64,
}

impl EmployeeRecord {
    pub fn new(profile: EmployeeProfile, salary: f64) -> Self {
        Self { profile, salary }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_trims_and_parses() {
        let p = EmployeeProfile::from_fields(&[" 2 ", "Bachelor", " Software Engineer", "Pune "]).unwrap();
        assert_eq!(p, EmployeeProfile::new(2, "Bachelor", "Software Engineer", "Pune"));
    }

    #[test]
    fn test_from_fields_rejects_wrong_arity() {
        let err = EmployeeProfile::from_fields(&["2", "Bachelor", "Pune"]).unwrap_err();
        assert!(matches!(err, SalaryError::InputValidation(_)));
    }

    #[test]
    fn test_from_fields_rejects_non_integer_experience() {
        for bad in ["two", "-1", "2.5", ""] {
            let err = EmployeeProfile::from_fields(&[bad, "PhD", "Manager", "Pune"]).unwrap_err();
            assert!(matches!(err, SalaryError::InputValidation(_)), "accepted '{bad}'");
        }
    }

    #[test]
    fn test_unknown_categories_are_accepted() {
        let p = EmployeeProfile::parse_line("4,Diploma,Astronaut,Mars").unwrap();
        assert_eq!(p.category(JOB_TITLE), Some("Astronaut"));
        assert_eq!(p.category(EXPERIENCE), None);
    }
}
