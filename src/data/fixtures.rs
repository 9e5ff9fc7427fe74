// Shared test dataset: every (education, title, location) combination
// at three experience levels, with salaries from an additive formula.
// Contains (2, Bachelor, Software Engineer, Pune, 600000) and
// (10, PhD, Tech Lead, Bangalore, 2500000).

use std::{fs, path::{Path, PathBuf}};

use crate::domain::record::{EmployeeProfile, EmployeeRecord};

pub const HEADER: &str = "Experience,Education_Level,Job_Title,Location,Salary";

const EDUCATION: [(&str, f64); 3] = [("Bachelor", 0.0), ("Master", 150_000.0), ("PhD", 300_000.0)];

const TITLES: [(&str, f64); 4] = [
    ("Software Engineer",        500_000.0),
    ("Senior Software Engineer", 900_000.0),
    ("Tech Lead",                1_500_000.0),
    ("Manager",                  1_800_000.0),
];

const LOCATIONS: [(&str, f64); 4] = [
    ("Pune",      0.0),
    ("Chennai",   50_000.0),
    ("Hyderabad", 100_000.0),
    ("Bangalore", 200_000.0),
];

const EXPERIENCE: [u32; 3] = [2, 6, 10];

pub fn sample_records() -> Vec<EmployeeRecord> {
    let mut records = Vec::new();
    for (education, edu_bonus) in EDUCATION {
        for (title, base) in TITLES {
            for (location, loc_bonus) in LOCATIONS {
                for years in EXPERIENCE {
                    let salary = base + edu_bonus + loc_bonus + 50_000.0 * f64::from(years);
                    records.push(EmployeeRecord::new(
                        EmployeeProfile::new(years, education, title, location),
                        salary,
                    ));
                }
            }
        }
    }
    records
}

pub fn sample_csv() -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for r in sample_records() {
        let p = &r.profile;
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            p.experience, p.education_level, p.job_title, p.location, r.salary
        ));
    }
    out
}

/// Write the sample dataset to `dir/employee_data.csv`.
pub fn write_sample_csv(dir: &Path) -> PathBuf {
    let path = dir.join("employee_data.csv");
    fs::write(&path, sample_csv()).unwrap();
    path
}
