// ============================================================
// Layer 1 — Terminal Rendering
// ============================================================
// Formats predictions and dataset insights for stdout. Pure
// functions over plain values, so output is testable without
// a model:
//
//   format_salary(600000.0)   → "₹ 600,000"
//   InsightsTable(&insights)  → four text sections via Display

use std::fmt;

use crate::data::insights::DatasetInsights;

/// `₹ 1,234,567`: rounded to the nearest rupee, comma-grouped by thousands.
pub fn format_salary(salary: f64) -> String {
    format!("₹ {}", group_thousands(salary.round() as i64))
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Text tables for `insights`, one section per exploratory view.
pub struct InsightsTable<'a>(pub &'a DatasetInsights);

impl fmt::Display for InsightsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let insights = self.0;
        let s = &insights.salary;

        writeln!(f, "Rows: {}", insights.rows)?;
        writeln!(f)?;
        writeln!(f, "Salary distribution")?;
        writeln!(
            f,
            "  min {}  max {}  mean {}  median {}  std {}",
            format_salary(s.min),
            format_salary(s.max),
            format_salary(s.mean),
            format_salary(s.median),
            format_salary(s.std_dev),
        )?;
        let peak = s.histogram.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        for bin in &s.histogram {
            writeln!(
                f,
                "  {:>13} - {:>13}  {:>5}  {}",
                group_thousands(bin.lower.round() as i64),
                group_thousands(bin.upper.round() as i64),
                bin.count,
                "#".repeat((bin.count * 40).div_ceil(peak))
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Experience vs salary by education level")?;
        for t in &insights.experience_by_education {
            let slope = t
                .salary_per_year
                .map(|v| format!("{} / year", format_salary(v)))
                .unwrap_or_else(|| "n/a".to_string());
            writeln!(
                f,
                "  {:<12} n={:<5} mean exp {:>5.1}  mean {}  slope {}",
                t.education_level,
                t.count,
                t.mean_experience,
                format_salary(t.mean_salary),
                slope
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Average salary by job title")?;
        for g in &insights.salary_by_job_title {
            writeln!(f, "  {:<24} n={:<5} {}", g.group, g.count, format_salary(g.mean))?;
        }

        writeln!(f)?;
        writeln!(f, "Salary by location (min / q1 / median / q3 / max)")?;
        for b in &insights.salary_by_location {
            writeln!(
                f,
                "  {:<12} n={:<5} {} / {} / {} / {} / {}",
                b.group,
                b.count,
                group_thousands(b.min.round() as i64),
                group_thousands(b.q1.round() as i64),
                group_thousands(b.median.round() as i64),
                group_thousands(b.q3.round() as i64),
                group_thousands(b.max.round() as i64),
            )?;
        }
        Ok(())
    }
}
