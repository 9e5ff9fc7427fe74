// ============================================================
// Layer 4 — Dataset Insights
// ============================================================
// Descriptive statistics over the training dataset: the data
// behind the four exploratory views shown next to a prediction:
//
//   1. Salary distribution          → histogram + mean/median/std
//   2. Experience vs salary         → per education level: counts,
//                                     means, least-squares slope
//   3. Average salary by job title  → per title: count + mean
//   4. Salary by location           → per location: five-number
//                                     box statistics
//
// Groups are reported in lexicographic order of their name.
// Quantiles use linear interpolation between closest ranks.
// The histogram takes between 1 and MAX_HISTOGRAM_BINS bins.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::error::{SalaryError, SalaryResult};
use crate::domain::record::EmployeeRecord;

/// Upper bound on the number of salary histogram bins
pub const MAX_HISTOGRAM_BINS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInsights {
    pub rows:                    usize,
    pub salary:                  SalaryDistribution,
    pub experience_by_education: Vec<ExperienceTrend>,
    pub salary_by_job_title:     Vec<GroupMean>,
    pub salary_by_location:      Vec<BoxStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryDistribution {
    pub min:    f64,
    pub max:    f64,
    pub mean:   f64,
    pub median: f64,
    /// Sample standard deviation (n - 1); 0 for a single row
    pub std_dev: f64,
    pub histogram: Vec<HistogramBin>,
}

/// Half-open bin `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceTrend {
    pub education_level: String,
    pub count:           usize,
    pub mean_experience: f64,
    pub mean_salary:     f64,
    /// Salary change per extra year; None when all rows share one experience value
    pub salary_per_year: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub group: String,
    pub count: usize,
    pub mean:  f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub group:  String,
    pub count:  usize,
    pub min:    f64,
    pub q1:     f64,
    pub median: f64,
    pub q3:     f64,
    pub max:    f64,
}

impl DatasetInsights {
    /// Summarise `records` using `bins` histogram bins.
    pub fn compute(records: &[EmployeeRecord], bins: usize) -> SalaryResult<Self> {
        if !(1..=MAX_HISTOGRAM_BINS).contains(&bins) {
            return Err(SalaryError::InputValidation(format!(
                "histogram bins must be between 1 and {MAX_HISTOGRAM_BINS}, got {bins}"
            )));
        }
        if records.is_empty() {
            return Err(SalaryError::InsufficientData(
                "cannot summarise an empty dataset".to_string(),
            ));
        }

        let salaries: Vec<f64> = records.iter().map(|r| r.salary).collect();

        Ok(Self {
            rows:                    records.len(),
            salary:                  SalaryDistribution::compute(&salaries, bins),
            experience_by_education: experience_trends(records),
            salary_by_job_title:     group_means(records, |r| &r.profile.job_title),
            salary_by_location:      box_stats(records, |r| &r.profile.location),
        })
    }
}

impl SalaryDistribution {
    fn compute(salaries: &[f64], bins: usize) -> Self {
        let sorted = sorted(salaries);
        let min    = sorted[0];
        let max    = sorted[sorted.len() - 1];
        let mean   = mean(salaries);

        Self {
            min,
            max,
            mean,
            median:    quantile(&sorted, 0.5),
            std_dev:   sample_std_dev(salaries, mean),
            histogram: histogram(salaries, min, max, bins),
        }
    }
}

fn histogram(values: &[f64], min: f64, max: f64, bins: usize) -> Vec<HistogramBin> {
    let width = (max - min) / bins as f64;

    // Every value identical → one bin holds everything
    if width <= 0.0 {
        return vec![HistogramBin { lower: min, upper: max, count: values.len() }];
    }

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count,
        })
        .collect()
}

fn experience_trends(records: &[EmployeeRecord]) -> Vec<ExperienceTrend> {
    let mut groups: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for r in records {
        groups
            .entry(r.profile.education_level.as_str())
            .or_default()
            .push((f64::from(r.profile.experience), r.salary));
    }

    groups
        .into_iter()
        .map(|(level, points)| {
            let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
            let (mx, my)     = (mean(&xs), mean(&ys));

            let sxx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
            let sxy: f64 = points.iter().map(|(x, y)| (x - mx) * (y - my)).sum();

            ExperienceTrend {
                education_level: level.to_string(),
                count:           points.len(),
                mean_experience: mx,
                mean_salary:     my,
                salary_per_year: (sxx > 0.0).then(|| sxy / sxx),
            }
        })
        .collect()
}

fn group_means<F>(records: &[EmployeeRecord], key: F) -> Vec<GroupMean>
where
    F: Fn(&EmployeeRecord) -> &String,
{
    group_salaries(records, key)
        .into_iter()
        .map(|(group, salaries)| GroupMean {
            group,
            count: salaries.len(),
            mean:  mean(&salaries),
        })
        .collect()
}

fn box_stats<F>(records: &[EmployeeRecord], key: F) -> Vec<BoxStats>
where
    F: Fn(&EmployeeRecord) -> &String,
{
    group_salaries(records, key)
        .into_iter()
        .map(|(group, salaries)| {
            let s = sorted(&salaries);
            BoxStats {
                group,
                count:  s.len(),
                min:    s[0],
                q1:     quantile(&s, 0.25),
                median: quantile(&s, 0.5),
                q3:     quantile(&s, 0.75),
                max:    s[s.len() - 1],
            }
        })
        .collect()
}

fn group_salaries<F>(records: &[EmployeeRecord], key: F) -> BTreeMap<String, Vec<f64>>
where
    F: Fn(&EmployeeRecord) -> &String,
{
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for r in records {
        groups.entry(key(r).clone()).or_default().push(r.salary);
    }
    groups
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos  = q * (sorted.len() - 1) as f64;
    let lo   = pos.floor() as usize;
    let hi   = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
