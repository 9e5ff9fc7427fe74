// ============================================================
// Layer 5 — Held-out Evaluation
// ============================================================
// Regression metrics over the held-out subset:
//
//   MAE  = mean |y - ŷ|
//   RMSE = sqrt(mean (y - ŷ)²)
//   R²   = 1 - SS_res / SS_tot
//
// When every held-out target is identical SS_tot is zero; R² is
// then 1.0 for a perfect fit and 0.0 otherwise, so the metric
// always stays finite.

use serde::{Deserialize, Serialize};

use crate::domain::error::{SalaryError, SalaryResult};
use crate::domain::record::EmployeeRecord;
use crate::domain::traits::SalaryPredictor;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub mae:  f64,
    pub rmse: f64,
    pub r2:   f64,
}

impl EvalMetrics {
    pub fn compute(y_true: &[f64], y_pred: &[f64]) -> SalaryResult<Self> {
        if y_true.is_empty() {
            return Err(SalaryError::InsufficientData("nothing to evaluate".to_string()));
        }
        if y_true.len() != y_pred.len() {
            return Err(SalaryError::InputValidation(format!(
                "{} targets but {} predictions",
                y_true.len(),
                y_pred.len()
            )));
        }

        let n      = y_true.len() as f64;
        let mean_y = y_true.iter().sum::<f64>() / n;

        let mut abs_sum = 0.0;
        let mut ss_res  = 0.0;
        let mut ss_tot  = 0.0;
        for (&y, &p) in y_true.iter().zip(y_pred) {
            abs_sum += (y - p).abs();
            ss_res  += (y - p).powi(2);
            ss_tot  += (y - mean_y).powi(2);
        }

        let r2 = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Ok(Self {
            mae:  abs_sum / n,
            rmse: (ss_res / n).sqrt(),
            r2,
        })
    }
}

/// Predict every record in `held_out` and score against its salary.
pub fn evaluate<P: SalaryPredictor>(model: &P, held_out: &[EmployeeRecord]) -> SalaryResult<EvalMetrics> {
    let profiles: Vec<_> = held_out.iter().map(|r| r.profile.clone()).collect();
    let y_pred = model.predict_batch(&profiles)?;
    let y_true: Vec<f64> = held_out.iter().map(|r| r.salary).collect();
    EvalMetrics::compute(&y_true, &y_pred)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let m = EvalMetrics::compute(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 6.0]).unwrap();
        assert_eq!(m.mae, 0.5);
        assert_eq!(m.rmse, 1.0);
        // SS_res = 4, SS_tot = 5
        assert!((m.r2 - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_fit() {
        let y = [10.0, 20.0, 30.0];
        let m = EvalMetrics::compute(&y, &y).unwrap();
        assert_eq!((m.mae, m.rmse, m.r2), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_constant_targets_stay_finite() {
        let m = EvalMetrics::compute(&[5.0, 5.0], &[4.0, 6.0]).unwrap();
        assert_eq!(m.r2, 0.0);
        let m = EvalMetrics::compute(&[5.0, 5.0], &[5.0, 5.0]).unwrap();
        assert_eq!(m.r2, 1.0);
    }

    #[test]
    fn test_empty_and_mismatched_inputs() {
        assert!(matches!(
            EvalMetrics::compute(&[], &[]).unwrap_err(),
            SalaryError::InsufficientData(_)
        ));
        assert!(matches!(
            EvalMetrics::compute(&[1.0], &[1.0, 2.0]).unwrap_err(),
            SalaryError::InputValidation(_)
        ));
    }
}
