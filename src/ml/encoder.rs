// ============================================================
// Layer 5 — One-Hot Encoder
// ============================================================
// Stage 1 of the pipeline. Learns, per categorical column, the
// sorted set of values seen in the training subset, then maps a
// profile to a numeric feature vector:
//
//   [ Education_Level one-hot | Job_Title one-hot | Location one-hot | Experience ]
//
// Example with vocabularies
//   Education_Level = [Bachelor, Master, PhD]
//   Job_Title       = [Software Engineer, Tech Lead]
//   Location        = [Bangalore, Pune]
//
//   (2, Master, Tech Lead, Pune) → [0,1,0, 0,1, 0,1, 2.0]
//   (5, Diploma, Tech Lead, Oslo) → [0,0,0, 0,1, 0,0, 5.0]
//                                    ^^^^^ unseen → all zeros
//
// The vocabulary is frozen at fit time; transform never fails.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::record::{EmployeeProfile, CATEGORICAL_COLUMNS, EXPERIENCE};
use crate::domain::traits::FeatureEncoder;

/// Sorted, de-duplicated categories of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub column:     String,
    pub categories: Vec<String>,
}

impl Vocabulary {
    fn position(&self, value: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    vocabularies: Vec<Vocabulary>,
}

impl OneHotEncoder {
    /// Learn one vocabulary per categorical column from `profiles`.
    pub fn fit<'a>(profiles: impl IntoIterator<Item = &'a EmployeeProfile>) -> Self {
        let mut seen: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); CATEGORICAL_COLUMNS.len()];

        for profile in profiles {
            for (set, column) in seen.iter_mut().zip(CATEGORICAL_COLUMNS) {
                if let Some(value) = profile.category(column) {
                    set.insert(value);
                }
            }
        }

        let vocabularies = seen
            .into_iter()
            .zip(CATEGORICAL_COLUMNS)
            .map(|(set, column)| Vocabulary {
                column:     column.to_string(),
                categories: set.into_iter().map(str::to_string).collect(),
            })
            .collect::<Vec<_>>();

        for v in &vocabularies {
            tracing::debug!("{}: {} categories", v.column, v.categories.len());
        }

        Self { vocabularies }
    }

    pub fn vocabularies(&self) -> &[Vocabulary] {
        &self.vocabularies
    }

    /// Human-readable name of every output position, e.g. "Location=Pune".
    pub fn feature_names(&self) -> Vec<String> {
        self.vocabularies
            .iter()
            .flat_map(|v| v.categories.iter().map(move |c| format!("{}={}", v.column, c)))
            .chain(std::iter::once(EXPERIENCE.to_string()))
            .collect()
    }

    /// Structural check for a decoded encoder: one vocabulary per
    /// categorical column, in order, each strictly sorted.
    pub fn validate(&self) -> Result<(), String> {
        let columns: Vec<&str> = self.vocabularies.iter().map(|v| v.column.as_str()).collect();
        if columns != CATEGORICAL_COLUMNS {
            return Err(format!(
                "encoder columns {columns:?} do not match expected {CATEGORICAL_COLUMNS:?}"
            ));
        }
        for v in &self.vocabularies {
            if v.categories.windows(2).any(|w| w[0] >= w[1]) {
                return Err(format!("vocabulary for {} is not strictly sorted", v.column));
            }
        }
        Ok(())
    }
}

impl FeatureEncoder for OneHotEncoder {
    fn width(&self) -> usize {
        self.vocabularies.iter().map(|v| v.categories.len()).sum::<usize>() + 1
    }

    fn transform(&self, profile: &EmployeeProfile) -> Vec<f64> {
        let mut features = Vec::with_capacity(self.width());

        for v in &self.vocabularies {
            let start = features.len();
            features.resize(start + v.categories.len(), 0.0);

            if let Some(pos) = profile.category(&v.column).and_then(|value| v.position(value)) {
                features[start + pos] = 1.0;
            }
        }

        // Remainder column passes through unchanged
        features.push(f64::from(profile.experience));
        features
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> OneHotEncoder {
        let profiles = [
            EmployeeProfile::new(2, "Master", "Tech Lead", "Pune"),
            EmployeeProfile::new(4, "Bachelor", "Software Engineer", "Bangalore"),
            EmployeeProfile::new(9, "PhD", "Tech Lead", "Pune"),
        ];
        OneHotEncoder::fit(&profiles)
    }

    #[test]
    fn test_vocabularies_are_sorted_and_unique() {
        let enc = encoder();
        assert_eq!(enc.vocabularies()[0].categories, ["Bachelor", "Master", "PhD"]);
        assert_eq!(enc.vocabularies()[1].categories, ["Software Engineer", "Tech Lead"]);
        assert_eq!(enc.vocabularies()[2].categories, ["Bangalore", "Pune"]);
        assert_eq!(enc.width(), 8);
        assert!(enc.validate().is_ok());
    }

    #[test]
    fn test_transform_known_values() {
        let enc = encoder();
        let v = enc.transform(&EmployeeProfile::new(2, "Master", "Tech Lead", "Pune"));
        assert_eq!(v, [0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_unknown_values_encode_as_zeros() {
        let enc = encoder();
        let v = enc.transform(&EmployeeProfile::new(5, "Diploma", "Tech Lead", "Oslo"));
        assert_eq!(v, [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_feature_names_line_up_with_width() {
        let enc = encoder();
        let names = enc.feature_names();
        assert_eq!(names.len(), enc.width());
        assert_eq!(names[0], "Education_Level=Bachelor");
        assert_eq!(names[7], "Experience");
    }

    #[test]
    fn test_validate_rejects_unsorted_vocabulary() {
        let mut enc = encoder();
        enc.vocabularies[2].categories.reverse();
        assert!(enc.validate().is_err());
    }
}
