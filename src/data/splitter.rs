// ============================================================
// Layer 4 — Train/Held-out Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them into:
//   - Training set: used to fit the encoder and the forest
//   - Held-out set: used only to measure generalisation error
//
// The split is a pure function of (samples, test_fraction, seed):
// the same inputs always produce the same two subsets.
//
//   held-out size = ceil(test_fraction * n)
//   training size = n - held-out size
//
// The first `held-out size` entries of the seeded permutation
// form the held-out set, the rest form the training set.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom on a
// StdRng seeded from the configured seed.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::error::{SalaryError, SalaryResult};

/// Deterministically split `samples` into (train, held_out).
///
/// # Errors
/// InsufficientData when either subset would be empty, e.g. an
/// empty dataset or a single row.
///
/// # Example
/// ```ignore
/// let (train, test) = split_train_test(records, 0.2, 42)?;
/// // 100 records → 80 train, 20 held out
/// ```
pub fn split_train_test<T>(
    samples:       Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> SalaryResult<(Vec<T>, Vec<T>)> {
    let total = samples.len();
    if total == 0 {
        return Err(SalaryError::InsufficientData("dataset has no rows".to_string()));
    }

    let n_test  = ((total as f64) * test_fraction).ceil() as usize;
    let n_train = total.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(SalaryError::InsufficientData(format!(
            "{total} row(s) cannot be split into non-empty training and held-out sets \
             with test fraction {test_fraction}"
        )));
    }

    // Shuffle positions, not the samples themselves, so T needs no Clone
    let mut rng   = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..total).collect();
    order.shuffle(&mut rng);

    let mut slots: Vec<Option<T>> = samples.into_iter().map(Some).collect();
    let mut take  = |i: usize| slots[i].take();

    let test:  Vec<T> = order[..n_test].iter().filter_map(|&i| take(i)).collect();
    let train: Vec<T> = order[n_test..].iter().filter_map(|&i| take(i)).collect();

    tracing::debug!(
        "Dataset split: {} training, {} held-out (seed {})",
        train.len(),
        test.len(),
        seed,
    );

    Ok((train, test))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_held_out_size_rounds_up() {
        let items: Vec<usize> = (0..11).collect();
        let (train, test)     = split_train_test(items, 0.2, 42).unwrap();
        assert_eq!(test.len(),  3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_all_items_preserved() {
        let items: Vec<usize>  = (0..50).collect();
        let (train, test)      = split_train_test(items, 0.3, 7).unwrap();
        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_test((0..40).collect::<Vec<usize>>(), 0.2, 42).unwrap();
        let b = split_train_test((0..40).collect::<Vec<usize>>(), 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_split() {
        let a = split_train_test((0..40).collect::<Vec<usize>>(), 0.2, 1).unwrap();
        let b = split_train_test((0..40).collect::<Vec<usize>>(), 0.2, 2).unwrap();
        assert_ne!(a.1, b.1);
    }

    #[test]
    fn test_empty_dataset() {
        let err = split_train_test(Vec::<usize>::new(), 0.2, 42).unwrap_err();
        assert!(matches!(err, SalaryError::InsufficientData(_)));
    }

    #[test]
    fn test_single_row_is_too_small() {
        let err = split_train_test(vec![1usize], 0.2, 42).unwrap_err();
        assert!(matches!(err, SalaryError::InsufficientData(_)));
    }
}
