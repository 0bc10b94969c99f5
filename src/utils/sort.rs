use std::cmp::Ordering;

/// Stable descending argsort over f64 scores.
/// - Returns row positions ordered by score, highest first
/// - Equal scores keep their original (ascending position) order
/// - NaN sorts after every number
///
/// Complexity: O(n log n)
pub fn argsort_desc_stable(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // slice::sort_by is a stable merge sort
    order.sort_by(|&a, &b| desc_nan_last(scores[a], scores[b]));
    order
}

#[inline]
fn desc_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argsort_handles_empty_and_single() {
        assert!(argsort_desc_stable(&[]).is_empty());
        assert_eq!(argsort_desc_stable(&[0.3]), vec![0]);
    }

    #[test]
    fn argsort_orders_descending() {
        assert_eq!(argsort_desc_stable(&[0.1, 0.9, 0.5]), vec![1, 2, 0]);
    }

    #[test]
    fn argsort_is_stable_on_ties() {
        let scores = [0.5, 1.0, 0.5, 1.0, 0.5];
        assert_eq!(argsort_desc_stable(&scores), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn argsort_puts_nan_last() {
        let scores = [f64::NAN, 0.2, 0.7, f64::NAN];
        assert_eq!(argsort_desc_stable(&scores), vec![2, 1, 0, 3]);
    }

    #[test]
    fn argsort_treats_signed_zeros_as_tied() {
        assert_eq!(argsort_desc_stable(&[-0.0, 0.0]), vec![0, 1]);
    }
}
