//! Score normalization and the content/popularity blend.

use crate::error::{Error, Result};

/// Guard added to the value range so a constant vector maps to all zeros
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// Min-max normalize into [0, 1]: `(x - min) / (max - min + ε)`.
///
/// A constant vector (including a single element) yields all zeros.
/// An empty input yields an empty output. The input is not modified.
///
/// Any finite input is accepted; values spanning more than `f64::MAX` still
/// land in [0, 1].
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    // halved so that `max - min` cannot overflow; scaling by 0.5 is exact
    let low = min * 0.5;
    let range = max * 0.5 - low + NORMALIZE_EPSILON * 0.5;
    values.iter().map(|&v| (v * 0.5 - low) / range).collect()
}

/// Check that a blend weight lies in [0, 1]
pub fn validate_alpha(alpha: f64) -> Result<()> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(Error::config(format!("alpha must be within [0, 1], got {alpha}")))
    }
}

/// Blend normalized content similarity with normalized popularity:
/// `alpha * content_norm + (1 - alpha) * popularity_norm`.
///
/// `alpha = 1` is pure content ranking, `alpha = 0` pure popularity ranking.
pub fn hybrid_scores(content: &[f64], popularity: &[f64], alpha: f64) -> Result<Vec<f64>> {
    validate_alpha(alpha)?;
    if content.len() != popularity.len() {
        return Err(Error::shape(content.len(), popularity.len()));
    }
    let content_norm = min_max_normalize(content);
    let popularity_norm = min_max_normalize(popularity);
    Ok(content_norm
        .into_iter()
        .zip(popularity_norm)
        .map(|(c, p)| alpha * c + (1.0 - alpha) * p)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_into_unit_range() {
        let norm = min_max_normalize(&[2.0, 4.0, 6.0]);
        assert_eq!(norm[0], 0.0);
        assert!((norm[1] - 0.5).abs() < 1e-8);
        assert!((norm[2] - 1.0).abs() < 1e-8);
        assert!(norm[2] < 1.0);
    }

    #[test]
    fn constant_vector_maps_to_zeros() {
        assert_eq!(min_max_normalize(&[3.0, 3.0, 3.0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(min_max_normalize(&[7.0]), vec![0.0]);
        assert!(min_max_normalize(&[]).is_empty());
    }

    #[test]
    fn full_f64_span_stays_finite() {
        let norm = min_max_normalize(&[-f64::MAX, 0.0, f64::MAX]);
        assert!(norm.iter().all(|v| v.is_finite()));
        assert_eq!(norm[0], 0.0);
        assert!((norm[1] - 0.5).abs() < 1e-8);
        assert!((norm[2] - 1.0).abs() < 1e-8);

        let blended = hybrid_scores(&[0.0, 1.0], &[-f64::MAX, f64::MAX], 0.5).unwrap();
        assert!(blended.iter().all(|v| v.is_finite() && (0.0..=1.0).contains(v)));
    }

    #[test]
    fn normalizing_twice_is_near_idempotent() {
        let once = min_max_normalize(&[0.1, 0.7, 0.3, 0.0, 1.0]);
        let twice = min_max_normalize(&once);
        for (a, b) in once.iter().zip(&twice) {
            assert!((a - b).abs() < 1e-8);
        }
    }

    #[test]
    fn alpha_extremes_select_one_signal() {
        let content = [1.0, 0.2, 0.8];
        let popularity = [0.0, 10.0, 5.0];
        let pure_content = hybrid_scores(&content, &popularity, 1.0).unwrap();
        assert_eq!(pure_content, min_max_normalize(&content));
        let pure_pop = hybrid_scores(&content, &popularity, 0.0).unwrap();
        assert_eq!(pure_pop, min_max_normalize(&popularity));
    }

    #[test]
    fn blend_is_weighted_sum() {
        let h = hybrid_scores(&[0.0, 1.0], &[1.0, 0.0], 0.25).unwrap();
        assert!((h[0] - 0.75).abs() < 1e-8);
        assert!((h[1] - 0.25).abs() < 1e-8);
    }

    #[test]
    fn alpha_out_of_range_is_rejected() {
        for alpha in [-0.1, 1.1, f64::NAN] {
            assert!(matches!(
                hybrid_scores(&[1.0], &[1.0], alpha),
                Err(Error::Configuration(_))
            ));
        }
    }

    #[test]
    fn length_mismatch_is_a_shape_error() {
        match hybrid_scores(&[1.0, 0.5], &[1.0], 0.5) {
            Err(Error::Shape { expected, actual }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("expected Shape, got {other:?}"),
        }
    }

    #[test]
    fn inputs_are_not_mutated() {
        let content = vec![0.3, 0.9];
        let popularity = vec![4.0, 2.0];
        let _ = hybrid_scores(&content, &popularity, 0.6).unwrap();
        assert_eq!(content, vec![0.3, 0.9]);
        assert_eq!(popularity, vec![4.0, 2.0]);
    }
}
