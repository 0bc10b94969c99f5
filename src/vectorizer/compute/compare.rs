use std::cmp::Ordering;

use num::Num;

pub trait Compare<N>
where
    N: Num + Copy,
{
    /// dot product over sparse (index, value) iterators sorted by index
    /// d(a, b) = Σ(a_i * b_i)
    fn dot(vec: impl Iterator<Item = (usize, N)>, other: impl Iterator<Item = (usize, N)>) -> f64;
    /// cosine similarity over sparse (index, value) iterators sorted by index
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    /// 0.0 when either side is all zero
    fn cosine_similarity(vec: impl Iterator<Item = (usize, N)>, other: impl Iterator<Item = (usize, N)>) -> f64;
}

#[derive(Debug, Clone, Default)]
pub struct DefaultCompare;

/// Merge join of two sorted sparse iterators.
/// Returns (dot, ||a||^2, ||b||^2).
#[inline(always)]
fn merge_join<N>(
    vec: impl Iterator<Item = (usize, N)>,
    other: impl Iterator<Item = (usize, N)>,
) -> (f64, f64, f64)
where
    N: Into<f64> + Copy,
{
    let mut a_it = vec.fuse();
    let mut b_it = other.fuse();
    let mut a_next = a_it.next();
    let mut b_next = b_it.next();
    let mut norm_a = 0_f64;
    let mut norm_b = 0_f64;
    let mut dot = 0_f64;
    while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
        let (va, vb): (f64, f64) = (va.into(), vb.into());
        match ia.cmp(&ib) {
            Ordering::Equal => {
                norm_a += va * va;
                norm_b += vb * vb;
                dot += va * vb;
                a_next = a_it.next();
                b_next = b_it.next();
            }
            Ordering::Less => {
                norm_a += va * va;
                a_next = a_it.next();
            }
            Ordering::Greater => {
                norm_b += vb * vb;
                b_next = b_it.next();
            }
        }
    }
    while let Some((_, va)) = a_next {
        let va: f64 = va.into();
        norm_a += va * va;
        a_next = a_it.next();
    }
    while let Some((_, vb)) = b_next {
        let vb: f64 = vb.into();
        norm_b += vb * vb;
        b_next = b_it.next();
    }
    (dot, norm_a, norm_b)
}

#[inline(always)]
fn cosine_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

impl Compare<f32> for DefaultCompare {
    #[inline(always)]
    fn dot(vec: impl Iterator<Item = (usize, f32)>, other: impl Iterator<Item = (usize, f32)>) -> f64 {
        merge_join(vec, other).0
    }

    #[inline(always)]
    fn cosine_similarity(vec: impl Iterator<Item = (usize, f32)>, other: impl Iterator<Item = (usize, f32)>) -> f64 {
        let (dot, norm_a, norm_b) = merge_join(vec, other);
        cosine_from_parts(dot, norm_a, norm_b)
    }
}

impl Compare<f64> for DefaultCompare {
    #[inline(always)]
    fn dot(vec: impl Iterator<Item = (usize, f64)>, other: impl Iterator<Item = (usize, f64)>) -> f64 {
        merge_join(vec, other).0
    }

    #[inline(always)]
    fn cosine_similarity(vec: impl Iterator<Item = (usize, f64)>, other: impl Iterator<Item = (usize, f64)>) -> f64 {
        let (dot, norm_a, norm_b) = merge_join(vec, other);
        cosine_from_parts(dot, norm_a, norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let a = vec![(0usize, 1.0_f64), (3, 2.0)];
        let b = vec![(0usize, 2.0_f64), (3, 4.0)];
        let cos = <DefaultCompare as Compare<f64>>::cosine_similarity(a.into_iter(), b.into_iter());
        assert!((cos - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_disjoint_vectors_is_zero() {
        let a = vec![(0usize, 1.0_f32)];
        let b = vec![(1usize, 1.0_f32)];
        assert_eq!(<DefaultCompare as Compare<f32>>::cosine_similarity(a.into_iter(), b.into_iter()), 0.0);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let a: Vec<(usize, f64)> = vec![];
        let b = vec![(1usize, 1.0_f64)];
        assert_eq!(<DefaultCompare as Compare<f64>>::cosine_similarity(a.into_iter(), b.into_iter()), 0.0);
    }

    #[test]
    fn dot_counts_overlap_only() {
        let a = vec![(0usize, 1.0_f64), (2, 2.0), (5, 1.0)];
        let b = vec![(2usize, 3.0_f64), (5, 4.0), (7, 9.0)];
        assert_eq!(<DefaultCompare as Compare<f64>>::dot(a.into_iter(), b.into_iter()), 10.0);
    }
}
