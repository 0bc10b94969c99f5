use num::Num;
use rayon::prelude::*;
use tracing::debug;

use crate::{
    utils::math::vector::SpMatrix,
    vectorizer::compute::compare::{Compare, DefaultCompare},
};

/// Dense, symmetric N×N cosine similarity matrix with unit diagonal.
///
/// Rows and columns are catalog row positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    /// row-major, n * n
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Cosine similarity between every pair of rows.
    ///
    /// Only the upper triangle is computed; the lower triangle is a mirror,
    /// so `get(i, j) == get(j, i)` holds exactly. The diagonal is 1.0 for
    /// every row, all-zero rows included. Cost is O(N² · D).
    pub fn from_rows<N>(matrix: &SpMatrix<N>) -> Self
    where
        N: Num + Copy + Send + Sync,
        DefaultCompare: Compare<N>,
    {
        let n = matrix.n_rows();
        let rows = matrix.rows();
        // upper[i] holds sim(i, j) for j in i+1..n
        let upper: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                ((i + 1)..n)
                    .map(|j| {
                        <DefaultCompare as Compare<N>>::cosine_similarity(
                            rows[i].raw_iter(),
                            rows[j].raw_iter(),
                        )
                    })
                    .collect()
            })
            .collect();

        let mut data = vec![0.0; n * n];
        for (i, tail) in upper.into_iter().enumerate() {
            data[i * n + i] = 1.0;
            for (offset, sim) in tail.into_iter().enumerate() {
                let j = i + 1 + offset;
                data[i * n + j] = sim;
                data[j * n + i] = sim;
            }
        }
        debug!(n, "similarity matrix built");
        Self { n, data }
    }

    /// Number of rows (= columns)
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarities of row `i` to every row
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.data[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.data[i * self.n + j])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::TfIdfVectorizer;

    fn build(docs: &[&str]) -> SimilarityMatrix {
        let (_, matrix) = TfIdfVectorizer::<f64>::new().fit_transform(docs).unwrap();
        SimilarityMatrix::from_rows(&matrix)
    }

    #[test]
    fn symmetric_with_unit_diagonal() {
        let sim = build(&["space game", "space adventure", "cooking recipes", "space cooking"]);
        assert_eq!(sim.len(), 4);
        for i in 0..4 {
            assert!((sim.get(i, i).unwrap() - 1.0).abs() < 1e-6);
            for j in 0..4 {
                assert_eq!(sim.get(i, j), sim.get(j, i));
                let v = sim.get(i, j).unwrap();
                assert!((0.0..=1.0 + 1e-9).contains(&v));
            }
        }
    }

    #[test]
    fn shared_content_scores_higher() {
        let sim = build(&["space game", "space adventure", "cooking recipes"]);
        assert!(sim.get(0, 1).unwrap() > 0.0);
        assert_eq!(sim.get(0, 2), Some(0.0));
    }

    #[test]
    fn empty_documents_still_have_unit_diagonal() {
        let sim = build(&["", ""]);
        assert_eq!(sim.row(0), Some(&[1.0, 0.0][..]));
        assert_eq!(sim.row(1), Some(&[0.0, 1.0][..]));
        assert_eq!(sim.row(2), None);
        assert_eq!(sim.get(0, 2), None);
    }

    #[test]
    fn no_rows() {
        let sim = build(&[]);
        assert!(sim.is_empty());
    }
}
