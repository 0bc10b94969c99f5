use indexmap::IndexSet;
use num::Num;

use crate::{
    utils::math::vector::SpVec,
    vectorizer::{corpus::Corpus, term::TermFrequency},
};

/// Weighting strategy of the vectorizer.
///
/// `idf_vec` is computed once per fit, `tf_vec` once per document;
/// `weigh` combines the two into the final row of the matrix.
pub trait TfIdfEngine<N>
where
    N: Num + Copy,
{
    /// IDF vector, one entry per vocabulary term (column order)
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<N>;
    /// Raw term counts of one document in vocabulary space.
    /// Terms outside the vocabulary are ignored.
    fn tf_vec(freq: &TermFrequency, vocabulary: &IndexSet<Box<str>>) -> SpVec<N>;
    /// tf * idf, then row normalization
    fn weigh(tf: SpVec<N>, idf: &[N]) -> SpVec<N>;
}

/// Default TF-IDF engine
/// - tf: raw count
/// - idf: smoothed, ln((1 + n) / (1 + df)) + 1
/// - rows scaled to unit L2 norm (all-zero rows stay zero)
///
/// Implemented for `f32` and `f64`.
#[derive(Debug, Clone, Default)]
pub struct DefaultTfIdfEngine;

#[inline]
fn smooth_idf(doc_num: u64, doc_freq: u64) -> f64 {
    ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}

fn count_pairs(freq: &TermFrequency, vocabulary: &IndexSet<Box<str>>) -> Vec<(usize, u64)> {
    freq.iter()
        .filter_map(|(term, count)| vocabulary.get_index_of(term).map(|idx| (idx, count)))
        .collect()
}

impl TfIdfEngine<f64> for DefaultTfIdfEngine {
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<f64> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|term| smooth_idf(doc_num, corpus.get_term_count(term)))
            .collect()
    }

    fn tf_vec(freq: &TermFrequency, vocabulary: &IndexSet<Box<str>>) -> SpVec<f64> {
        SpVec::from_pairs(
            vocabulary.len(),
            count_pairs(freq, vocabulary)
                .into_iter()
                .map(|(idx, count)| (idx, count as f64)),
        )
    }

    fn weigh(mut tf: SpVec<f64>, idf: &[f64]) -> SpVec<f64> {
        let weights: Vec<f64> = tf.indices().iter().map(|&i| idf[i]).collect();
        for (v, w) in tf.values_mut().iter_mut().zip(weights) {
            *v *= w;
        }
        tf.l2_normalize();
        tf
    }
}

impl TfIdfEngine<f32> for DefaultTfIdfEngine {
    fn idf_vec(corpus: &Corpus, vocabulary: &IndexSet<Box<str>>) -> Vec<f32> {
        let doc_num = corpus.get_doc_num();
        vocabulary
            .iter()
            .map(|term| smooth_idf(doc_num, corpus.get_term_count(term)) as f32)
            .collect()
    }

    fn tf_vec(freq: &TermFrequency, vocabulary: &IndexSet<Box<str>>) -> SpVec<f32> {
        SpVec::from_pairs(
            vocabulary.len(),
            count_pairs(freq, vocabulary)
                .into_iter()
                .map(|(idx, count)| (idx, count as f32)),
        )
    }

    fn weigh(mut tf: SpVec<f32>, idf: &[f32]) -> SpVec<f32> {
        let weights: Vec<f32> = tf.indices().iter().map(|&i| idf[i]).collect();
        for (v, w) in tf.values_mut().iter_mut().zip(weights) {
            *v *= w;
        }
        tf.l2_normalize();
        tf
    }
}
