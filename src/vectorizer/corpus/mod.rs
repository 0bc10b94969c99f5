use std::collections::HashMap;

use ahash::RandomState;

use crate::vectorizer::term::TermFrequency;

/// Keeps per-term corpus statistics for one fit:
/// - how many documents were added
/// - in how many documents each term appears (document frequency)
/// - how often each term appears across the whole corpus
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    doc_num: u64,
    doc_freq: HashMap<Box<str>, u64, RandomState>,
    term_totals: HashMap<Box<str>, u64, RandomState>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            doc_freq: HashMap::with_hasher(RandomState::new()),
            term_totals: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// Add a document's terms to the corpus
    pub fn add_doc(&mut self, freq: &TermFrequency) {
        self.doc_num += 1;
        for (term, count) in freq.iter() {
            *self.doc_freq.entry(term.into()).or_insert(0) += 1;
            *self.term_totals.entry(term.into()).or_insert(0) += count;
        }
    }

    /// Number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of documents containing the term
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Occurrences of the term over all documents
    #[inline]
    pub fn get_term_total(&self, term: &str) -> u64 {
        self.term_totals.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.doc_freq.len()
    }

    /// Pick at most `max_features` terms, most frequent over the corpus first,
    /// ties by term text. The result is sorted by term text.
    pub fn select_vocabulary(&self, max_features: usize) -> Vec<Box<str>> {
        let mut terms: Vec<(&Box<str>, u64)> =
            self.term_totals.iter().map(|(t, &c)| (t, c)).collect();
        if terms.len() > max_features {
            terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            terms.truncate(max_features);
        }
        let mut vocab: Vec<Box<str>> = terms.into_iter().map(|(t, _)| t.clone()).collect();
        vocab.sort();
        vocab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(terms: &[&str]) -> TermFrequency {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }

    #[test]
    fn document_and_total_frequencies() {
        let mut corpus = Corpus::new();
        corpus.add_doc(&freq(&["space", "game", "space"]));
        corpus.add_doc(&freq(&["space", "cooking"]));
        assert_eq!(corpus.get_doc_num(), 2);
        assert_eq!(corpus.get_term_count("space"), 2);
        assert_eq!(corpus.get_term_total("space"), 3);
        assert_eq!(corpus.get_term_count("game"), 1);
        assert_eq!(corpus.get_term_count("missing"), 0);
        assert_eq!(corpus.vocab_size(), 3);
    }

    #[test]
    fn vocabulary_cap_keeps_most_frequent() {
        let mut corpus = Corpus::new();
        corpus.add_doc(&freq(&["b", "b", "b", "a", "c", "c", "d"]));
        // totals: b=3, c=2, a=1, d=1 -> cap 3 keeps b, c and a (tie a < d)
        let expected: Vec<Box<str>> = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(corpus.select_vocabulary(3), expected);
    }

    #[test]
    fn vocabulary_without_cap_pressure_is_sorted() {
        let mut corpus = Corpus::new();
        corpus.add_doc(&freq(&["z", "y", "x"]));
        let expected: Vec<Box<str>> = vec!["x".into(), "y".into(), "z".into()];
        assert_eq!(corpus.select_vocabulary(100), expected);
    }
}
