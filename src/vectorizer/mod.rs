pub mod analyzer;
pub mod compose;
pub mod compute;
pub mod corpus;
pub mod stop_words;
pub mod term;
pub mod tfidf;

use std::marker::PhantomData;

use indexmap::IndexSet;
use num::Num;
use tracing::debug;

use crate::{
    error::{Error, Result},
    utils::math::vector::{SpMatrix, SpVec},
    vectorizer::{
        analyzer::Analyzer,
        corpus::Corpus,
        stop_words::StopWords,
        term::TermFrequency,
        tfidf::{DefaultTfIdfEngine, TfIdfEngine},
    },
};

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 20_000;
/// Unigrams and bigrams
pub const DEFAULT_NGRAM_RANGE: (usize, usize) = (1, 2);

/// TF-IDF vectorizer settings.
///
/// `TfIdfVectorizer<N, E>` has the following generic parameters:
/// - `N`: weight type (`f32` or `f64`)
/// - `E`: weighting engine (e.g. `DefaultTfIdfEngine`)
///
/// `fit` / `fit_transform` produce a [`FittedVectorizer`]; the settings
/// object itself is never mutated, so it can be reused for every reload.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer<N = f64, E = DefaultTfIdfEngine>
where
    N: Num + Copy,
    E: TfIdfEngine<N>,
{
    pub max_features: usize,
    pub ngram_range: (usize, usize),
    pub stop_words: StopWords,
    _marker: PhantomData<(N, E)>,
}

impl<N, E> Default for TfIdfVectorizer<N, E>
where
    N: Num + Copy,
    E: TfIdfEngine<N>,
{
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: DEFAULT_NGRAM_RANGE,
            stop_words: StopWords::English,
            _marker: PhantomData,
        }
    }
}

impl<N, E> TfIdfVectorizer<N, E>
where
    N: Num + Copy,
    E: TfIdfEngine<N>,
{
    /// English stop words, unigrams + bigrams, 20000 terms at most
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Learn vocabulary and idf from the documents.
    ///
    /// An all-empty corpus (or no documents at all) fits an empty vocabulary.
    pub fn fit<S: AsRef<str>>(&self, docs: &[S]) -> Result<FittedVectorizer<N, E>> {
        self.fit_inner(docs).map(|(fitted, _)| fitted)
    }

    /// Learn vocabulary and idf, then return the matrix of the same documents.
    pub fn fit_transform<S: AsRef<str>>(
        &self,
        docs: &[S],
    ) -> Result<(FittedVectorizer<N, E>, SpMatrix<N>)> {
        let (fitted, freqs) = self.fit_inner(docs)?;
        let matrix = fitted.transform_freqs(&freqs);
        Ok((fitted, matrix))
    }

    fn fit_inner<S: AsRef<str>>(
        &self,
        docs: &[S],
    ) -> Result<(FittedVectorizer<N, E>, Vec<TermFrequency>)> {
        if self.max_features == 0 {
            return Err(Error::config("max_features must be positive"));
        }
        let analyzer = Analyzer::new(&self.stop_words, self.ngram_range)?;

        let mut corpus = Corpus::new();
        let freqs: Vec<TermFrequency> = docs
            .iter()
            .map(|doc| {
                let mut freq = TermFrequency::new();
                freq.add_terms(&analyzer.analyze(doc.as_ref()));
                corpus.add_doc(&freq);
                freq
            })
            .collect();

        let vocabulary: IndexSet<Box<str>> =
            corpus.select_vocabulary(self.max_features).into_iter().collect();
        let idf = E::idf_vec(&corpus, &vocabulary);
        debug!(
            docs = docs.len(),
            terms_seen = corpus.vocab_size(),
            terms_kept = vocabulary.len(),
            "vectorizer fitted"
        );

        let fitted = FittedVectorizer {
            analyzer,
            vocabulary,
            idf,
            _marker: PhantomData,
        };
        Ok((fitted, freqs))
    }
}

/// Fitted vectorizer state: analyzer, vocabulary (term -> column) and idf.
/// Read-only after `fit`.
#[derive(Debug, Clone)]
pub struct FittedVectorizer<N = f64, E = DefaultTfIdfEngine>
where
    N: Num + Copy,
    E: TfIdfEngine<N>,
{
    analyzer: Analyzer,
    vocabulary: IndexSet<Box<str>>,
    idf: Vec<N>,
    _marker: PhantomData<E>,
}

impl<N, E> FittedVectorizer<N, E>
where
    N: Num + Copy,
    E: TfIdfEngine<N>,
{
    /// Number of columns
    #[inline]
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Terms in column order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(|t| &**t)
    }

    /// Column of a term
    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get_index_of(term)
    }

    #[inline]
    pub fn idf(&self) -> &[N] {
        &self.idf
    }

    #[inline]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Vector of one document in the fitted space
    pub fn transform_one(&self, doc: &str) -> SpVec<N> {
        let mut freq = TermFrequency::new();
        freq.add_terms(&self.analyzer.analyze(doc));
        self.weigh(&freq)
    }

    /// Matrix of documents in the fitted space
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> SpMatrix<N> {
        SpMatrix::from_rows(
            docs.iter().map(|doc| self.transform_one(doc.as_ref())).collect(),
            self.n_features(),
        )
    }

    fn transform_freqs(&self, freqs: &[TermFrequency]) -> SpMatrix<N> {
        SpMatrix::from_rows(
            freqs.iter().map(|freq| self.weigh(freq)).collect(),
            self.n_features(),
        )
    }

    #[inline]
    fn weigh(&self, freq: &TermFrequency) -> SpVec<N> {
        E::weigh(E::tf_vec(freq, &self.vocabulary), &self.idf)
    }
}
