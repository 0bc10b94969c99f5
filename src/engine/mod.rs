//! The recommendation engine.
//!
//! A [`RecommenderEngine`] is built once per loaded catalog and never changes
//! afterwards: composed documents are vectorized, the pairwise similarity
//! matrix is computed and the popularity column is copied out. Queries only
//! read that state, so one engine can serve any number of concurrent
//! `recommend` calls. Reloading means building a new engine and swapping it
//! in through an [`EngineHandle`].

pub mod handle;
pub mod hybrid;
pub mod rank;
pub mod similarity;

use tracing::{debug, info};

use crate::{
    catalog::Catalog,
    config::EngineConfig,
    error::{Error, Result},
    vectorizer::{compose::compose_documents, FittedVectorizer, TfIdfVectorizer},
};

pub use handle::EngineHandle;
pub use hybrid::{hybrid_scores, min_max_normalize};
pub use rank::{rank, Recommendation, Recommendations};
pub use similarity::SimilarityMatrix;

/// Immutable engine state for one catalog.
///
/// The similarity matrix and the popularity vector are index-aligned with
/// the catalog's row order.
#[derive(Debug, Clone)]
pub struct RecommenderEngine {
    catalog: Catalog,
    vectorizer: FittedVectorizer,
    similarity: SimilarityMatrix,
    popularity: Vec<f64>,
    default_alpha: f64,
    default_topn: usize,
}

impl RecommenderEngine {
    /// Compose, vectorize and compare every item of the catalog.
    pub fn build(catalog: Catalog, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let docs = compose_documents(&catalog, &config.text_fields);
        let (vectorizer, matrix) = TfIdfVectorizer::<f64>::new()
            .with_max_features(config.max_features)
            .with_ngram_range(config.ngram_range.0, config.ngram_range.1)
            .with_stop_words(config.stop_words.clone())
            .fit_transform(&docs)?;
        let similarity = SimilarityMatrix::from_rows(&matrix);
        let popularity = catalog.popularity();

        if similarity.len() != catalog.len() {
            return Err(Error::shape(catalog.len(), similarity.len()));
        }
        if popularity.len() != catalog.len() {
            return Err(Error::shape(catalog.len(), popularity.len()));
        }
        info!(
            items = catalog.len(),
            features = vectorizer.n_features(),
            "recommender engine built"
        );
        Ok(Self {
            catalog,
            vectorizer,
            similarity,
            popularity,
            default_alpha: config.default_alpha,
            default_topn: config.default_topn,
        })
    }

    /// Items most similar to `title`, blended with popularity.
    ///
    /// Surrounding whitespace in `title` is ignored, as it is for catalog
    /// titles. An unknown title gives an empty result, not an error. `topn == 0`
    /// gives an empty result; a `topn` beyond the catalog gives every other
    /// item. Fails if `alpha` is outside [0, 1].
    pub fn recommend(&self, title: &str, topn: usize, alpha: f64) -> Result<Recommendations> {
        hybrid::validate_alpha(alpha)?;
        // catalog titles are stored trimmed
        let title = title.trim();
        let Some(anchor) = self.catalog.position(title) else {
            debug!(title, "unknown title, no recommendations");
            return Ok(Recommendations::default());
        };
        let content = self
            .similarity
            .row(anchor)
            .ok_or_else(|| Error::shape(self.catalog.len(), self.similarity.len()))?;
        let scores = hybrid_scores(content, &self.popularity, alpha)?;
        Ok(rank(&self.catalog, &scores, anchor, topn))
    }

    /// `recommend` with the configured default top-N and alpha
    pub fn recommend_default(&self, title: &str) -> Result<Recommendations> {
        self.recommend(title, self.default_topn, self.default_alpha)
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn vectorizer(&self) -> &FittedVectorizer {
        &self.vectorizer
    }

    #[inline]
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    #[inline]
    pub fn popularity(&self) -> &[f64] {
        &self.popularity
    }

    #[inline]
    pub fn default_alpha(&self) -> f64 {
        self.default_alpha
    }

    #[inline]
    pub fn default_topn(&self) -> usize {
        self.default_topn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Item;

    fn sample() -> RecommenderEngine {
        let catalog = Catalog::from_items(vec![
            Item::new("A").with_short_description("space game").with_popularity(10.0),
            Item::new("B").with_short_description("space adventure").with_popularity(5.0),
            Item::new("C").with_short_description("cooking recipes").with_popularity(1.0),
        ])
        .unwrap();
        RecommenderEngine::build(catalog, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn content_and_popularity_agree_on_b() {
        let engine = sample();
        let recs = engine.recommend("A", 2, 0.6).unwrap();
        assert_eq!(recs.titles(), vec!["B", "C"]);
        assert!(recs.list[0].hybrid_score > recs.list[1].hybrid_score);
        assert_eq!(recs.list[0].popularity, 5.0);
    }

    #[test]
    fn pure_popularity_ranks_b_over_c() {
        let engine = sample();
        let recs = engine.recommend("A", 2, 0.0).unwrap();
        assert_eq!(recs.titles(), vec!["B", "C"]);
    }

    #[test]
    fn unknown_title_is_empty() {
        let engine = sample();
        assert!(engine.recommend("Z", 5, 0.6).unwrap().is_empty());
    }

    #[test]
    fn query_title_is_trimmed() {
        let engine = sample();
        let padded = engine.recommend(" A\n", 2, 0.6).unwrap();
        assert_eq!(padded, engine.recommend("A", 2, 0.6).unwrap());
        assert_eq!(padded.titles(), vec!["B", "C"]);
        assert!(engine.recommend("   ", 2, 0.6).unwrap().is_empty());
    }

    #[test]
    fn bad_alpha_fails_even_for_unknown_title() {
        let engine = sample();
        assert!(matches!(
            engine.recommend("Z", 5, 2.0),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn defaults_come_from_config() {
        let engine = sample();
        assert_eq!(engine.default_topn(), 5);
        assert_eq!(
            engine.recommend_default("A").unwrap(),
            engine.recommend("A", 5, 0.6).unwrap()
        );
    }

    #[test]
    fn engine_state_is_aligned() {
        let engine = sample();
        assert_eq!(engine.similarity().len(), 3);
        assert_eq!(engine.popularity(), &[10.0, 5.0, 1.0]);
        assert_eq!(engine.catalog().len(), 3);
    }

    #[test]
    fn invalid_config_fails_build() {
        let config = EngineConfig {
            max_features: 0,
            ..EngineConfig::default()
        };
        let err = RecommenderEngine::build(Catalog::default(), &config).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn empty_catalog_builds() {
        let engine = RecommenderEngine::build(Catalog::default(), &EngineConfig::default()).unwrap();
        assert!(engine.similarity().is_empty());
        assert!(engine.recommend("anything", 3, 0.5).unwrap().is_empty());
    }
}
