/// This crate is a hybrid recommendation engine: TF-IDF content similarity
/// blended with item popularity.
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod sheets;
pub mod utils;
pub mod vectorizer;

/// Recommender Engine
/// The top-level struct of this crate, built once per loaded catalog.
///
/// Internally, it holds:
/// - The catalog (title-indexed, in load order)
/// - The fitted TF-IDF vectorizer
/// - The dense pairwise cosine similarity matrix
/// - The popularity vector
///
/// All three are index-aligned with the catalog's row order. The engine is
/// read-only after `build`, so it can be shared between threads freely.
///
/// `recommend(title, topn, alpha)` ranks every other item by
/// `alpha * content + (1 - alpha) * popularity`, both min-max normalized.
pub use engine::RecommenderEngine;

/// Engine Handle
/// Shared access to the current engine with atomic reload.
/// A failed reload keeps the previous engine serving.
pub use engine::handle::EngineHandle;

/// Recommendation results
/// - `Recommendations`: ranked list, best first
/// - `Recommendation`: one entry with title, hybrid score and raw popularity
pub use engine::rank::{Recommendation, Recommendations};

/// Catalog and Item
/// The item collection the engine is built from.
/// Titles are unique; duplicates are rejected at load time.
pub use catalog::{Catalog, CatalogSchema, Item, RawTable};

/// TF-IDF Vectorizer
/// Settings (`TfIdfVectorizer`) and fitted state (`FittedVectorizer`).
///
/// `TfIdfVectorizer<N, E>` has the following generic parameters:
/// - `N`: weight type (f32, f64)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTfIdfEngine)
pub use vectorizer::{FittedVectorizer, TfIdfVectorizer};

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug different TF-IDF weighting
/// strategies into `TfIdfVectorizer<N, E>`.
/// The default implementation, `DefaultTfIdfEngine`, uses raw counts, smooth
/// idf and L2 row normalization.
pub use vectorizer::tfidf::{DefaultTfIdfEngine, TfIdfEngine};

pub use config::{Config, EngineConfig, SheetsConfig};
pub use error::{Error, Result};
