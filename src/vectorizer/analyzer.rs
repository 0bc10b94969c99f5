use std::collections::HashSet;

use ahash::RandomState;
use regex::Regex;

use crate::error::{Error, Result};
use crate::vectorizer::stop_words::StopWords;

/// Words of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Turns a document into its list of terms.
///
/// Pipeline: lowercase -> word tokens -> stop word removal -> n-grams.
/// N-grams are built over the tokens left after stop word removal and are
/// joined with a single space.
#[derive(Debug, Clone)]
pub struct Analyzer {
    token_re: Regex,
    stop_words: Option<HashSet<Box<str>, RandomState>>,
    ngram_range: (usize, usize),
}

impl Analyzer {
    pub fn new(stop_words: &StopWords, ngram_range: (usize, usize)) -> Result<Self> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || max_n < min_n {
            return Err(Error::config(format!(
                "invalid n-gram range ({min_n}, {max_n}): need 1 <= min <= max"
            )));
        }
        let token_re = Regex::new(TOKEN_PATTERN)
            .map_err(|e| Error::config(format!("token pattern: {e}")))?;
        Ok(Self {
            token_re,
            stop_words: stop_words.to_set(),
            ngram_range,
        })
    }

    #[inline]
    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    /// Lowercased word tokens with stop words removed
    pub fn tokenize(&self, doc: &str) -> Vec<String> {
        let lower = doc.to_lowercase();
        self.token_re
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|tok| {
                self.stop_words
                    .as_ref()
                    .map_or(true, |stop| !stop.contains(*tok))
            })
            .map(str::to_string)
            .collect()
    }

    /// All terms of a document, in order of appearance, n-gram size ascending
    pub fn analyze(&self, doc: &str) -> Vec<String> {
        let tokens = self.tokenize(doc);
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            if n == 1 {
                terms.extend(tokens.iter().cloned());
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }
}
