//! Configuration loading and management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::CatalogSchema,
    error::{Error, Result},
    vectorizer::{
        compose::TextField, stop_words::StopWords, DEFAULT_MAX_FEATURES, DEFAULT_NGRAM_RANGE,
    },
};

/// File looked up in the working directory by `Config::load_default`
pub const DEFAULT_CONFIG_FILE: &str = "hybrec.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine tunables.
    pub engine: EngineConfig,
    /// Catalog column names.
    pub schema: CatalogSchema,
    /// Remote spreadsheet settings.
    pub sheets: SheetsConfig,
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `hybrec.toml` from `dir` if present, defaults otherwise.
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.engine.validate()?;
        Ok(config)
    }
}

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Vocabulary cap.
    pub max_features: usize,
    /// Smallest and largest n-gram size.
    pub ngram_range: (usize, usize),
    /// Stop words removed before n-gram building.
    pub stop_words: StopWords,
    /// Item fields composed into each document, in order.
    pub text_fields: Vec<TextField>,
    /// Blend weight used when a query does not give one.
    pub default_alpha: f64,
    /// Result count used when a query does not give one.
    pub default_topn: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            ngram_range: DEFAULT_NGRAM_RANGE,
            stop_words: StopWords::English,
            text_fields: TextField::DEFAULT_ORDER.to_vec(),
            default_alpha: 0.6,
            default_topn: 5,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(Error::config("max_features must be positive"));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || max_n < min_n {
            return Err(Error::config(format!(
                "invalid n-gram range ({min_n}, {max_n}): need 1 <= min <= max"
            )));
        }
        if !(0.0..=1.0).contains(&self.default_alpha) {
            return Err(Error::config(format!(
                "default_alpha must be within [0, 1], got {}",
                self.default_alpha
            )));
        }
        if self.default_topn == 0 {
            return Err(Error::config("default_topn must be positive"));
        }
        Ok(())
    }
}

/// Remote spreadsheet settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Spreadsheet URL or key.
    pub spreadsheet: Option<String>,
    /// Tab holding the catalog.
    pub catalog_worksheet: String,
    /// Tab the results are written to.
    pub results_worksheet: String,
    /// Environment variable holding the OAuth access token.
    pub token_env: String,
    /// API base URL.
    pub api_base: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet: None,
            catalog_worksheet: "items".to_string(),
            results_worksheet: "recommendations".to_string(),
            token_env: "GSHEETS_ACCESS_TOKEN".to_string(),
            api_base: "https://sheets.googleapis.com/v4".to_string(),
        }
    }
}
