use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::{
    catalog::Catalog,
    config::EngineConfig,
    engine::{Recommendations, RecommenderEngine},
    error::Result,
};

/// Shared, reloadable access to the current engine.
///
/// Readers take a cheap `Arc` snapshot and query it without holding the
/// lock. `reload` builds the replacement outside the lock and only swaps it
/// in when the build succeeded, so a failed reload leaves the previous
/// engine serving.
#[derive(Debug)]
pub struct EngineHandle {
    config: EngineConfig,
    current: RwLock<Arc<RecommenderEngine>>,
}

impl EngineHandle {
    pub fn new(engine: RecommenderEngine, config: EngineConfig) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// Build the first engine from `catalog`.
    pub fn build(catalog: Catalog, config: EngineConfig) -> Result<Self> {
        let engine = RecommenderEngine::build(catalog, &config)?;
        Ok(Self::new(engine, config))
    }

    /// Snapshot of the engine currently serving
    pub fn current(&self) -> Arc<RecommenderEngine> {
        self.current.read().clone()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rebuild from a freshly loaded catalog.
    pub fn reload(&self, catalog: Catalog) -> Result<()> {
        let engine = match RecommenderEngine::build(catalog, &self.config) {
            Ok(engine) => engine,
            Err(e) => {
                warn!(error = %e, "reload failed, keeping previous engine");
                return Err(e);
            }
        };
        let items = engine.catalog().len();
        *self.current.write() = Arc::new(engine);
        info!(items, "engine reloaded");
        Ok(())
    }

    pub fn recommend(&self, title: &str, topn: usize, alpha: f64) -> Result<Recommendations> {
        self.current().recommend(title, topn, alpha)
    }
}
