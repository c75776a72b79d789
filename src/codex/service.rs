//! Facade consumed by the presentation layer.
//!
//! Thin pass-through over [`CharacterLoader`]; page collaborators (codex
//! listing, profile, skills index, overview dashboard) call this surface and
//! nothing else. Constructed explicitly and handed to consumers — the shared
//! cache comes from cloning the service, not from a global.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::loader::CharacterLoader;
use super::models::{BasicCharacter, CharacterDetail};
use super::source::{CharacterSource, HttpSource, SourceChain};
use crate::config::CodexConfig;

/// Cache/loader metrics exposed to the overview dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub cache_size: usize,
    pub loading_requests: usize,
    pub basic_data_loaded: bool,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// The codex data service.
#[derive(Clone)]
pub struct CodexService {
    loader: CharacterLoader,
}

impl CodexService {
    pub fn new(loader: CharacterLoader) -> Self {
        Self { loader }
    }

    /// Build the standard service: HTTP primary with retry, embedded fallback.
    pub fn from_config(config: &CodexConfig) -> Self {
        let primary: Arc<dyn CharacterSource> = Arc::new(HttpSource::new(
            config.source.base_url.as_str(),
            config.source.basic_list_path.as_str(),
            config.source.detail_dir.as_str(),
        ));
        Self::new(CharacterLoader::new(SourceChain::with_retries(
            primary,
            config.source.retries,
        )))
    }

    pub async fn all_basic_characters(&self) -> Vec<BasicCharacter> {
        (*self.loader.basic_list().await).clone()
    }

    pub async fn character(&self, id: &str) -> Option<CharacterDetail> {
        self.loader.detail(id).await
    }

    pub async fn basic_character(&self, id: &str) -> Option<BasicCharacter> {
        self.loader.basic(id).await
    }

    pub async fn character_count(&self) -> usize {
        self.loader.count().await
    }

    pub async fn search_characters(&self, query: &str) -> Vec<BasicCharacter> {
        self.loader.search(query).await
    }

    pub async fn character_batch(&self, start: usize, size: usize) -> Vec<BasicCharacter> {
        self.loader.batch(start, size).await
    }

    pub async fn preload_characters(&self, ids: &[String]) {
        self.loader.preload(ids).await
    }

    pub async fn clear_character_cache(&self) {
        self.loader.clear_cache().await
    }

    pub async fn performance_stats(&self) -> PerformanceStats {
        let stats = self.loader.stats().await;
        PerformanceStats {
            cache_size: stats.cache_size,
            loading_requests: stats.in_flight,
            basic_data_loaded: stats.basic_loaded,
            cache_hits: stats.hits,
            cache_misses: stats.misses,
        }
    }
}
