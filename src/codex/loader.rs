//! Character cache and loader.
//!
//! Single point of truth for character data access. Owns three caches: the
//! per-ID detail cache, the in-flight request table, and the bulk basic-list
//! holder. The central invariant is at most one in-flight detail request per
//! character ID: a request is registered in the table synchronously, inside
//! one lock scope, before the first await point of its fetch, so a concurrent
//! caller always joins the pending future instead of issuing a duplicate
//! request. On settlement the outcome (possibly `None`) is written to the
//! detail cache and the in-flight entry is removed, matching the original
//! fetch-then-finally bookkeeping.
//!
//! No public method here returns an error for expected conditions: source
//! failures resolve through the fallback chain or the basic-record
//! substitution, unknown IDs resolve to `None`, and out-of-range slices
//! resolve to empty vectors.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{join_all, BoxFuture, Shared};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::models::{BasicCharacter, CharacterDetail};
use super::source::SourceChain;

/// One pending detail fetch, shared by every caller that requested the ID
/// while it was in flight.
type SharedDetail = Shared<BoxFuture<'static, Option<CharacterDetail>>>;

// ============================================================================
// Stats
// ============================================================================

/// Snapshot of loader cache state and counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderStats {
    /// Resolved entries in the detail cache (including `None` outcomes).
    pub cache_size: usize,
    /// Currently pending detail fetches.
    pub in_flight: usize,
    /// Whether the bulk basic list has been loaded this session.
    pub basic_loaded: bool,
    /// Cumulative detail-cache hits.
    pub hits: u64,
    /// Cumulative fetch-causing detail-cache misses. Callers that join an
    /// already-pending fetch are counted neither as hits nor misses.
    pub misses: u64,
}

// ============================================================================
// Loader
// ============================================================================

struct LoaderInner {
    chain: SourceChain,
    /// Bulk list, populated once per session (primary or fallback).
    basic: Mutex<Option<Arc<Vec<BasicCharacter>>>>,
    /// Resolved detail outcomes; `None` means "looked up, not found".
    details: Mutex<HashMap<String, Option<CharacterDetail>>>,
    /// At most one entry per ID; removed when the fetch settles.
    in_flight: Mutex<HashMap<String, SharedDetail>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LoaderInner {
    /// Load (or return the cached) bulk basic list.
    ///
    /// The lock is held across the fetch so concurrent first callers share
    /// one underlying request.
    async fn basic_list(&self) -> Arc<Vec<BasicCharacter>> {
        let mut slot = self.basic.lock().await;
        if let Some(list) = slot.as_ref() {
            return Arc::clone(list);
        }
        let list = Arc::new(self.chain.fetch_basic_list().await);
        *slot = Some(Arc::clone(&list));
        list
    }

    /// Resolve a detail fetch: primary source, then basic-record
    /// substitution, then `None`. Writes the outcome to the detail cache and
    /// clears the in-flight entry.
    async fn resolve_detail(self: Arc<Self>, id: String) -> Option<CharacterDetail> {
        let resolved = match self.chain.fetch_detail(&id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                log::warn!("detail fetch for '{id}' failed ({e}); substituting basic record");
                self.basic_list()
                    .await
                    .iter()
                    .find(|c| c.id == id)
                    .cloned()
                    .map(CharacterDetail::from_basic)
            }
        };

        {
            let mut details = self.details.lock().await;
            details.insert(id.clone(), resolved.clone());
        }
        {
            let mut in_flight = self.in_flight.lock().await;
            in_flight.remove(&id);
        }

        resolved
    }
}

/// Caching character loader over a [`SourceChain`].
///
/// Cheap to clone; every clone shares the same caches, so one instance per
/// process gives the whole presentation layer a single shared cache without
/// ambient global state.
#[derive(Clone)]
pub struct CharacterLoader {
    inner: Arc<LoaderInner>,
}

impl CharacterLoader {
    pub fn new(chain: SourceChain) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                chain,
                basic: Mutex::new(None),
                details: Mutex::new(HashMap::new()),
                in_flight: Mutex::new(HashMap::new()),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// The bulk basic list; idempotent, never empty in steady state.
    pub async fn basic_list(&self) -> Arc<Vec<BasicCharacter>> {
        self.inner.basic_list().await
    }

    /// The detailed record for one ID, or `None` when it cannot be resolved.
    ///
    /// Cache hits return immediately; a pending fetch for the same ID is
    /// joined rather than duplicated; otherwise a new fetch is registered
    /// and started. Failed fetches fall back to the basic record, and the
    /// outcome — whatever it is — is cached until [`clear_cache`].
    ///
    /// [`clear_cache`]: CharacterLoader::clear_cache
    pub async fn detail(&self, id: &str) -> Option<CharacterDetail> {
        {
            let details = self.inner.details.lock().await;
            if let Some(entry) = details.get(id) {
                self.inner.hits.fetch_add(1, Ordering::Relaxed);
                return entry.clone();
            }
        }

        // Check-and-register under one lock so two concurrent misses cannot
        // both start a fetch for the same ID. Only the caller that starts
        // the fetch counts as a miss; joiners count as neither.
        let pending = {
            let mut in_flight = self.inner.in_flight.lock().await;
            match in_flight.get(id) {
                Some(existing) => existing.clone(),
                None => {
                    self.inner.misses.fetch_add(1, Ordering::Relaxed);
                    let fut = Arc::clone(&self.inner)
                        .resolve_detail(id.to_string())
                        .boxed()
                        .shared();
                    in_flight.insert(id.to_string(), fut.clone());
                    fut
                }
            }
        };

        pending.await
    }

    /// The basic record for one ID, or `None` if the list has no entry.
    pub async fn basic(&self, id: &str) -> Option<BasicCharacter> {
        self.basic_list().await.iter().find(|c| c.id == id).cloned()
    }

    /// A contiguous slice of the basic list, clamped to its bounds.
    pub async fn batch(&self, start: usize, size: usize) -> Vec<BasicCharacter> {
        let list = self.basic_list().await;
        if start >= list.len() {
            return Vec::new();
        }
        let end = start.saturating_add(size).min(list.len());
        list[start..end].to_vec()
    }

    /// Case-insensitive substring search over name, role and race.
    ///
    /// An empty (or whitespace-only) query returns the full list.
    pub async fn search(&self, query: &str) -> Vec<BasicCharacter> {
        let list = self.basic_list().await;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return (*list).clone();
        }
        list.iter().filter(|c| c.matches(&needle)).cloned().collect()
    }

    /// Warm the detail cache for a set of IDs.
    ///
    /// All fetches run concurrently with all-settled semantics: one ID
    /// resolving to `None` never affects the others.
    pub async fn preload(&self, ids: &[String]) {
        let warmed = join_all(ids.iter().map(|id| self.detail(id)))
            .await
            .into_iter()
            .filter(Option::is_some)
            .count();
        log::debug!("preloaded {warmed}/{} character details", ids.len());
    }

    /// Number of characters in the basic list, loading it if needed.
    pub async fn count(&self) -> usize {
        self.basic_list().await.len()
    }

    /// Discard all cached detail entries and in-flight bookkeeping.
    ///
    /// The basic-list cache is a separate cache with its own clear path;
    /// see [`clear_basic_list`](CharacterLoader::clear_basic_list).
    pub async fn clear_cache(&self) {
        {
            let mut details = self.inner.details.lock().await;
            details.clear();
        }
        {
            let mut in_flight = self.inner.in_flight.lock().await;
            in_flight.clear();
        }
        log::debug!("character detail cache cleared");
    }

    /// Drop the cached bulk list so the next access reloads it.
    pub async fn clear_basic_list(&self) {
        let mut slot = self.inner.basic.lock().await;
        *slot = None;
    }

    /// Current cache state and counters.
    pub async fn stats(&self) -> LoaderStats {
        let cache_size = self.inner.details.lock().await.len();
        let in_flight = self.inner.in_flight.lock().await.len();
        let basic_loaded = self.inner.basic.lock().await.is_some();
        LoaderStats {
            cache_size,
            in_flight,
            basic_loaded,
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
        }
    }
}
