//! Character data sources and the ordered fallback chain.
//!
//! The bulk list is served by whichever link of the chain answers first with
//! a non-empty validated array: the live HTTP source, a second read of the
//! same source (covers transient failures), then the embedded dataset. The
//! chain therefore cannot fail for the bulk path. Detail records only exist
//! on the live source; a detail failure is returned as a typed error and the
//! loader substitutes the basic record instead.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use super::embedded::fallback_characters;
use super::error::CodexError;
use super::models::{parse_basic_list, BasicCharacter, CharacterDetail};

/// Read-only access to one character data source.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &'static str;

    /// Fetch and validate the bulk basic list.
    ///
    /// Implementations must return a non-empty, validated array or an error;
    /// partially bad payloads are filtered per record, not failed wholesale.
    async fn fetch_basic_list(&self) -> Result<Vec<BasicCharacter>, CodexError>;

    /// Fetch the detailed record for one character ID.
    async fn fetch_detail(&self, id: &str) -> Result<CharacterDetail, CodexError>;
}

// ============================================================================
// HTTP source
// ============================================================================

/// Live JSON source reached over HTTP.
pub struct HttpSource {
    client: Client,
    base_url: String,
    basic_list_path: String,
    detail_dir: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, basic_list_path: impl Into<String>, detail_dir: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            basic_list_path: basic_list_path.into(),
            detail_dir: detail_dir.into(),
        }
    }

    fn basic_list_url(&self) -> String {
        format!("{}/{}", self.base_url, self.basic_list_path.trim_start_matches('/'))
    }

    fn detail_url(&self, id: &str) -> String {
        format!(
            "{}/{}/{id}.json",
            self.base_url,
            self.detail_dir.trim_matches('/')
        )
    }
}

#[async_trait]
impl CharacterSource for HttpSource {
    fn id(&self) -> &'static str {
        "http"
    }

    async fn fetch_basic_list(&self) -> Result<Vec<BasicCharacter>, CodexError> {
        let url = self.basic_list_url();
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CodexError::Status {
                origin: self.id().to_string(),
                url,
                status: response.status().as_u16(),
            });
        }

        let payload: serde_json::Value = response.json().await?;
        parse_basic_list(payload, self.id())
    }

    async fn fetch_detail(&self, id: &str) -> Result<CharacterDetail, CodexError> {
        let url = self.detail_url(id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CodexError::Status {
                origin: self.id().to_string(),
                url,
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<CharacterDetail>().await?)
    }
}

// ============================================================================
// Embedded source
// ============================================================================

/// Compiled-in basic list; the terminal link of every chain.
#[derive(Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CharacterSource for EmbeddedSource {
    fn id(&self) -> &'static str {
        "embedded"
    }

    async fn fetch_basic_list(&self) -> Result<Vec<BasicCharacter>, CodexError> {
        Ok(fallback_characters())
    }

    async fn fetch_detail(&self, _id: &str) -> Result<CharacterDetail, CodexError> {
        Err(CodexError::DetailUnsupported { origin: self.id() })
    }
}

// ============================================================================
// Source chain
// ============================================================================

/// Ordered list of sources tried in sequence for the bulk list.
///
/// The default chain is primary, primary again, embedded — making the
/// fallback order a visible configuration instead of nested error handling.
pub struct SourceChain {
    attempts: Vec<Arc<dyn CharacterSource>>,
}

impl SourceChain {
    /// Standard chain: primary twice, then the embedded set.
    pub fn new(primary: Arc<dyn CharacterSource>) -> Self {
        Self::with_retries(primary, 1)
    }

    /// Chain with `retries` extra attempts against the primary before the
    /// embedded set.
    pub fn with_retries(primary: Arc<dyn CharacterSource>, retries: usize) -> Self {
        let mut attempts: Vec<Arc<dyn CharacterSource>> = Vec::with_capacity(retries + 2);
        for _ in 0..=retries {
            attempts.push(Arc::clone(&primary));
        }
        attempts.push(Arc::new(EmbeddedSource::new()));
        Self { attempts }
    }

    /// Custom attempt order, primarily for tests.
    pub fn with_attempts(attempts: Vec<Arc<dyn CharacterSource>>) -> Self {
        Self { attempts }
    }

    /// Fetch the bulk list from the first source that produces one.
    ///
    /// Guaranteed non-empty: the embedded set is appended as a final resort
    /// even if the chain was configured without it.
    pub async fn fetch_basic_list(&self) -> Vec<BasicCharacter> {
        for source in &self.attempts {
            match source.fetch_basic_list().await {
                Ok(characters) => {
                    log::info!(
                        "loaded {} basic character records from source '{}'",
                        characters.len(),
                        source.id()
                    );
                    return characters;
                }
                Err(e) => {
                    log::warn!("character source '{}' failed: {e}", source.id());
                }
            }
        }

        log::warn!("all configured character sources failed; serving embedded dataset");
        fallback_characters()
    }

    /// Fetch a detail record from the primary (first) source.
    pub async fn fetch_detail(&self, id: &str) -> Result<CharacterDetail, CodexError> {
        let primary = self.attempts.first().ok_or(CodexError::NoSources)?;
        primary.fetch_detail(id).await
    }
}
