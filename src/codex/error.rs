//! Error types for the codex data layer.
//!
//! These surface only between the source layer and the loader; the loader's
//! public surface absorbs every expected failure (fallback list, basic-record
//! substitution, `None`) instead of propagating it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodexError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{origin} returned status {status} for {url}")]
    Status {
        origin: String,
        url: String,
        status: u16,
    },

    #[error("invalid payload from {origin}: {reason}")]
    InvalidPayload { origin: String, reason: String },

    #[error("{origin} produced no usable character records")]
    EmptyList { origin: String },

    #[error("source '{origin}' does not serve detail records")]
    DetailUnsupported { origin: &'static str },

    #[error("source chain has no configured sources")]
    NoSources,
}
