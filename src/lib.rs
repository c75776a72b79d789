//! Tempest Codex: character data layer for the fan encyclopedia.
//!
//! Core library providing the character cache/loader, the ordered source
//! chain with embedded fallback, and the facade the page scripts consume.

pub mod codex;
pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
