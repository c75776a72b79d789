//! Character codex data layer: models, sources, cache/loader, facade.

pub mod embedded;
pub mod error;
pub mod loader;
pub mod models;
pub mod service;
pub mod source;

pub use error::CodexError;
pub use loader::{CharacterLoader, LoaderStats};
pub use models::{BasicCharacter, CharacterDetail, PowerTier};
pub use service::{CodexService, PerformanceStats};
pub use source::{CharacterSource, EmbeddedSource, HttpSource, SourceChain};
