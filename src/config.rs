use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level codex configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodexConfig {
    pub source: SourceConfig,
    pub data: DataConfig,
}

/// Where the JSON resources live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the published site data.
    pub base_url: String,
    /// Bulk basic-list resource, relative to `base_url`.
    pub basic_list_path: String,
    /// Directory of per-character detail resources, relative to `base_url`.
    pub detail_dir: String,
    /// Extra bulk-list attempts against the primary source before falling
    /// back to the embedded dataset.
    pub retries: usize,
}

/// Data directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory (logs live under it).
    pub data_dir: Option<PathBuf>,
}

impl Default for CodexConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            basic_list_path: "data/characters.json".to_string(),
            detail_dir: "data/characters".to_string(),
            retries: 1,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { data_dir: None }
    }
}

impl CodexConfig {
    /// Load configuration from `~/.config/tempest-codex/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("tempest-codex"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("tempest-codex").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CodexConfig::default();
        assert_eq!(config.source.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.source.basic_list_path, "data/characters.json");
        assert!(config.data.data_dir.is_none());
    }

    #[test]
    fn test_config_load_missing_file() {
        // Should return defaults without panicking
        let config = CodexConfig::load();
        assert_eq!(
            config.source.detail_dir,
            CodexConfig::default().source.detail_dir
        );
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = CodexConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CodexConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: CodexConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.source.base_url, config.source.base_url);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: CodexConfig =
            toml::from_str("[source]\nbase_url = \"https://codex.example.org\"\n").unwrap();
        assert_eq!(config.source.base_url, "https://codex.example.org");
        assert_eq!(config.source.basic_list_path, "data/characters.json");
        assert_eq!(config.source.retries, 1);
    }
}
