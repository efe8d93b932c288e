//! Configuration loading for the CLI

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use virtualizor_client::{ClientConfig, ListRawPolicy};

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Panel account settings
    #[serde(default)]
    pub panel: PanelSection,
}

/// `[panel]` table; every field may be supplied on the command line instead
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelSection {
    pub api: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
    #[serde(default)]
    pub raw: bool,
    #[serde(default)]
    pub list_raw: ListRawPolicy,
}

/// Values given on the command line, taking precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
    pub raw: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            panel: PanelSection::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> eyre::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from `--config`, `VIRTUALIZOR_CONFIG` or the default paths
    ///
    /// Returns the path the configuration was read from. Falls back to an
    /// empty configuration when no file exists, so that everything can be
    /// given as flags.
    pub fn load_default(explicit: Option<&Path>) -> eyre::Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        if let Ok(path) = std::env::var("VIRTUALIZOR_CONFIG") {
            let path = PathBuf::from(path);
            return Ok((Self::load(&path)?, Some(path)));
        }

        let paths = [
            Some(PathBuf::from("virtualizor.toml")),
            dirs::config_dir().map(|p| p.join("virtualizor/virtualizor.toml")),
        ];

        for path in paths.into_iter().flatten() {
            if path.exists() {
                return Ok((Self::load(&path)?, Some(path)));
            }
        }

        Ok((Config::default(), None))
    }

    /// Merge flags over the `[panel]` table
    ///
    /// # Errors
    /// Returns error naming the first required value that is missing
    pub fn client_config(&self, overrides: Overrides) -> eyre::Result<ClientConfig> {
        let panel = &self.panel;
        let api = overrides
            .api
            .or_else(|| panel.api.clone())
            .ok_or_else(|| eyre::eyre!("missing panel api url (--api or panel.api)"))?;
        let key = overrides
            .key
            .or_else(|| panel.key.clone())
            .ok_or_else(|| eyre::eyre!("missing api key (--key or panel.key)"))?;
        let secret = overrides
            .secret
            .or_else(|| panel.secret.clone())
            .ok_or_else(|| eyre::eyre!("missing api password (--secret or panel.secret)"))?;

        Ok(ClientConfig::new(api, key, secret)
            .raw(overrides.raw || panel.raw)
            .list_raw(panel.list_raw))
    }
}
