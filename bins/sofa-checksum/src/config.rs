//! Configuration file loading

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Standard config locations, relative to the working directory
const CANDIDATES: [&str; 3] = [
    ".sofa-checksum.toml",
    "sofa-checksum.toml",
    ".config/sofa-checksum.toml",
];

/// Root configuration schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSchema {
    #[serde(default)]
    pub api: ApiConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Shared API secret
    #[serde(default)]
    pub secret: Option<String>,
}

/// Loaded configuration and where it came from
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load from an explicit path, or the first standard location under `dir`
    pub fn load(path: Option<&Path>, dir: &Path) -> Result<Self> {
        let config_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(dir),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        if let Some(ref p) = config_path {
            tracing::debug!(path = %p.display(), "loaded config");
        }

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Secret from the config file, if any
    pub fn secret(&self) -> Option<&str> {
        self.schema.api.secret.as_deref()
    }
}

fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|candidate| dir.join(candidate))
        .find(|p| p.exists())
}

fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
