//! Analysis configuration

use serde::Deserialize;
use std::path::Path;
use tracing::Level;

use crate::error::Result;
use crate::landmarks::LandmarkKeys;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub landmarks: LandmarkKeys,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Leave `N/A` and zero values out of the text block.
    pub skip_unavailable: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise use defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn default_path() -> &'static str {
        "config.toml"
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            skip_unavailable: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown names fall back to `INFO`.
    pub fn max_level(&self) -> Level {
        self.level.trim().parse().unwrap_or(Level::INFO)
    }
}
