//! CLI configuration: the engine sections plus logging.
//!
//! Loaded from the same file and `DOCS_QUERY__*` environment variables as the engine,
//! after applying a `.env` file if one is present.

use anyhow::{bail, Context};
use docs_query::config::sources;
use docs_query::QueryConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// `database` and `paging` sections.
    #[serde(flatten)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub file_enabled: bool,
    #[serde(default = "default_file_directory")]
    pub file_directory: String,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// `daily`, `hourly`, `minutely` or `never`.
    #[serde(default = "default_file_rotation")]
    pub file_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            file_enabled: false,
            file_directory: default_file_directory(),
            file_prefix: default_file_prefix(),
            file_rotation: default_file_rotation(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file_directory() -> String {
    "logs".to_string()
}

fn default_file_prefix() -> String {
    "docs-query".to_string()
}

fn default_file_rotation() -> String {
    "daily".to_string()
}

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const ROTATIONS: &[&str] = &["daily", "hourly", "minutely", "never"];

impl LoggingConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            bail!(
                "logging.level must be one of {}, got {:?}",
                LEVELS.join(", "),
                self.level
            );
        }
        if self.file_enabled && !ROTATIONS.contains(&self.file_rotation.as_str()) {
            bail!(
                "logging.file_rotation must be one of {}, got {:?}",
                ROTATIONS.join(", "),
                self.file_rotation
            );
        }
        Ok(())
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = sources(path)
            .build()
            .with_context(|| format!("Failed to read configuration from {path}"))?
            .try_deserialize()
            .context("Failed to parse configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.query.validate()?;
        self.logging.validate()
    }
}
