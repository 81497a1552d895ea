//! Configuration types for the fitmark engine.
//!
//! Follows a builder pattern for complex configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which inline back end turns block text into inline nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Built-in token scanner
    #[default]
    Direct,
    /// Placeholder pre-pass routed through the markdown library
    Markdown,
}

impl std::str::FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "markdown" => Ok(Self::Markdown),
            other => Err(Error::config_error(format!("Unknown backend: {}", other))),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Mention autocomplete settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Maximum candidates offered at once
    pub max_candidates: usize,
    /// Match the query case-sensitively
    pub case_sensitive: bool,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            max_candidates: 10,
            case_sensitive: false,
        }
    }
}

/// Rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub backend: Backend,
    /// CSS class on video embed containers
    pub video_grid_class: String,
    /// CSS class prefix for mention tokens (`<prefix>`, `<prefix>-<type>`)
    pub mention_class_prefix: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Direct,
            video_grid_class: "video-grid".to_string(),
            mention_class_prefix: "mention".to_string(),
        }
    }
}

/// Global engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub autocomplete: AutocompleteConfig,
    pub render: RenderConfig,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autocomplete: AutocompleteConfig::default(),
            render: RenderConfig::default(),
            log_level: "INFO".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new config with builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.autocomplete.max_candidates == 0 {
            return Err(Error::config_error(
                "autocomplete.max_candidates must be at least 1",
            ));
        }

        if self.render.video_grid_class.trim().is_empty() {
            return Err(Error::config_error("render.video_grid_class cannot be empty"));
        }

        if self.render.mention_class_prefix.trim().is_empty() {
            return Err(Error::config_error(
                "render.mention_class_prefix cannot be empty",
            ));
        }

        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(Error::config_error(format!(
                "Unknown log level: {}",
                self.log_level
            )));
        }

        Ok(())
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file; a missing file yields the defaults
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        log::debug!("Loaded config from {}", path.display());

        Self::from_yaml(&content)
    }

    /// Save configuration to file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, yaml).await?;
        Ok(())
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate cap for autocomplete
    pub fn max_candidates(mut self, max: usize) -> Self {
        self.config.autocomplete.max_candidates = max;
        self
    }

    /// Match autocomplete queries case-sensitively
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.config.autocomplete.case_sensitive = case_sensitive;
        self
    }

    /// Select the inline back end
    pub fn backend(mut self, backend: Backend) -> Self {
        self.config.render.backend = backend;
        self
    }

    /// Set the mention CSS class prefix
    pub fn mention_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.render.mention_class_prefix = prefix.into();
        self
    }

    /// Set the video container CSS class
    pub fn video_grid_class(mut self, class: impl Into<String>) -> Self {
        self.config.render.video_grid_class = class.into();
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
