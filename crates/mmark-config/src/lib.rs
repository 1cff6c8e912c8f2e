//! Configuration management for mmark.
//!
//! Parses `mmark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [parser]
//! attach_attributes = ["blockquote", "note"]
//! lazy_continuation = false
//! max_depth = 16
//! ```

use std::path::{Path, PathBuf};

use mmark_blocks::{ContainerKind, ParserOptions};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the container kinds that consume attribute lists.
    pub attach_attributes: Option<Vec<ContainerKind>>,
    /// Override lazy continuation.
    pub lazy_continuation: Option<bool>,
    /// Override maximum container nesting depth.
    pub max_depth: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mmark.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Block parser configuration.
    pub parser: ParserConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Block parser configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Container kinds that consume pending attribute lists.
    pub attach_attributes: Vec<ContainerKind>,
    /// Keep unprefixed, non-blank lines inside containers.
    pub lazy_continuation: bool,
    /// Maximum container nesting depth.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        let options = ParserOptions::default();
        Self {
            attach_attributes: options.attach_attributes,
            lazy_continuation: options.lazy_continuation,
            max_depth: options.max_depth,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mmark.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, taking precedence over
    /// config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let start = std::env::current_dir().unwrap_or_default();
        Self::load_from(config_path, &start, cli_settings)
    }

    /// Like [`load`](Self::load), discovering from `start` instead of the
    /// current directory.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_from(
        config_path: Option<&Path>,
        start: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config(start) {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parser options built from this configuration.
    #[must_use]
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions::new()
            .with_attach_attributes(self.parser.attach_attributes.iter().copied())
            .with_lazy_continuation(self.parser.lazy_continuation)
            .with_max_depth(self.parser.max_depth)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parser.max_depth == 0 {
            return Err(ConfigError::Validation(
                "parser.max_depth must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(kinds) = &settings.attach_attributes {
            self.parser.attach_attributes.clone_from(kinds);
        }
        if let Some(lazy) = settings.lazy_continuation {
            self.parser.lazy_continuation = lazy;
        }
        if let Some(depth) = settings.max_depth {
            self.parser.max_depth = depth;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }
}
