//! Generator configuration, read from `waterframe.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::assembler::{Undocumented, DEFAULT_TITLE};
use crate::namespace::DEFAULT_FALLBACK_NAMESPACE;

/// File looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "waterframe.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or has unknown values.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// How the documentation set is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One `entities.md` for the whole ontology.
    #[default]
    Flat,
    /// `entities.md` plus one document per module file.
    Categorized,
}

/// Generator settings. Every field has a default, so an empty file is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The main Turtle file.
    pub ontology: PathBuf,
    /// Where `entities.md`, `index.md` and `index.json` are written.
    pub output_dir: PathBuf,
    /// Root of the per-module Turtle files (categorized mode).
    pub modules_dir: PathBuf,
    /// Namespace used when the ontology declares none.
    pub fallback_namespace: String,
    /// Title of `entities.md`.
    pub title: String,
    /// Document layout.
    pub mode: Mode,
    /// Also document IRIs that only appear in object position.
    pub discover_objects: bool,
    /// Policy for entities without labels or descriptions; unset means
    /// `skip` in flat mode and `placeholder` in categorized mode.
    pub undocumented: Option<Undocumented>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ontology: PathBuf::from("data/ontology/waterframe.ttl"),
            output_dir: PathBuf::from("docs"),
            modules_dir: PathBuf::from("data/ontology/modules"),
            fallback_namespace: DEFAULT_FALLBACK_NAMESPACE.to_string(),
            title: DEFAULT_TITLE.to_string(),
            mode: Mode::Flat,
            discover_objects: true,
            undocumented: None,
        }
    }
}

impl Config {
    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for unusable values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise
    /// as [`Config::from_toml`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Loads `path` if given, else `waterframe.toml` in the working
    /// directory if present, else the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a chosen file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            info!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            info!(path = %local.display(), "loading config");
            return Self::from_file(&local);
        }
        info!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_namespace.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "fallback_namespace must not be empty".to_string(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::Invalid("title must not be empty".to_string()));
        }
        Ok(())
    }

    /// The undocumented-entity policy for `entities.md`.
    pub fn undocumented_policy(&self) -> Undocumented {
        self.undocumented.unwrap_or(match self.mode {
            Mode::Flat => Undocumented::Skip,
            Mode::Categorized => Undocumented::Placeholder,
        })
    }
}
