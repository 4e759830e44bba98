//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the values handlers pass
//! it (e.g. [`InitDefaults`]).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `UBIX_*` environment variables, `__` between nested keys
//!    (`UBIX_DEFAULTS__AUTHOR=Ana`)
//! 3. Config file: `--config <FILE>` (must exist) or the platform config
//!    directory (optional)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ubix_core::application::InitDefaults;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prompt defaults for new solutions.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: Option<String>,
    pub version: String,
    pub api: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            author: None,
            version: "0.0.0".into(),
            api: "latest".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, a TOML file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is used
    /// only when present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to encode default configuration")?;
        let mut builder = config::Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file");
                builder = builder.add_source(file_source(path).required(true));
            }
            None => {
                if let Some(path) = Self::config_path() {
                    builder = builder.add_source(file_source(&path).required(false));
                }
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix("UBIX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Path to the default configuration file, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ubix", "ubix")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Prompt defaults for `init`.
    pub fn init_defaults(&self) -> InitDefaults {
        InitDefaults {
            author: self.defaults.author.clone().unwrap_or_default(),
            version: self.defaults.version.clone(),
            api: self.defaults.api.clone(),
        }
    }
}

fn file_source(path: &Path) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::from(path).format(config::FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_prompt_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.init_defaults(), InitDefaults::default());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ubix.toml");
        std::fs::write(&path, "[defaults]\nauthor = \"Ana\"\napi = \"2.0.0\"\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.author.as_deref(), Some("Ana"));
        assert_eq!(cfg.defaults.api, "2.0.0");
        assert_eq!(cfg.defaults.version, "0.0.0");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[defaults\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }
}
