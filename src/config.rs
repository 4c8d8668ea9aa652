//!
//! This module defines the configuration file format and loading logic for mdconform.
//! Configuration lives in `.mdconform.toml` and only affects the outer layers
//! (discovery and reporting); the scanner and rewriter themselves take no options.

use crate::rule::ViolationKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".mdconform.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },
    #[error("Failed to parse config file {path}: {source}")]
    ParseError { source: toml::de::Error, path: String },
    #[error("Unknown violation kind '{kind}' in {path} (expected one of: {expected})")]
    UnknownKind { kind: String, path: String, expected: String },
}

/// Represents the complete configuration loaded from .mdconform.toml
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Global configuration options
    #[serde(default)]
    pub global: GlobalConfig,
}

/// Global configuration options
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Glob patterns of files or directories to skip
    pub exclude: Vec<String>,

    /// Respect .gitignore files when scanning directories
    pub respect_gitignore: bool,

    /// Violation kinds `check` does not report
    pub disable: Vec<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            respect_gitignore: true,
            disable: Vec::new(),
        }
    }
}

impl Config {
    /// Parse configuration text; `path` is only used in error messages
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::ParseError {
            source,
            path: path.to_string(),
        })?;
        config.disabled_kinds(path)?;
        Ok(config)
    }

    /// Load an explicit config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path_str.clone(),
        })?;
        log::debug!("[mdconform-config] Loaded config from {path_str}");
        Self::from_toml_str(&content, &path_str)
    }

    /// Load `--config` if given, else `.mdconform.toml` in `dir` if present, else defaults
    pub fn load_with_discovery(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate: PathBuf = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            log::debug!("[mdconform-config] No {CONFIG_FILE_NAME} found, using defaults");
            Ok(Self::default())
        }
    }

    /// The `disable` list parsed into kinds
    pub fn disabled_kinds(&self, path: &str) -> Result<Vec<ViolationKind>, ConfigError> {
        self.global
            .disable
            .iter()
            .map(|name| {
                name.parse::<ViolationKind>().map_err(|_| ConfigError::UnknownKind {
                    kind: name.clone(),
                    path: path.to_string(),
                    expected: ViolationKind::ALL.map(|k| k.as_str()).join(", "),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.global.respect_gitignore);
        assert!(config.global.exclude.is_empty());
        assert!(config.global.disable.is_empty());
    }

    #[test]
    fn test_parse_kebab_case() {
        let config = Config::from_toml_str(
            r#"
[global]
exclude = ["vendor/**"]
respect-gitignore = false
disable = ["bullet-marker", "table_blank_after"]
"#,
            "test.toml",
        )
        .unwrap();

        assert_eq!(config.global.exclude, vec!["vendor/**"]);
        assert!(!config.global.respect_gitignore);
        assert_eq!(
            config.disabled_kinds("test.toml").unwrap(),
            vec![ViolationKind::BulletMarker, ViolationKind::TableBlankAfter]
        );
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml_str("", "empty.toml").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = Config::from_toml_str("[global]\ndisable = [\"nope\"]\n", "bad.toml").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKind { ref kind, .. } if kind == "nope"));
        assert!(err.to_string().contains("bullet-marker"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[global\n", "broken.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_discovery() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::load_with_discovery(None, dir.path()).unwrap(), Config::default());

        fs::write(dir.path().join(CONFIG_FILE_NAME), "[global]\nexclude = [\"drafts\"]\n").unwrap();
        let config = Config::load_with_discovery(None, dir.path()).unwrap();
        assert_eq!(config.global.exclude, vec!["drafts"]);
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = Config::load_with_discovery(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }
}
