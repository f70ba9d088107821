//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursetree/coursetree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `COURSETREE_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};

/// Catalog file opened when nothing else is configured.
pub const DEFAULT_CATALOG_FILE: &str = "CS 300 ABCU_Advising_Program_Input.csv";

/// Unified configuration for coursetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog loaded when no file is given on the command line
    pub catalog_file: PathBuf,
    /// Field delimiter in catalog files
    pub delimiter: char,
    /// Colored terminal output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_file: PathBuf::from(DEFAULT_CATALOG_FILE),
            delimiter: ',',
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog_file: Option<PathBuf>,
    pub delimiter: Option<char>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for coursetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coursetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coursetree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Expand environment variables and `~` in a path string.
fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> ApplicationResult<Self> {
        let global = global_config_path();
        Self::load_from(global.as_deref(), explicit, None)
    }

    /// Load settings from explicit sources.
    ///
    /// `env_vars` replaces the process environment when given, which keeps
    /// tests independent of each other.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env_vars: Option<HashMap<String, String>>,
    ) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, skipped when absent
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config must exist
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        let env = Environment::with_prefix("COURSETREE")
            .prefix_separator("_")
            .separator("__")
            .source(env_vars);
        current = Self::apply_env_overrides(current, env)?;

        current.expand_paths();
        Ok(current)
    }

    /// Scalar merge: overlay wins if specified, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog_file: overlay
                .catalog_file
                .clone()
                .unwrap_or_else(|| self.catalog_file.clone()),
            delimiter: overlay.delimiter.unwrap_or(self.delimiter),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Apply COURSETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog_file") {
            settings.catalog_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = parse_delimiter(&val)?;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the catalog path.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.catalog_file.to_string_lossy().as_ref());
        self.catalog_file = PathBuf::from(expanded);
    }

    /// Render as TOML, for `config show`.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

/// A delimiter must be exactly one character.
fn parse_delimiter(value: &str) -> ApplicationResult<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ApplicationError::Config {
            message: format!("delimiter must be a single character, got {:?}", value),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_single_char_when_parsing_delimiter_then_accepted() {
        assert_eq!(parse_delimiter(";").unwrap(), ';');
    }

    #[test]
    fn given_multiple_chars_when_parsing_delimiter_then_rejected() {
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
