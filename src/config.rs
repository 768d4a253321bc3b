//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/seqtree/seqtree.toml`
//! 3. Local config: `<dir>/.seqtree.toml`
//! 4. Environment variables: `SEQTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{RetryInvoker, Tokenizer, TraversalOrder, DEFAULT_DELIMITERS, DEFAULT_MAX_ATTEMPTS};

/// Retry budget configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts including the first one
    pub max_attempts: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Tokenizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Every character of this string separates words
    pub delimiters: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.iter().collect(),
        }
    }
}

/// Traversal configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TraversalConfig {
    /// Order used when none is given on the command line
    pub order: TraversalOrder,
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub retry: RawRetryConfig,
    pub tokenizer: RawTokenizerConfig,
    pub traversal: RawTraversalConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRetryConfig {
    pub max_attempts: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTokenizerConfig {
    pub delimiters: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTraversalConfig {
    pub order: Option<TraversalOrder>,
}

/// Unified configuration for seqtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub retry: RetryConfig,
    pub tokenizer: TokenizerConfig,
    pub traversal: TraversalConfig,
}

/// Get the XDG config directory for seqtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "seqtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("seqtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".seqtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            retry: RetryConfig {
                max_attempts: overlay
                    .retry
                    .max_attempts
                    .unwrap_or(self.retry.max_attempts),
            },
            tokenizer: TokenizerConfig {
                delimiters: overlay
                    .tokenizer
                    .delimiters
                    .clone()
                    .unwrap_or_else(|| self.tokenizer.delimiters.clone()),
            },
            traversal: TraversalConfig {
                order: overlay.traversal.order.unwrap_or(self.traversal.order),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.seqtree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/seqtree/seqtree.toml`
    /// 3. Local config: `<local_dir>/.seqtree.toml`
    /// 4. Environment variables: `SEQTREE_*` prefix, `__` between sections,
    ///    e.g. `SEQTREE_RETRY__MAX_ATTEMPTS=5`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply SEQTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SEQTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<usize>(&config, "retry.max_attempts")? {
            settings.retry.max_attempts = val;
        }
        if let Some(val) = env_value::<String>(&config, "tokenizer.delimiters")? {
            settings.tokenizer.delimiters = val;
        }
        if let Some(val) = env_value::<TraversalOrder>(&config, "traversal.order")? {
            settings.traversal.order = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.retry.max_attempts == 0 {
            return Err(ApplicationError::Config {
                message: "retry.max_attempts must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Retry invoker with the configured budget.
    pub fn retry_invoker(&self) -> Result<RetryInvoker, ApplicationError> {
        Ok(RetryInvoker::new(self.retry.max_attempts)?)
    }

    /// Tokenizer splitting on the configured delimiters.
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::with_delimiters(self.tokenizer.delimiters.chars())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# seqtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/seqtree/seqtree.toml
#   Local:  <dir>/.seqtree.toml
#   Env:    SEQTREE_* environment variables, e.g. SEQTREE_RETRY__MAX_ATTEMPTS=5

[retry]
# Total attempts including the first one
# max_attempts = 3

[tokenizer]
# Every character separates words (comma, space, period, tab, newline)
# delimiters = ", .\t\n"

[traversal]
# Default order for `seqtree traverse`: "depth", "breadth" or "post"
# order = "depth"
"#
        .to_string()
    }
}

/// Read an optional key, treating "not set" as None and anything else as an error.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
