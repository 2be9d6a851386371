//! Configuration loading for CRAI services
//!
//! Resolution priority per key:
//! 1. Environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! The config file is read from `$CRAI_CONFIG` if set, otherwise from the
//! platform config directory (e.g. `~/.config/crai/config.toml`).

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default OpenAI-compatible chat endpoint (local Ollama)
pub const DEFAULT_MODEL_BASE_URL: &str = "http://localhost:11434/v1";
/// Default model identifier
pub const DEFAULT_MODEL_NAME: &str = "llama3.1:latest";
/// Default title metadata service endpoint
pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
/// Default model call timeout
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;
/// Default title lookup timeout
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;

/// Resolved configuration for the comment-moderation service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the OpenAI-compatible chat completions endpoint
    pub model_base_url: String,
    /// Model identifier sent with every completion request
    pub model_name: String,
    /// Optional bearer token for the model endpoint
    pub model_api_key: Option<String>,
    /// Seconds before a model call is abandoned
    pub model_timeout_secs: u64,
    /// Base URL of the title metadata service
    pub omdb_base_url: String,
    /// OMDb API key; title lookup is disabled when unset
    pub omdb_api_key: Option<String>,
    /// Seconds before a title lookup is abandoned
    pub lookup_timeout_secs: u64,
    /// Attempt title lookup even for comments that will not be published
    pub enrich_even_when_rejected: bool,
    /// Recompute the publish flag from profanity/relevance instead of
    /// trusting the model-provided value
    pub derive_publish: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_base_url: DEFAULT_MODEL_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            model_api_key: None,
            model_timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
            omdb_base_url: DEFAULT_OMDB_BASE_URL.to_string(),
            omdb_api_key: None,
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
            enrich_even_when_rejected: true,
            derive_publish: true,
        }
    }
}

/// Raw TOML config file contents; every key optional
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    model_base_url: Option<String>,
    model_name: Option<String>,
    model_api_key: Option<String>,
    model_timeout_secs: Option<u64>,
    omdb_base_url: Option<String>,
    omdb_api_key: Option<String>,
    lookup_timeout_secs: Option<u64>,
    enrich_even_when_rejected: Option<bool>,
    derive_publish: Option<bool>,
}

impl ServiceConfig {
    /// Load configuration with ENV → TOML → default resolution
    pub fn load() -> Result<Self> {
        let toml_config = load_toml_config()?;
        let defaults = Self::default();

        Ok(Self {
            model_base_url: resolve_string(
                "CRAI_MODEL_BASE_URL",
                toml_config.model_base_url,
                &defaults.model_base_url,
            ),
            model_name: resolve_string(
                "CRAI_MODEL_NAME",
                toml_config.model_name,
                &defaults.model_name,
            ),
            model_api_key: resolve_secret("CRAI_MODEL_API_KEY", toml_config.model_api_key),
            model_timeout_secs: resolve_u64(
                "CRAI_MODEL_TIMEOUT_SECS",
                toml_config.model_timeout_secs,
                defaults.model_timeout_secs,
            )?,
            omdb_base_url: resolve_string(
                "CRAI_OMDB_BASE_URL",
                toml_config.omdb_base_url,
                &defaults.omdb_base_url,
            ),
            omdb_api_key: resolve_secret("CRAI_OMDB_API_KEY", toml_config.omdb_api_key),
            lookup_timeout_secs: resolve_u64(
                "CRAI_LOOKUP_TIMEOUT_SECS",
                toml_config.lookup_timeout_secs,
                defaults.lookup_timeout_secs,
            )?,
            enrich_even_when_rejected: resolve_bool(
                "CRAI_ENRICH_EVEN_WHEN_REJECTED",
                toml_config.enrich_even_when_rejected,
                defaults.enrich_even_when_rejected,
            )?,
            derive_publish: resolve_bool(
                "CRAI_DERIVE_PUBLISH",
                toml_config.derive_publish,
                defaults.derive_publish,
            )?,
        })
    }
}

/// Get configuration file path for the platform
///
/// `$CRAI_CONFIG` overrides the platform default location.
fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CRAI_CONFIG") {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("crai").join("config.toml"))
}

fn load_toml_config() -> Result<TomlConfig> {
    let path = match config_file_path() {
        Some(path) if path.exists() => path,
        _ => return Ok(TomlConfig::default()),
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn env_value(env_name: &str) -> Option<String> {
    std::env::var(env_name)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn resolve_string(env_name: &str, toml_value: Option<String>, default: &str) -> String {
    match env_value(env_name) {
        Some(value) => {
            if toml_value.is_some() {
                warn!(
                    "{} set in both environment and config file; using environment",
                    env_name
                );
            }
            value
        }
        None => toml_value.unwrap_or_else(|| default.to_string()),
    }
}

/// Resolve an optional secret (API keys); absent everywhere stays absent
fn resolve_secret(env_name: &str, toml_value: Option<String>) -> Option<String> {
    match env_value(env_name) {
        Some(value) => {
            if toml_value.is_some() {
                warn!(
                    "{} set in both environment and config file; using environment",
                    env_name
                );
            }
            Some(value)
        }
        None => toml_value.filter(|v| !v.trim().is_empty()),
    }
}

fn resolve_u64(env_name: &str, toml_value: Option<u64>, default: u64) -> Result<u64> {
    match env_value(env_name) {
        Some(value) => value
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a valid integer: {}", env_name, value))),
        None => Ok(toml_value.unwrap_or(default)),
    }
}

fn resolve_bool(env_name: &str, toml_value: Option<bool>, default: bool) -> Result<bool> {
    match env_value(env_name) {
        Some(value) => match value.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(Error::Config(format!(
                "{} is not a valid boolean: {}",
                env_name, value
            ))),
        },
        None => Ok(toml_value.unwrap_or(default)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_resolution_prefers_env_over_toml() {
        std::env::set_var("CRAI_TEST_STRING_KEY", "from-env");
        let resolved = resolve_string(
            "CRAI_TEST_STRING_KEY",
            Some("from-toml".to_string()),
            "default",
        );
        assert_eq!(resolved, "from-env");
        std::env::remove_var("CRAI_TEST_STRING_KEY");
    }

    #[test]
    fn string_resolution_falls_back_to_toml_then_default() {
        let resolved = resolve_string(
            "CRAI_TEST_STRING_UNSET",
            Some("from-toml".to_string()),
            "default",
        );
        assert_eq!(resolved, "from-toml");

        let resolved = resolve_string("CRAI_TEST_STRING_UNSET", None, "default");
        assert_eq!(resolved, "default");
    }

    #[test]
    fn blank_env_value_is_ignored() {
        std::env::set_var("CRAI_TEST_BLANK_KEY", "   ");
        let resolved = resolve_secret("CRAI_TEST_BLANK_KEY", Some("from-toml".to_string()));
        assert_eq!(resolved, Some("from-toml".to_string()));
        std::env::remove_var("CRAI_TEST_BLANK_KEY");
    }

    #[test]
    fn secret_absent_everywhere_stays_absent() {
        assert_eq!(resolve_secret("CRAI_TEST_SECRET_UNSET", None), None);
    }

    #[test]
    fn bool_resolution_accepts_numeric_forms() {
        std::env::set_var("CRAI_TEST_BOOL_KEY", "1");
        assert!(resolve_bool("CRAI_TEST_BOOL_KEY", None, false).unwrap());
        std::env::set_var("CRAI_TEST_BOOL_KEY", "0");
        assert!(!resolve_bool("CRAI_TEST_BOOL_KEY", None, true).unwrap());
        std::env::remove_var("CRAI_TEST_BOOL_KEY");
    }

    #[test]
    fn bool_resolution_rejects_garbage() {
        std::env::set_var("CRAI_TEST_BOOL_BAD", "maybe");
        assert!(resolve_bool("CRAI_TEST_BOOL_BAD", None, true).is_err());
        std::env::remove_var("CRAI_TEST_BOOL_BAD");
    }

    #[test]
    fn u64_resolution_rejects_garbage() {
        std::env::set_var("CRAI_TEST_U64_BAD", "soon");
        assert!(resolve_u64("CRAI_TEST_U64_BAD", None, 30).is_err());
        std::env::remove_var("CRAI_TEST_U64_BAD");
    }

    #[test]
    fn defaults_keep_parity_behavior() {
        let config = ServiceConfig::default();
        assert!(config.enrich_even_when_rejected);
        assert!(config.derive_publish);
        assert_eq!(config.model_base_url, DEFAULT_MODEL_BASE_URL);
        assert_eq!(config.omdb_api_key, None);
    }
}
