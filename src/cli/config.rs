//! Configuration file
//!
//! JSON, optional. Every field has a default, so running without a config
//! file is the same as running with `{}`.
//!
//! ```json
//! { "author_fallback": "falsy", "on_map_error": "skip", "log_level": "info" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::query_server::OnMapError;
use crate::view::FallbackPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// When actor fields fall back to provider values
    #[serde(default)]
    pub author_fallback: FallbackPolicy,

    /// What to do with documents that fail to map
    #[serde(default)]
    pub on_map_error: OnMapError,

    /// Minimum log severity: trace, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author_fallback: FallbackPolicy::default(),
            on_map_error: OnMapError::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        self.severity().map(|_| ())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, value: serde_json::Value) -> std::path::PathBuf {
        let path = dir.path().join("feedview.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = Config::resolve(None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.author_fallback, FallbackPolicy::Falsy);
        assert_eq!(config.on_map_error, OnMapError::Skip);
        assert_eq!(config.severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_empty_object_is_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, json!({}));
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            json!({ "author_fallback": "absent", "on_map_error": "abort", "log_level": "warn" }),
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.author_fallback, FallbackPolicy::Absent);
        assert_eq!(config.on_map_error, OnMapError::Abort);
        assert_eq!(config.severity().unwrap(), Severity::Warn);
    }

    #[test]
    fn test_rejects_bad_values() {
        let dir = TempDir::new().unwrap();
        for bad in [
            json!({ "author_fallback": "truthy" }),
            json!({ "on_map_error": "retry" }),
            json!({ "log_level": "loud" }),
            json!({ "data_dir": "/tmp" }),
        ] {
            let path = write_config(&dir, bad.clone());
            let err = Config::load(&path).unwrap_err();
            assert_eq!(err.code_str(), "FEEDVIEW_CLI_CONFIG_ERROR", "{}", bad);
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }
}
