//! Configuration for the checker's ambient behavior (not its decisions).
//!
//! Nothing here changes what a query proves or disproves — `CheckerConfig`
//! only controls observability. Resolution is defaults, then an optional
//! TOML file, then environment variables (`REFLECTGUARD_*`), highest
//! priority last. There is no CLI layer: CLI flags are the rule harness's
//! concern, out of scope for this crate.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Checker-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckerConfig {
    /// Emit a `tracing` event for every abstention, tagged with its
    /// `QueryError` reason. Default: `true`.
    pub log_abstentions: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            log_abstentions: true,
        }
    }
}

impl CheckerConfig {
    /// Resolve configuration: defaults, overridden by `path` if present,
    /// overridden by `REFLECTGUARD_LOG_ABSTENTIONS` if set.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = path {
            if path.exists() {
                let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
                    path: path.display().to_string(),
                    source,
                })?;
            }
        }

        if let Ok(raw) = std::env::var("REFLECTGUARD_LOG_ABSTENTIONS") {
            config.log_abstentions = match raw.as_str() {
                "1" | "true" | "TRUE" => true,
                "0" | "false" | "FALSE" => false,
                other => {
                    return Err(ConfigError::InvalidValue {
                        field: "REFLECTGUARD_LOG_ABSTENTIONS".to_string(),
                        message: format!("expected a boolean, got {other:?}"),
                    });
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_log_abstentions() {
        assert!(CheckerConfig::default().log_abstentions);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = CheckerConfig::load(Some(Path::new("/nonexistent/reflectguard.toml")))
            .expect("missing file is not an error");
        assert_eq!(config, CheckerConfig::default());
    }

    #[test]
    fn file_overrides_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reflectguard.toml");
        std::fs::write(&path, "log_abstentions = false\n").unwrap();
        let config = CheckerConfig::load(Some(&path)).unwrap();
        assert!(!config.log_abstentions);
    }
}
