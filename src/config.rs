//! Configuration file support for depsight.
//!
//! Provides YAML-based configuration through `depsight.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::analysis::domain::QualityWeights;
use crate::shared::error::DepsightError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "depsight.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Limit for each external command, in milliseconds.
    pub timeout_ms: Option<u64>,
    pub log_level: Option<String>,
    /// Directory names skipped by the import scanner, on top of the defaults.
    pub exclude_dirs: Option<Vec<String>>,
    /// Per-metric quality weights; omitted metrics keep their default weight.
    pub weights: Option<QualityWeights>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Warn about unknown fields in the config file.
    ///
    /// Called once logging is installed, since the config decides the level.
    pub fn warn_unknown_fields(&self) {
        for key in self.unknown_fields.keys() {
            warn!(field = %key, "Unknown config field will be ignored");
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\nHint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = if content.trim().is_empty() {
        ConfigFile::default()
    } else {
        serde_yaml_ng::from_str(&content).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\nHint: Ensure the file contains valid YAML syntax.",
                path.display()
            )
        })?
    };

    validate_config(&config)?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.timeout_ms == Some(0) {
        return Err(DepsightError::InvalidConfig {
            message: "timeout_ms must be greater than 0".to_string(),
        }
        .into());
    }

    if let Some(weights) = &config.weights {
        if weights.total() == 0 {
            return Err(DepsightError::InvalidConfig {
                message: "weights must not all be 0".to_string(),
            }
            .into());
        }
    }

    if let Some(dirs) = &config.exclude_dirs {
        if let Some(i) = dirs.iter().position(|d| d.trim().is_empty()) {
            return Err(DepsightError::InvalidConfig {
                message: format!("exclude_dirs[{}] must not be empty", i),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, content).unwrap();
        config_path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
timeout_ms: 45000
log_level: debug
exclude_dirs:
  - generated
  - storybook-static
weights:
  security: 40
  dead_code: 0
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_millis(45000)));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.exclude_dirs.as_deref(),
            Some(&["generated".to_string(), "storybook-static".to_string()][..])
        );
        let weights = config.weights.unwrap();
        assert_eq!(weights.security, 40);
        assert_eq!(weights.dead_code, 0);
        assert_eq!(weights.dependency_freshness, 20);
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "timeout_ms: 1000\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.timeout_ms, Some(1000));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_empty_config_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "\n");
        let config = load_config_from_path(&config_path).unwrap();
        assert!(config.timeout_ms.is_none());
        assert!(config.weights.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "invalid: yaml: [[[broken");
        let err = load_config_from_path(&config_path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_weight_sum_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
weights:
  dependency_freshness: 0
  security: 0
  test_coverage: 0
  typescript_strictness: 0
  linting: 0
  dead_code: 0
"#,
        );
        let err = load_config_from_path(&config_path).unwrap_err().to_string();
        assert!(err.contains("Invalid config"));
        assert!(err.contains("weights"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "timeout_ms: 0\n");
        let err = load_config_from_path(&config_path).unwrap_err().to_string();
        assert!(err.contains("timeout_ms"));
    }

    #[test]
    fn test_blank_exclude_dir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "exclude_dirs:\n  - \"  \"\n");
        let err = load_config_from_path(&config_path).unwrap_err().to_string();
        assert!(err.contains("exclude_dirs[0]"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
timeout_ms: 5000
format: json
another_unknown: value
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("format"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }
}
