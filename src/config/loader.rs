//! Configuration loading from disk.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::MockConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MockConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: MockConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_or_default(path: &Path) -> Result<MockConfig, ConfigError> {
    match load_config(path) {
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(MockConfig::default()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.listener.port, 18080);
    }

    #[test]
    fn test_missing_file_is_error_for_load_config() {
        let dir = TempDir::new().unwrap();
        let err = load_config(&dir.path().join("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_path = \"./defs\"\nshow_logo = false\n[watcher]\ndebounce_ms = 250\n").unwrap();

        let config = load_or_default(&path).unwrap();
        assert_eq!(config.api_path, Path::new("./defs"));
        assert!(!config.show_logo);
        assert_eq!(config.watcher.debounce_ms, 250);
    }

    #[test]
    fn test_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[listener\nport = 1").unwrap();

        assert!(matches!(load_or_default(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[listener]\nport = 0\n").unwrap();

        let err = load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v == &[ValidationError::ZeroPort]));
        assert_eq!(err.to_string(), "Validation failed: listener.port must not be 0");
    }
}
