//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::WaypostConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<WaypostConfig, ConfigError> {
    let config: WaypostConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<WaypostConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let config = parse_config("[server]\nhost = \"127.0.0.1\"\nport = 4000\n").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config("[server]\nhost = \"nope\"\nrequest_timeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 2));
        assert_eq!(
            err.to_string(),
            "Validation failed: server.host 'nope' is not an IP address or 'localhost', \
             server.request_timeout_secs must be greater than zero"
        );
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(parse_config("[server"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("waypost-config-{}.toml", std::process::id()));
        fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.logging.level, "debug");

        fs::remove_file(&path).unwrap();
    }
}
