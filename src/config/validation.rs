//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and address syntax
//! - Validate the log filter directive
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: &WaypostConfig → Result<(), Vec<ValidationError>>

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::WaypostConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.host '{0}' is not an IP address or 'localhost'")]
    InvalidHost(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("logging.level '{0}' is not a valid filter directive")]
    InvalidLogLevel(String),

    #[error("metrics.address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &WaypostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let host = config.server.host.as_str();
    if host != "localhost" && host.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::InvalidHost(host.to_string()));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    // Only checked when it will actually be bound.
    if config.metrics.enabled && config.metrics.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.metrics.address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&WaypostConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = WaypostConfig::default();
        config.server.host = "not a host".into();
        config.server.request_timeout_secs = 0;
        config.metrics.enabled = true;
        config.metrics.address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidHost("not a host".into()),
                ValidationError::ZeroRequestTimeout,
                ValidationError::InvalidMetricsAddress("nowhere".into()),
            ]
        );
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = WaypostConfig::default();
        config.metrics.address = "nowhere".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_accepts_localhost_and_directives() {
        let mut config = WaypostConfig::default();
        config.server.host = "localhost".into();
        config.logging.level = "waypost=debug,tower_http=info".into();
        assert!(validate_config(&config).is_ok());
    }
}
