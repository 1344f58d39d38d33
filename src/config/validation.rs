//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the base prefix shape
//! - Validate the log level against known levels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RouterConfig;

const KNOWN_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic violation in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Base prefix is not an absolute path.
    #[error("base_path {0:?} must be empty or begin with '/'")]
    RelativeBasePath(String),

    /// Base prefix carries query, fragment, or whitespace.
    #[error("base_path {0:?} must be a bare path prefix")]
    MalformedBasePath(String),

    /// Log level is not one of the known levels.
    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
}

/// Check everything serde cannot. Collects all violations.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let base = &config.deployment.base_path;
    if !base.is_empty() && !base.starts_with('/') {
        errors.push(ValidationError::RelativeBasePath(base.clone()));
    }
    if base.contains(['?', '#']) || base.contains(char::is_whitespace) {
        errors.push(ValidationError::MalformedBasePath(base.clone()));
    }

    let level = config.observability.log_level.as_str();
    if !KNOWN_LEVELS.contains(&level) {
        errors.push(ValidationError::UnknownLogLevel(level.to_string()));
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
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_relative_base_path_rejected() {
        let mut config = RouterConfig::default();
        config.deployment.base_path = "app/".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RelativeBasePath("app/".to_string())]
        );
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = RouterConfig::default();
        config.deployment.base_path = "app?x".to_string();
        config.observability.log_level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
