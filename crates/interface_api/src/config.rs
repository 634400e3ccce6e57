//! API configuration

use serde::Deserialize;
use std::path::PathBuf;

use core_kernel::CoreError;
use domain_reconciliation::{DuplicatePolicy, ReconcileOptions};

/// Placeholder secret; the server refuses to start with it
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Room for two reports of 100 000 records each
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Handling of claim ids repeated within one report
    pub duplicate_policy: DuplicatePolicy,
    /// JSON file seeding Report A at startup
    pub source_a_path: Option<PathBuf>,
    /// JSON file seeding Report B at startup
    pub source_b_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            duplicate_policy: DuplicatePolicy::default(),
            source_a_path: None,
            source_b_path: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Rejects settings the server cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(CoreError::configuration("jwt_secret must not be empty"));
        }
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            return Err(CoreError::configuration("jwt_secret must be set, the default is public"));
        }
        if self.jwt_expiration_secs == 0 {
            return Err(CoreError::configuration("jwt_expiration_secs must be positive"));
        }
        if self.max_body_bytes == 0 {
            return Err(CoreError::configuration("max_body_bytes must be positive"));
        }
        if self.source_a_path.is_some() != self.source_b_path.is_some() {
            return Err(CoreError::configuration(
                "source_a_path and source_b_path must be set together",
            ));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reconciler options derived from this configuration
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            duplicate_policy: self.duplicate_policy,
        }
    }

    /// Both seed files, if both are configured
    pub fn seed_paths(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.source_a_path, &self.source_b_path) {
            (Some(a), Some(b)) => Some((a.clone(), b.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.reconcile_options(), ReconcileOptions::default());
        assert!(config.seed_paths().is_none());
    }

    #[test]
    fn test_seed_paths_require_both_sides() {
        let config = ApiConfig {
            source_a_path: Some(PathBuf::from("a.json")),
            ..Default::default()
        };
        assert!(config.seed_paths().is_none());
        assert!(matches!(config.validate(), Err(CoreError::Configuration(_))));
    }

    fn with_secret() -> ApiConfig {
        ApiConfig {
            jwt_secret: "a-real-secret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let config = ApiConfig {
            jwt_secret: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(with_secret().validate().is_ok());
    }

    #[test]
    fn test_default_secret_is_rejected() {
        assert!(matches!(
            ApiConfig::default().validate(),
            Err(CoreError::Configuration(_))
        ));
    }

    #[test]
    fn test_unparsable_variable_is_an_error() {
        std::env::set_var("API_PORT", "not-a-port");
        let result = ApiConfig::from_env();
        std::env::remove_var("API_PORT");

        assert!(result.is_err());
    }

    #[test]
    fn test_zero_body_limit_is_rejected() {
        let config = ApiConfig {
            max_body_bytes: 0,
            ..with_secret()
        };
        assert!(config.validate().is_err());
    }
}
