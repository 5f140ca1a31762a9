//! Configuration validation.
//!
//! Collects every problem in one pass so a broken deployment reports all of
//! them at startup.

use crate::AppConfig;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Pool size configuration is invalid (min must be <= max).
    InvalidPoolSize { min: u32, max: u32 },
    /// Pool size exceeds maximum allowed.
    PoolSizeTooLarge { value: u32, maximum: u32 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout or duration value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// Upstream API keys are required in production.
    MissingUpstreamCredentials,
    /// At least one upstream attempt is required.
    InvalidMaxAttempts { value: u32 },
    /// Backoff multiplier must be at least 1.0.
    InvalidBackoffMultiplier { value: f64 },
    /// Rate limit must allow at least one request per second.
    InvalidRateLimit { value: u32 },
    /// Server request timeout would cut off an upstream fetch that is still retrying.
    RequestTimeoutBelowUpstreamBudget { server_secs: u64, required_ms: u128 },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::InvalidPoolSize { min, max } => {
                write!(
                    f,
                    "Invalid pool size: min ({}) cannot be greater than max ({})",
                    min, max
                )
            }
            Self::PoolSizeTooLarge { value, maximum } => {
                write!(f, "Pool size {} exceeds maximum allowed ({})", value, maximum)
            }
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::MissingUpstreamCredentials => {
                write!(f, "upstream.public_key and upstream.private_key are required in production")
            }
            Self::InvalidMaxAttempts { value } => {
                write!(f, "upstream.max_attempts must be at least 1, got {}", value)
            }
            Self::InvalidBackoffMultiplier { value } => {
                write!(f, "upstream.backoff_multiplier must be at least 1.0, got {}", value)
            }
            Self::InvalidRateLimit { value } => {
                write!(f, "upstream.requests_per_second must be at least 1, got {}", value)
            }
            Self::RequestTimeoutBelowUpstreamBudget { server_secs, required_ms } => {
                write!(
                    f,
                    "server.request_timeout_secs ({}s) must exceed the worst-case upstream fetch time ({}ms)",
                    server_secs, required_ms
                )
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum connection pool size.
    const MAX_POOL_SIZE: u32 = 1000;

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&config.server, &mut errors);
        Self::validate_database(&config.database, &mut errors);
        Self::validate_upstream(config, &mut errors);
        Self::validate_request_budget(config, &mut errors);
        Self::validate_cache(&config.cache, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(config: &crate::ServerConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.port == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: "server.port".to_string(),
                value: config.port,
            });
        }
        if config.request_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "server.request_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_database(config: &crate::DatabaseConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.url.is_empty() {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        } else if !config.url.starts_with("postgres://") && !config.url.starts_with("postgresql://") {
            errors.push(ConfigValidationError::InvalidUrl {
                url_type: "database".to_string(),
                message: "URL must start with postgres:// or postgresql://".to_string(),
            });
        }

        if config.min_connections > config.max_connections {
            errors.push(ConfigValidationError::InvalidPoolSize {
                min: config.min_connections,
                max: config.max_connections,
            });
        }
        if config.max_connections > Self::MAX_POOL_SIZE {
            errors.push(ConfigValidationError::PoolSizeTooLarge {
                value: config.max_connections,
                maximum: Self::MAX_POOL_SIZE,
            });
        }
        if config.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_upstream(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let upstream = &config.upstream;

        match Url::parse(&upstream.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "upstream".to_string(),
                message: format!("Unsupported scheme: {}", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "upstream".to_string(),
                message: format!("{}: {}", upstream.base_url, e),
            }),
        }

        if config.app.is_production() && !upstream.has_credentials() {
            errors.push(ConfigValidationError::MissingUpstreamCredentials);
        }

        if upstream.max_attempts == 0 {
            errors.push(ConfigValidationError::InvalidMaxAttempts { value: 0 });
        }
        if upstream.backoff_multiplier < 1.0 {
            errors.push(ConfigValidationError::InvalidBackoffMultiplier {
                value: upstream.backoff_multiplier,
            });
        }
        if upstream.requests_per_second == 0 {
            errors.push(ConfigValidationError::InvalidRateLimit { value: 0 });
        }

        for (name, value) in [
            ("upstream.connect_timeout_ms", upstream.connect_timeout_ms),
            ("upstream.read_timeout_ms", upstream.read_timeout_ms),
            ("upstream.request_timeout_ms", upstream.request_timeout_ms),
        ] {
            if value == 0 {
                errors.push(ConfigValidationError::NonPositiveTimeout {
                    name: name.to_string(),
                    value,
                });
            }
        }
    }

    fn validate_request_budget(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.server.request_timeout_secs == 0 {
            return;
        }

        let required = config.upstream.worst_case_fetch_time();
        if config.server.request_timeout() <= required {
            errors.push(ConfigValidationError::RequestTimeoutBelowUpstreamBudget {
                server_secs: config.server.request_timeout_secs,
                required_ms: required.as_millis(),
            });
        }
    }

    fn validate_cache(config: &crate::CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        if config.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "cache.ttl_secs".to_string(),
                value: 0,
            });
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
