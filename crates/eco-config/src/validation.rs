//! Configuration validation module.
//!
//! Rejects configuration that would make the cache services misbehave,
//! failing fast at load time rather than at the first request.

use crate::{AppConfig, CacheBackend};
use eco_core::EcoError;
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A TTL of zero would make every cached entry stale immediately.
    ZeroTtl { name: String },
    /// A TTL beyond the supported ceiling.
    TtlTooLarge { name: String, value: u64, max: u64 },
    /// The backend eviction TTL is shorter than a logical TTL.
    StoreTtlTooShort { store: u64, logical: u64 },
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Pool size must be positive.
    InvalidPoolSize { value: u32 },
    /// Log level is invalid.
    InvalidLogLevel { value: String },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTtl { name } => write!(f, "TTL '{}' must be positive", name),
            Self::TtlTooLarge { name, value, max } => write!(
                f,
                "TTL '{}' is {}s (must be at most {}s)",
                name, value, max
            ),
            Self::StoreTtlTooShort { store, logical } => write!(
                f,
                "Store TTL ({}s) must not be shorter than the logical TTL ({}s)",
                store, logical
            ),
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::InvalidPoolSize { value } => {
                write!(f, "Invalid pool size: {} (must be positive)", value)
            }
            Self::InvalidLogLevel { value } => write!(
                f,
                "Invalid log level: '{}' (valid: trace, debug, info, warn, error)",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Valid log levels.
    const VALID_LOG_LEVELS: &'static [&'static str] = &["trace", "debug", "info", "warn", "error"];

    /// Largest accepted TTL, one hundred years.
    pub const MAX_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_cache(config, &mut errors);
        Self::validate_observability(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates the configuration, folding every error into one
    /// `EcoError::Configuration`.
    pub fn ensure_valid(config: &AppConfig) -> Result<(), EcoError> {
        Self::validate(config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            EcoError::Configuration(message)
        })
    }

    fn validate_cache(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let cache = &config.cache;
        for (name, value) in [
            ("cache.price_ttl_secs", cache.price_ttl_secs),
            ("cache.personal_ttl_secs", cache.personal_ttl_secs),
            ("cache.store_ttl_secs", cache.store_ttl_secs),
        ] {
            if value == 0 {
                errors.push(ConfigValidationError::ZeroTtl {
                    name: name.to_string(),
                });
            } else if value > Self::MAX_TTL_SECS {
                errors.push(ConfigValidationError::TtlTooLarge {
                    name: name.to_string(),
                    value,
                    max: Self::MAX_TTL_SECS,
                });
            }
        }

        let logical = cache.price_ttl_secs.max(cache.personal_ttl_secs);
        if cache.store_ttl_secs != 0 && cache.store_ttl_secs < logical {
            errors.push(ConfigValidationError::StoreTtlTooShort {
                store: cache.store_ttl_secs,
                logical,
            });
        }

        if cache.backend != CacheBackend::Redis {
            return;
        }

        match Url::parse(&config.redis.url) {
            Ok(url) if matches!(url.scheme(), "redis" | "rediss") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "redis".to_string(),
                message: e.to_string(),
            }),
        }

        if config.redis.pool_size == 0 {
            errors.push(ConfigValidationError::InvalidPoolSize { value: 0 });
        }
    }

    fn validate_observability(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let level = config.observability.log_level.to_lowercase();
        if !Self::VALID_LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::InvalidLogLevel {
                value: config.observability.log_level.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = AppConfig::default();
        config.cache.price_ttl_secs = 0;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.contains(&ConfigValidationError::ZeroTtl {
            name: "cache.price_ttl_secs".to_string()
        }));
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let mut config = AppConfig::default();
        config.cache.store_ttl_secs = u64::MAX;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::TtlTooLarge {
                name: "cache.store_ttl_secs".to_string(),
                value: u64::MAX,
                max: ConfigValidator::MAX_TTL_SECS,
            }]
        );

        config.cache.store_ttl_secs = ConfigValidator::MAX_TTL_SECS;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_store_ttl_shorter_than_logical_rejected() {
        let mut config = AppConfig::default();
        config.cache.store_ttl_secs = 60;

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::StoreTtlTooShort {
                store: 60,
                logical: 600
            }]
        );
    }

    #[test]
    fn test_redis_url_checked_only_for_redis_backend() {
        let mut config = AppConfig::default();
        config.redis.url = "not a url".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.cache.backend = CacheBackend::Redis;
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(errors[0], ConfigValidationError::InvalidUrl { .. }));

        config.redis.url = "http://localhost:6379".to_string();
        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors[0].to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = AppConfig::default();
        config.observability.log_level = "verbose".to_string();

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::InvalidLogLevel {
                value: "verbose".to_string()
            }]
        );
    }
}
