// Unit tests for SmaConfig: defaults, validation, and environment loading.

use crate::config::SmaConfig;
use crate::error::config::ConfigError;

use common::RedactedSecret;

use std::env;
use std::time::Duration;

use serial_test::serial;

#[test]
fn given_default_config_when_validated_then_passes() {
    let config = SmaConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.base_url, "https://api.sma-platform.com/api");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.retry_attempts, 3);
    assert_eq!(config.retry_base_delay, Duration::from_secs(1));
    assert_eq!(config.token_ttl, Duration::from_secs(900));
    assert!(!config.debug);
    assert!(config.api_key.is_none());
}

#[test]
fn given_empty_base_url_when_validated_then_validation_error() {
    let config = SmaConfig {
        base_url: "  ".to_string(),
        ..SmaConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation { .. })
    ));
}

#[test]
fn given_non_http_base_url_when_validated_then_validation_error() {
    let config = SmaConfig {
        base_url: "ftp://api.sma-platform.com".to_string(),
        ..SmaConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation { .. })
    ));
}

#[test]
fn given_zero_timeout_when_validated_then_validation_error() {
    let config = SmaConfig {
        timeout: Duration::ZERO,
        ..SmaConfig::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation { .. })
    ));
}

/// **VALUE**: Verifies `from_env` picks up every supported variable.
///
/// **WHY THIS MATTERS**: Deployments configure the SDK through the
/// environment; a renamed or dropped variable silently reverts to
/// defaults in production.
#[test]
#[serial]
fn given_env_vars_when_from_env_then_overrides_defaults() {
    // set_var is unsafe in edition 2024; serialized via #[serial]
    unsafe {
        env::set_var("SMA_BASE_URL", "https://staging.sma-platform.com/api");
        env::set_var("SMA_API_KEY", "sk_test_abc123");
        env::set_var("SMA_TIMEOUT_SECS", "5");
        env::set_var("SMA_RETRY_ATTEMPTS", "1");
        env::set_var("SMA_DEBUG", "true");
    }

    let config = SmaConfig::from_env().expect("env config should validate");

    unsafe {
        env::remove_var("SMA_BASE_URL");
        env::remove_var("SMA_API_KEY");
        env::remove_var("SMA_TIMEOUT_SECS");
        env::remove_var("SMA_RETRY_ATTEMPTS");
        env::remove_var("SMA_DEBUG");
    }

    assert_eq!(config.base_url, "https://staging.sma-platform.com/api");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.retry_attempts, 1);
    assert!(config.debug);
    assert_eq!(
        config.api_key.as_ref().map(RedactedSecret::len),
        Some("sk_test_abc123".len())
    );
}

/// **VALUE**: Verifies malformed numeric variables fail loudly instead of
/// silently falling back to defaults.
#[test]
#[serial]
fn given_malformed_timeout_var_when_from_env_then_env_error() {
    unsafe {
        env::set_var("SMA_TIMEOUT_SECS", "not-a-number");
    }

    let result = SmaConfig::from_env();

    unsafe {
        env::remove_var("SMA_TIMEOUT_SECS");
    }

    assert!(matches!(result, Err(ConfigError::Env { .. })));
}

/// **VALUE**: Verifies a retry count beyond u32 range is an error, not a
/// silently truncated value.
///
/// **BUG THIS CATCHES**: Would catch parsing into a wider integer and
/// casting down, which turns 4294967296 into 0 retries.
#[test]
#[serial]
fn given_oversized_retry_attempts_var_when_from_env_then_env_error() {
    unsafe {
        env::set_var("SMA_RETRY_ATTEMPTS", "4294967296");
    }

    let result = SmaConfig::from_env();

    unsafe {
        env::remove_var("SMA_RETRY_ATTEMPTS");
    }

    assert!(matches!(result, Err(ConfigError::Env { .. })));
}

/// **VALUE**: Verifies the API key never leaks through Debug output.
///
/// **WHY THIS MATTERS**: Config values end up in logs; the secret wrapper
/// is the only thing standing between a debug statement and a leaked
/// credential.
#[test]
fn given_config_with_api_key_when_debug_formatted_then_key_redacted() {
    let config = SmaConfig {
        api_key: Some(RedactedSecret::new("sk_live_supersecret".to_string())),
        ..SmaConfig::default()
    };

    let rendered = format!("{config:?}");

    assert!(!rendered.contains("supersecret"));
    assert!(rendered.contains("REDACTED"));
}
