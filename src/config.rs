//! Configuration management for the intake agent.
//!
//! Configuration is loaded once at startup from environment variables
//! (with `.env` support via dotenvy). The storage backend is selected
//! here, once, rather than probed dynamically at each call site.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Which profile store implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process store; contact data lives only for the process lifetime.
    Memory,
    /// Durable HTTP profile service.
    Api,
}

impl StoreBackend {
    fn parse(value: &str) -> ConfigResult<Self> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "api" => Ok(StoreBackend::Api),
            other => Err(ConfigError::InvalidValue {
                var: "INTAKE_STORE_BACKEND".to_string(),
                reason: format!("Must be 'memory' or 'api', got: {}", other),
            }),
        }
    }
}

/// Configuration for the intake agent.
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile store backend, selected once at startup.
    pub store_backend: StoreBackend,

    /// Base URL of the profile service (required when backend = api).
    pub api_base_url: String,

    /// API key for the profile service (required when backend = api).
    pub api_key: String,

    /// HTTP request timeout in seconds (default: 10).
    pub request_timeout: u64,

    /// Bounded number of merge attempts on transient store failures
    /// (default: 3).
    pub merge_retry_attempts: u32,

    /// Conversation context TTL in minutes (default: 30).
    pub conversation_ttl_minutes: u64,

    /// Maximum conversation history messages kept per user (default: 10).
    pub max_history_messages: usize,

    /// Log level (default: "info").
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `INTAKE_STORE_BACKEND`: "memory" or "api" (default: "memory")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `MERGE_RETRY_ATTEMPTS`: transient-failure retry bound (default: 3)
    /// - `CONVERSATION_TTL_MINUTES`: context TTL (default: 30)
    /// - `MAX_HISTORY_MESSAGES`: history tail length (default: 10)
    /// - `LOG_LEVEL`: logging level (default: "info")
    ///
    /// Required when `INTAKE_STORE_BACKEND=api`:
    /// - `INTAKE_API_BASE_URL`: profile service base URL (http/https)
    /// - `INTAKE_API_KEY`: authentication key
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present, without failing when it isn't.
        let _ = dotenvy::dotenv();

        let store_backend = match env::var("INTAKE_STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value)?,
            Err(_) => StoreBackend::Memory,
        };

        let api_base_url = env::var("INTAKE_API_BASE_URL").unwrap_or_default();
        let api_key = env::var("INTAKE_API_KEY").unwrap_or_default();

        if store_backend == StoreBackend::Api {
            if api_base_url.is_empty() {
                return Err(ConfigError::MissingVar("INTAKE_API_BASE_URL".to_string()));
            }
            if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    var: "INTAKE_API_BASE_URL".to_string(),
                    reason: "Must start with http:// or https://".to_string(),
                });
            }
            if api_key.trim().is_empty() {
                return Err(ConfigError::MissingVar("INTAKE_API_KEY".to_string()));
            }
        }

        let request_timeout = Self::parse_env("REQUEST_TIMEOUT", 10u64)?;
        let merge_retry_attempts = Self::parse_env("MERGE_RETRY_ATTEMPTS", 3u32)?;
        let conversation_ttl_minutes = Self::parse_env("CONVERSATION_TTL_MINUTES", 30u64)?;
        let max_history_messages = Self::parse_env("MAX_HISTORY_MESSAGES", 10usize)?;

        if merge_retry_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MERGE_RETRY_ATTEMPTS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            store_backend,
            api_base_url,
            api_key,
            request_timeout,
            merge_retry_attempts,
            conversation_ttl_minutes,
            max_history_messages,
            log_level,
        })
    }

    /// Parse an environment variable into its target numeric type with a
    /// default value. Parsing straight into the target type means
    /// out-of-range values are rejected rather than truncated.
    fn parse_env<T: std::str::FromStr>(var_name: &str, default: T) -> ConfigResult<T> {
        match env::var(var_name) {
            Ok(val) => val.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number in range, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_backend: StoreBackend::Memory,
            api_base_url: String::new(),
            api_key: String::new(),
            request_timeout: 10,
            merge_retry_attempts: 3,
            conversation_ttl_minutes: 30,
            max_history_messages: 10,
            log_level: "info".to_string(),
        }
    }
}
