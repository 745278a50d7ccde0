// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use macrometer_core::constants::defaults;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// API credential for the USDA `FoodData` Central service.
///
/// Passed explicitly into the client at construction; there is no
/// ambient/global key lookup anywhere else in the codebase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdaCredentials {
    /// The API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
}

impl UsdaCredentials {
    /// Create credentials from an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

/// USDA `FoodData` Central client configuration
#[derive(Debug, Clone)]
pub struct UsdaConfig {
    /// API credential, injected at client construction
    pub credentials: UsdaCredentials,
    /// Base URL for the USDA API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Candidate foods requested per search
    pub page_size: u32,
}

/// Per-item resolution tuning
#[derive(Debug, Clone, Copy)]
pub struct ResolutionConfig {
    /// Retry attempts after the initial try
    pub max_retries: u32,
    /// Fixed pause between retries, in milliseconds
    pub backoff_ms: u64,
    /// Concurrent upstream lookups per request. Fixed at 1 by default:
    /// resolution is sequential out of politeness to the upstream rate
    /// limit, and that guarantee must stay visible and testable.
    pub lookup_concurrency: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::MAX_RETRIES,
            backoff_ms: defaults::RETRY_BACKOFF_MS,
            lookup_concurrency: defaults::LOOKUP_CONCURRENCY,
        }
    }
}

/// Data store location configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding `history.json` and `favorites.json`
    pub data_dir: PathBuf,
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP listen host
    pub host: String,
    /// Upstream USDA client settings
    pub usda: UsdaConfig,
    /// Per-item resolution tuning
    pub resolution: ResolutionConfig,
    /// Data store location
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `USDA_API_KEY` is absent (a server
    /// configuration error, distinct from any lookup failure) or if a
    /// numeric variable fails to parse.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("USDA_API_KEY").context(
            "USDA_API_KEY is not set; get a free key at \
             https://fdc.nal.usda.gov/api-key-signup.html",
        )?;
        if api_key.trim().is_empty() {
            anyhow::bail!("USDA_API_KEY is set but empty");
        }

        Ok(Self {
            http_port: parse_env_or("HTTP_PORT", defaults::HTTP_PORT)?,
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            usda: UsdaConfig {
                credentials: UsdaCredentials::new(api_key),
                base_url: env::var("USDA_BASE_URL")
                    .unwrap_or_else(|_| defaults::USDA_BASE_URL.into()),
                timeout_secs: parse_env_or("USDA_TIMEOUT_SECS", defaults::UPSTREAM_TIMEOUT_SECS)?,
                connect_timeout_secs: parse_env_or(
                    "USDA_CONNECT_TIMEOUT_SECS",
                    defaults::UPSTREAM_CONNECT_TIMEOUT_SECS,
                )?,
                page_size: parse_env_or("USDA_PAGE_SIZE", defaults::SEARCH_PAGE_SIZE)?,
            },
            resolution: ResolutionConfig {
                max_retries: parse_env_or("RESOLVER_MAX_RETRIES", defaults::MAX_RETRIES)?,
                backoff_ms: parse_env_or("RESOLVER_BACKOFF_MS", defaults::RETRY_BACKOFF_MS)?,
                lookup_concurrency: parse_env_or(
                    "RESOLVER_LOOKUP_CONCURRENCY",
                    defaults::LOOKUP_CONCURRENCY,
                )?,
            },
            storage: StorageConfig {
                data_dir: env::var("DATA_DIR").map_or_else(|_| default_data_dir(), PathBuf::from),
            },
        })
    }

    /// One-line configuration summary for startup logging. Never
    /// includes the credential.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "MacroMeter config: port={}, usda_base={}, page_size={}, retries={}, backoff={}ms, timeout={}s, data_dir={}",
            self.http_port,
            self.usda.base_url,
            self.usda.page_size,
            self.resolution.max_retries,
            self.resolution.backoff_ms,
            self.usda.timeout_secs,
            self.storage.data_dir.display(),
        )
    }
}

/// Default data directory: platform data dir, falling back to ./data
fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("data"), |d| d.join("macrometer"))
}

/// Parse an environment variable with a typed default
fn parse_env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("invalid value for {name}: {value}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn from_env_requires_api_key() {
        env::remove_var("USDA_API_KEY");
        let err = ServerConfig::from_env().expect_err("missing key must fail");
        assert!(err.to_string().contains("USDA_API_KEY"));
    }

    #[test]
    #[serial]
    fn from_env_applies_defaults() {
        env::set_var("USDA_API_KEY", "test-key");
        env::remove_var("HTTP_PORT");
        env::remove_var("USDA_PAGE_SIZE");

        let config = ServerConfig::from_env().expect("loads with defaults");
        assert_eq!(config.http_port, defaults::HTTP_PORT);
        assert_eq!(config.usda.page_size, 5);
        assert_eq!(config.resolution.max_retries, 2);
        assert_eq!(config.resolution.backoff_ms, 300);
        assert_eq!(config.resolution.lookup_concurrency, 1);

        env::remove_var("USDA_API_KEY");
    }

    #[test]
    #[serial]
    fn summary_never_leaks_the_credential() {
        env::set_var("USDA_API_KEY", "super-secret-key");
        let config = ServerConfig::from_env().expect("loads");
        assert!(!config.summary().contains("super-secret-key"));
        env::remove_var("USDA_API_KEY");
    }
}
