//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::events::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use tracing::{info, warn};

/// Environment variable holding the Ticketmaster Discovery API key.
pub const API_KEY_ENV: &str = "TICKETMASTER_API_KEY";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Ticketmaster Discovery API access.
    pub ticketmaster: TicketmasterConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the Ticketmaster Discovery API.
#[derive(Clone)]
pub struct TicketmasterConfig {
    /// Consumer key from https://developer.ticketmaster.com/
    pub api_key: Option<String>,

    /// API base URL, without the `/events.json` suffix.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for TicketmasterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketmasterConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for TicketmasterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-live-events".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            ticketmaster: TicketmasterConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, ...).
    /// The API key is read from `TICKETMASTER_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        match std::env::var(API_KEY_ENV) {
            Ok(api_key) if !api_key.trim().is_empty() => {
                config.ticketmaster.api_key = Some(api_key);
                info!("Ticketmaster API key loaded from environment");
            }
            _ => warn!("{} is not set", API_KEY_ENV),
        }

        if let Ok(base_url) = std::env::var("MCP_TICKETMASTER_BASE_URL") {
            config.ticketmaster.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MCP_TICKETMASTER_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.ticketmaster.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid MCP_TICKETMASTER_TIMEOUT_SECS={:?}, using {}s",
                    timeout, config.ticketmaster.timeout_secs
                ),
            }
        }

        config
    }

    /// Check that the configuration is usable before starting the server.
    pub fn validate(&self) -> Result<()> {
        let has_key = self
            .ticketmaster
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        if !has_key {
            return Err(Error::config(format!("{} must be set", API_KEY_ENV)));
        }

        if self.ticketmaster.timeout_secs == 0 {
            return Err(Error::config("Ticketmaster timeout must be at least 1 second"));
        }

        Ok(())
    }
}
