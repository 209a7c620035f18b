//! Application configuration management.
//!
//! Configuration is loaded once at process start and passed down by
//! reference; nothing reads settings from ambient global state.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Accounting configuration.
    #[serde(default)]
    pub accounting: AccountingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

/// Accounting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountingConfig {
    /// Prefix for generated journal numbers (e.g. "JRN").
    #[serde(default = "default_journal_prefix")]
    pub journal_number_prefix: String,
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            journal_number_prefix: default_journal_prefix(),
        }
    }
}

fn default_journal_prefix() -> String {
    "JRN".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("VESTRY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
