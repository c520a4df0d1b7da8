//! Configuration loaded from environment variables.

use std::time::Duration;

use envconfig::Envconfig;

use crate::utils::RetryConfig;

#[derive(Debug, Clone, Envconfig)]
pub struct Config {
    /// Tracing filter used when RUST_LOG is not set
    #[envconfig(from = "LOG_FILTER", default = "info,pos_customers=debug")]
    pub log_filter: String,

    #[envconfig(nested = true)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Envconfig)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL. The in-memory store is used when unset.
    #[envconfig(from = "DATABASE_URL")]
    pub url: Option<String>,

    #[envconfig(from = "DATABASE_MAX_CONNECTIONS", default = "10")]
    pub max_connections: u32,

    #[envconfig(from = "DATABASE_ACQUIRE_TIMEOUT_SECS", default = "5")]
    pub acquire_timeout_secs: u64,

    /// Attempts made to reach the database before giving up
    #[envconfig(from = "DATABASE_CONNECT_ATTEMPTS", default = "5")]
    pub connect_attempts: u32,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn connect_retry(&self) -> RetryConfig {
        RetryConfig::default().with_max_attempts(self.connect_attempts)
    }

    /// Mask password in URL for logging
    pub fn masked_url(&self) -> Option<String> {
        let url = self.url.as_deref()?;
        if let (Some(scheme_end), Some(at_pos)) = (url.find("://"), url.rfind('@')) {
            if at_pos > scheme_end {
                return Some(format!("{}***{}", &url[..scheme_end + 3], &url[at_pos..]));
            }
        }
        Some(url.to_string())
    }
}
