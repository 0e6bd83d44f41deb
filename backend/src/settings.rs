//! Application settings loaded via OrthoConfig.
//!
//! Values are merged from config files, `RENTAL_*` environment variables,
//! and CLI flags. Later sources win.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_POOL_MAX_SIZE, DEFAULT_POOL_MIN_IDLE, PoolConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was configured.
    #[error("database_url is required (set RENTAL_DATABASE_URL)")]
    MissingDatabaseUrl,
    /// The bind address did not parse as a socket address.
    #[error("invalid bind address {value}: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// Idle connections would exceed the pool size.
    #[error("pool_min_idle ({min_idle}) exceeds pool_max_size ({max_size})")]
    PoolSizing { min_idle: u32, max_size: u32 },
}

/// Runtime configuration for the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RENTAL")]
pub struct AppSettings {
    /// Socket address the server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Connections kept open while idle.
    pub pool_min_idle: Option<u32>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Parse the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// Trimmed database URL; required.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Whether to apply migrations at startup. Defaults to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Build the pool configuration described by these settings.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let max_size = self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE);
        let min_idle = self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE);
        if min_idle > max_size {
            return Err(SettingsError::PoolSizing { min_idle, max_size });
        }
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(max_size)
            .with_min_idle(Some(min_idle)))
    }
}
