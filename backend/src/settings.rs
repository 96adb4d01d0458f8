//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `ADDRESS_BOOK_*` environment variables, command-line
//! flags, or a configuration file. Every field is optional; accessors supply
//! the defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_PICTURE_DIRECTORY, PictureStoreConfig};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings validation failures.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration values for the address book service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADDRESS_BOOK")]
pub struct AddressBookSettings {
    /// PostgreSQL connection string. Without one, contacts live in memory.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Directory holding uploaded pictures.
    pub picture_directory: Option<PathBuf>,
    /// Comma-separated list of accepted picture extensions.
    pub allowed_extensions: Option<String>,
    /// Default page size for contact listings.
    pub page_size: Option<u32>,
    /// Apply embedded migrations at startup when a database is configured.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AddressBookSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Listing page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Picture store configuration. Blank extension entries are ignored.
    pub fn picture_store_config(&self) -> PictureStoreConfig {
        let directory = self
            .picture_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PICTURE_DIRECTORY));
        match self.allowed_extensions.as_deref() {
            Some(list) => PictureStoreConfig::new(directory, list.split(',')),
            None => PictureStoreConfig::new(directory, DEFAULT_ALLOWED_EXTENSIONS),
        }
    }

    /// Pool configuration when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())?;
        let config = PoolConfig::new(url);
        Some(match self.pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        })
    }
}
