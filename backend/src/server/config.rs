//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use address_book::domain::PictureStoreConfig;
use address_book::outbound::persistence::DbPool;
use address_book::settings::{AddressBookSettings, SettingsError};
use pagination::DEFAULT_PAGE_SIZE;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) pictures: PictureStoreConfig,
    pub(crate) page_size: u32,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, pictures: PictureStoreConfig) -> Self {
        Self {
            bind_addr,
            pictures,
            page_size: DEFAULT_PAGE_SIZE,
            db_pool: None,
        }
    }

    /// Derive the server configuration from loaded settings.
    pub fn from_settings(settings: &AddressBookSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?, settings.picture_store_config())
            .with_page_size(settings.page_size()))
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Attach a database connection pool.
    ///
    /// Without one the server keeps contacts in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
