//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use crate::domain::ports::{ContactsCommand, ContactsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contacts: Arc<dyn ContactsCommand>,
    pub contacts_query: Arc<dyn ContactsQuery>,
    default_page_size: u32,
}

impl HttpState {
    /// Construct state from the contact ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use address_book::domain::{ContactService, PictureStoreConfig};
    /// use address_book::inbound::http::state::HttpState;
    /// use address_book::outbound::memory::InMemoryContactRepository;
    /// use address_book::outbound::storage::FsPictureStore;
    ///
    /// let store = FsPictureStore::open(PictureStoreConfig::default()).expect("picture dir");
    /// let service = Arc::new(ContactService::new(
    ///     Arc::new(InMemoryContactRepository::new()),
    ///     Arc::new(store),
    /// ));
    /// let state = HttpState::new(service.clone(), service).with_default_page_size(20);
    /// assert_eq!(state.default_page_size(), 20);
    /// ```
    pub fn new(contacts: Arc<dyn ContactsCommand>, contacts_query: Arc<dyn ContactsQuery>) -> Self {
        Self {
            contacts,
            contacts_query,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Page size used when a listing request omits `pageSize`, clamped to
    /// `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }
}
