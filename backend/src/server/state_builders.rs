//! Builders wiring contact adapters into HTTP state.

use std::sync::Arc;

use address_book::domain::ContactService;
use address_book::domain::ports::ContactRepository;
use address_book::inbound::http::state::HttpState;
use address_book::outbound::memory::InMemoryContactRepository;
use address_book::outbound::persistence::DieselContactRepository;
use address_book::outbound::storage::{FsPictureStore, PictureDirectoryError};
use tracing::{info, warn};

use super::ServerConfig;

fn state_for<R>(contacts: R, pictures: Arc<FsPictureStore>, page_size: u32) -> HttpState
where
    R: ContactRepository + 'static,
{
    let service = Arc::new(ContactService::new(Arc::new(contacts), pictures));
    HttpState::new(service.clone(), service).with_default_page_size(page_size)
}

/// Build HTTP state, using PostgreSQL when a pool is configured and the
/// in-memory repository otherwise.
///
/// # Errors
/// Returns [`PictureDirectoryError`] when the picture directory cannot be
/// created or opened.
pub fn build_http_state(config: &ServerConfig) -> Result<HttpState, PictureDirectoryError> {
    let pictures = Arc::new(FsPictureStore::open(config.pictures.clone())?);
    info!(
        directory = %config.pictures.picture_directory().display(),
        allowed = ?config.pictures.allowed_extensions(),
        "picture store ready"
    );
    Ok(match &config.db_pool {
        Some(pool) => state_for(
            DieselContactRepository::new(pool.clone()),
            pictures,
            config.page_size,
        ),
        None => {
            warn!("no database configured; contacts are kept in memory");
            state_for(InMemoryContactRepository::new(), pictures, config.page_size)
        }
    })
}
