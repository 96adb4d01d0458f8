//! Driving port for contact reads.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Contact, ContactId, Error, Outcome, SearchFilter};

/// Domain use-case port for looking up, searching, and listing contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsQuery: Send + Sync {
    /// Fetch one contact; `None` when the identifier is unknown.
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, Error>;

    /// Contacts matching the filter.
    async fn search_contacts(&self, filter: &SearchFilter) -> Outcome<Vec<Contact>>;

    /// One page of all contacts.
    async fn list_contacts(&self, request: PageRequest) -> Result<Page<Contact>, Error>;
}
