//! Port for contact persistence.
//!
//! The [`ContactRepository`] trait is the only way the domain reaches stored
//! contacts. Adapters report every persistence failure as an `Err`; the
//! service decides which failures the caller sees and how.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Contact, ContactId, SearchFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "contact repository query failed: {message}",
    }
}

/// Port for storing and querying contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert a new contact and return it with its assigned identifier.
    ///
    /// Any identifier already present on `contact` is ignored.
    async fn create(&self, contact: &Contact) -> Result<Contact, ContactRepositoryError>;

    /// Insert when `contact` has no identifier, otherwise overwrite the row
    /// with that identifier.
    ///
    /// Every column is written, so a cleared picture is stored as `NULL`.
    /// Updating an identifier that no longer exists is a
    /// [`ContactRepositoryError::Query`].
    async fn create_or_update(&self, contact: &Contact) -> Result<Contact, ContactRepositoryError>;

    /// Remove the stored row for `contact`.
    ///
    /// A contact without an identifier, or one whose row is already gone, is
    /// a [`ContactRepositoryError::Query`].
    async fn delete(&self, contact: &Contact) -> Result<(), ContactRepositoryError>;

    /// Fetch one contact by identifier.
    async fn find(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Contacts matching every clause of `filter`, ordered by identifier.
    ///
    /// An empty filter returns every contact.
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// One page of all contacts in identifier order.
    async fn list(&self, request: PageRequest) -> Result<Page<Contact>, ContactRepositoryError>;
}
