//! Driving port for contact mutations.
//!
//! HTTP handlers call [`ContactsCommand`] instead of the service type so they
//! can be exercised against mocks. Every method returns the outcome message
//! shown to the caller.

use async_trait::async_trait;

use crate::domain::{ContactDetails, ContactId, Outcome, PictureUpload};

/// Domain use-case port for creating, editing, and deleting contacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactsCommand: Send + Sync {
    /// Store a new contact, uploading its picture first when one is given.
    async fn create_contact(
        &self,
        details: ContactDetails,
        picture: Option<PictureUpload>,
    ) -> Outcome<String>;

    /// Replace a contact's details and optionally its picture.
    async fn update_contact(
        &self,
        id: ContactId,
        details: ContactDetails,
        picture: Option<PictureUpload>,
    ) -> Outcome<String>;

    /// Delete a contact together with its picture file.
    async fn delete_contact(&self, id: ContactId) -> Outcome<String>;

    /// Remove only the contact's picture.
    async fn delete_contact_picture(&self, id: ContactId) -> Outcome<String>;
}
