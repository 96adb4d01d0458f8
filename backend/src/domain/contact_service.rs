//! Contact domain service.
//!
//! [`ContactService`] owns every business rule about contacts and their
//! pictures. It coordinates the [`ContactRepository`] and [`PictureStore`]
//! ports and turns their results into [`Outcome`]s with fixed messages.
//!
//! Picture lifecycle:
//! - a picture is uploaded before the record that references it is written,
//!   and removed again if that write fails;
//! - a picture is removed before the record stops referencing it, and a
//!   failed removal leaves the record untouched.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::{debug, error, warn};

use crate::domain::ports::{
    ContactRepository, ContactRepositoryError, ContactsCommand, ContactsQuery, PictureStore,
};
use crate::domain::{
    Completed, Contact, ContactDetails, ContactId, Error, Outcome, PictureName, PictureUpload,
    SearchFilter,
};

pub const CONTACT_CREATED: &str = "Contact created successfully";
pub const CONTACT_CREATE_FAILED: &str = "Contact creating failed";
pub const SAVE_SUCCEEDED: &str = "Success";
pub const SAVE_FAILED: &str = "Operation failed!";
pub const CONTACT_NOT_FOUND: &str = "Contact not found";
pub const CONTACT_DELETED: &str = "Contact deleted successfully";
pub const CONTACT_DELETE_FAILED: &str = "Contact deleting failed";
pub const PICTURE_NOT_FOUND: &str = "Picture not found";
pub const PICTURE_DELETED: &str = "Picture deleted successfully";
pub const PICTURE_UPDATE_FAILED: &str = "Picture updating failed";
pub const CONTACT_LOOKUP_FAILED: &str = "Contact lookup failed";
pub const CONTACT_SEARCH_FAILED: &str = "Contact search failed";
pub const CONTACT_LIST_FAILED: &str = "Contact listing failed";

/// Contact service implementing the contact driving ports.
#[derive(Clone)]
pub struct ContactService<R, P> {
    contacts: Arc<R>,
    pictures: Arc<P>,
}

impl<R, P> ContactService<R, P> {
    pub fn new(contacts: Arc<R>, pictures: Arc<P>) -> Self {
        Self { contacts, pictures }
    }
}

impl<R, P> ContactService<R, P>
where
    R: ContactRepository,
    P: PictureStore,
{
    fn log_repository_error(operation: &'static str, error: &ContactRepositoryError) {
        match error {
            ContactRepositoryError::Connection { message } => {
                error!(operation, %message, "contact repository unavailable");
            }
            ContactRepositoryError::Query { message } => {
                warn!(operation, %message, "contact repository rejected operation");
            }
        }
    }

    fn map_repository_error(
        operation: &'static str,
        message: &'static str,
    ) -> impl FnOnce(ContactRepositoryError) -> Error {
        move |err| {
            Self::log_repository_error(operation, &err);
            Error::internal(message)
        }
    }

    /// Insert a contact.
    ///
    /// Returns `Created` with "Contact created successfully", or `Forbidden`
    /// with "Contact creating failed" when the store rejects the write.
    pub async fn create(&self, contact: &Contact) -> Outcome<String> {
        match self.contacts.create(contact).await {
            Ok(stored) => {
                debug!(id = ?stored.id(), "contact created");
                Ok(Completed::created(CONTACT_CREATED.to_owned()))
            }
            Err(err) => {
                Self::log_repository_error("create", &err);
                Err(Error::forbidden(CONTACT_CREATE_FAILED))
            }
        }
    }

    /// Insert or overwrite a contact.
    ///
    /// Returns `Created` with "Success", or `Forbidden` with
    /// "Operation failed!" when the store rejects the write.
    pub async fn create_or_update(&self, contact: &Contact) -> Outcome<String> {
        self.save(contact)
            .await
            .map(|_| Completed::created(SAVE_SUCCEEDED.to_owned()))
    }

    async fn save(&self, contact: &Contact) -> Result<Contact, Error> {
        self.contacts.create_or_update(contact).await.map_err(|err| {
            Self::log_repository_error("create_or_update", &err);
            Error::forbidden(SAVE_FAILED)
        })
    }

    /// Look up a contact by identifier.
    pub async fn get(&self, id: ContactId) -> Result<Option<Contact>, Error> {
        self.contacts
            .find(id)
            .await
            .map_err(Self::map_repository_error("find", CONTACT_LOOKUP_FAILED))
    }

    async fn require(&self, id: ContactId) -> Result<Contact, Error> {
        self.get(id)
            .await?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND))
    }

    /// Delete a contact and its picture file.
    ///
    /// The picture is removed first. If that fails the failure is returned
    /// unchanged and the record stays in place.
    pub async fn delete(&self, id: ContactId) -> Outcome<String> {
        let contact = self.require(id).await?;

        if let Some(picture) = contact.picture() {
            self.pictures.remove(picture).await.inspect_err(|err| {
                warn!(%id, picture = %picture, message = err.message(), "picture removal failed; contact kept");
            })?;
        }

        match self.contacts.delete(&contact).await {
            Ok(()) => Ok(Completed::ok(CONTACT_DELETED.to_owned())),
            Err(err) => {
                Self::log_repository_error("delete", &err);
                Err(Error::forbidden(CONTACT_DELETE_FAILED))
            }
        }
    }

    /// Remove a contact's picture and clear the reference to it.
    pub async fn delete_picture(&self, id: ContactId) -> Outcome<String> {
        let contact = self.require(id).await?;
        let Some(picture) = contact.picture().cloned() else {
            return Err(Error::forbidden(PICTURE_NOT_FOUND));
        };

        self.pictures.remove(&picture).await?;

        match self.contacts.create_or_update(&contact.without_picture()).await {
            Ok(_) => Ok(Completed::ok(PICTURE_DELETED.to_owned())),
            Err(err) => {
                Self::log_repository_error("create_or_update", &err);
                Err(Error::forbidden(PICTURE_UPDATE_FAILED))
            }
        }
    }

    /// Contacts matching `filter`.
    pub async fn search(&self, filter: &SearchFilter) -> Outcome<Vec<Contact>> {
        self.contacts
            .search(filter)
            .await
            .map(Completed::ok)
            .map_err(Self::map_repository_error("search", CONTACT_SEARCH_FAILED))
    }

    /// One page of all contacts.
    pub async fn paginated_contacts(&self, request: PageRequest) -> Result<Page<Contact>, Error> {
        self.contacts
            .list(request)
            .await
            .map_err(Self::map_repository_error("list", CONTACT_LIST_FAILED))
    }

    async fn upload(&self, picture: Option<PictureUpload>) -> Result<Option<PictureName>, Error> {
        match picture {
            Some(upload) => Ok(Some(self.pictures.upload(upload).await?.into_payload())),
            None => Ok(None),
        }
    }

    /// Best-effort removal of a file that no record references.
    async fn discard_picture(&self, picture: &PictureName) {
        if let Err(err) = self.pictures.remove(picture).await {
            warn!(picture = %picture, message = err.message(), "orphaned picture left on disk");
        }
    }

    /// Upload an optional picture and store a new contact referencing it.
    ///
    /// When the write fails, the freshly uploaded file is removed again.
    pub async fn add_contact(
        &self,
        details: ContactDetails,
        picture: Option<PictureUpload>,
    ) -> Outcome<String> {
        let uploaded = self.upload(picture).await?;
        let contact = match uploaded.clone() {
            Some(name) => Contact::new(details).with_picture(name),
            None => Contact::new(details),
        };

        let result = self.create_or_update(&contact).await;
        if let (Err(_), Some(name)) = (&result, uploaded.as_ref()) {
            self.discard_picture(name).await;
        }
        result
    }

    /// Replace a contact's details and, when given, its picture.
    ///
    /// The old picture file is removed only after the new record is stored.
    pub async fn update_contact(
        &self,
        id: ContactId,
        details: ContactDetails,
        picture: Option<PictureUpload>,
    ) -> Outcome<String> {
        let existing = self.require(id).await?;
        let previous = existing.picture().cloned();
        let uploaded = self.upload(picture).await?;

        let contact = match uploaded.clone() {
            Some(name) => existing.with_details(details).with_picture(name),
            None => existing.with_details(details),
        };

        let result = self.create_or_update(&contact).await;
        match (&result, uploaded.as_ref(), previous.as_ref()) {
            (Err(_), Some(new), _) => self.discard_picture(new).await,
            (Ok(_), Some(_), Some(old)) => self.discard_picture(old).await,
            _ => {}
        }
        result
    }
}

#[async_trait]
impl<R, P> ContactsCommand for ContactService<R, P>
where
    R: ContactRepository,
    P: PictureStore,
{
    async fn create_contact(
        &self,
        details: ContactDetails,
        picture: Option<PictureUpload>,
    ) -> Outcome<String> {
        self.add_contact(details, picture).await
    }

    async fn update_contact(
        &self,
        id: ContactId,
        details: ContactDetails,
        picture: Option<PictureUpload>,
    ) -> Outcome<String> {
        Self::update_contact(self, id, details, picture).await
    }

    async fn delete_contact(&self, id: ContactId) -> Outcome<String> {
        self.delete(id).await
    }

    async fn delete_contact_picture(&self, id: ContactId) -> Outcome<String> {
        self.delete_picture(id).await
    }
}

#[async_trait]
impl<R, P> ContactsQuery for ContactService<R, P>
where
    R: ContactRepository,
    P: PictureStore,
{
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, Error> {
        self.get(id).await
    }

    async fn search_contacts(&self, filter: &SearchFilter) -> Outcome<Vec<Contact>> {
        self.search(filter).await
    }

    async fn list_contacts(&self, request: PageRequest) -> Result<Page<Contact>, Error> {
        self.paginated_contacts(request).await
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
