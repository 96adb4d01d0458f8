//! Request and response payloads for the contacts HTTP API.

use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Contact, ContactDetails, ContactDraft, Error, PictureUpload};
use crate::inbound::http::validation::{
    FieldName, contact_validation_error, decode_base64, parse_optional_date, require,
};

/// Picture attached to a create or update request.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PictureBody {
    /// File extension without the leading dot, e.g. `png`.
    #[schema(example = "png")]
    pub extension: String,
    /// File content encoded as standard base64.
    pub data: String,
}

/// Contact fields submitted by clients.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequestBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    /// Optional date in `YYYY-MM-DD` form.
    #[schema(example = "1990-02-28")]
    pub date_of_birth: Option<String>,
    pub email_address: Option<String>,
    pub picture: Option<PictureBody>,
}

/// Validated request body, ready for the contact service.
#[derive(Debug)]
pub(crate) struct ParsedContactRequest {
    pub(crate) details: ContactDetails,
    pub(crate) picture: Option<PictureUpload>,
}

impl TryFrom<ContactRequestBody> for ParsedContactRequest {
    type Error = Error;

    fn try_from(body: ContactRequestBody) -> Result<Self, Self::Error> {
        let draft = ContactDraft {
            first_name: require(body.first_name, FieldName::new("firstName"))?,
            last_name: require(body.last_name, FieldName::new("lastName"))?,
            street: require(body.street, FieldName::new("street"))?,
            zip: require(body.zip, FieldName::new("zip"))?,
            city: require(body.city, FieldName::new("city"))?,
            country: require(body.country, FieldName::new("country"))?,
            phone_number: require(body.phone_number, FieldName::new("phoneNumber"))?,
            date_of_birth: parse_optional_date(
                body.date_of_birth,
                FieldName::new("dateOfBirth"),
            )?,
            email_address: require(body.email_address, FieldName::new("emailAddress"))?,
        };
        let details =
            ContactDetails::try_from(draft).map_err(|err| contact_validation_error(&err))?;
        let picture = body
            .picture
            .map(|picture| {
                decode_base64(&picture.data, FieldName::new("picture.data"))
                    .map(|bytes| PictureUpload::new(&picture.extension, bytes))
            })
            .transpose()?;
        Ok(Self { details, picture })
    }
}

/// Contact view model returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    #[schema(example = 1)]
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub country: String,
    pub phone_number: String,
    pub date_of_birth: Option<String>,
    pub email_address: String,
    /// Stored picture file name.
    pub picture: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        let id = contact.id().map(|id| id.get());
        let picture = contact.picture().map(|name| name.as_str().to_owned());
        let details = contact.details();
        Self {
            id,
            first_name: details.first_name().to_owned(),
            last_name: details.last_name().to_owned(),
            street: details.street().to_owned(),
            zip: details.zip().to_owned(),
            city: details.city().to_owned(),
            country: details.country().to_owned(),
            phone_number: details.phone_number().to_owned(),
            date_of_birth: details
                .date_of_birth()
                .map(|date| date.format("%Y-%m-%d").to_string()),
            email_address: details.email_address().to_owned(),
            picture,
        }
    }
}

/// Search results.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ContactListResponse {
    pub contacts: Vec<ContactResponse>,
}

impl From<Vec<Contact>> for ContactListResponse {
    fn from(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: contacts.into_iter().map(ContactResponse::from).collect(),
        }
    }
}

/// One page of contacts.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPageResponse {
    pub contacts: Vec<ContactResponse>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<Page<Contact>> for ContactPageResponse {
    fn from(page: Page<Contact>) -> Self {
        let total_pages = page.total_pages();
        let has_next = page.has_next();
        let has_previous = page.has_previous();
        let page = page.map(ContactResponse::from);
        Self {
            page: page.page(),
            page_size: page.page_size(),
            total_items: page.total_items(),
            total_pages,
            has_next,
            has_previous,
            contacts: page.into_items(),
        }
    }
}

/// Outcome message of a command.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Contact created successfully")]
    pub message: String,
}

/// Query parameters for listing contacts.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListContactsQuery {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Contacts per page, at most 100.
    pub page_size: Option<u32>,
}

/// Query parameters for searching contacts. Blank values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchContactsQuery {
    /// Matches first name or last name.
    pub contact_name: Option<String>,
    /// Matches email address.
    pub contact_email: Option<String>,
    /// Matches street, zip, city or country.
    pub contact_address: Option<String>,
}
