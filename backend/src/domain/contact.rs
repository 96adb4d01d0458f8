//! Contact data model.
//!
//! A [`Contact`] is an immutable value: edits produce a new value through the
//! `with_*` constructors, and the store assigns the identifier exactly once.
//! Field validation happens when [`ContactDetails`] is built, so every
//! persisted contact already satisfies the column constraints.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::PictureName;

/// Maximum length of every text field, matching the column width.
pub const CONTACT_FIELD_MAX: usize = 255;

/// Minimum number of digits in a phone number.
pub const PHONE_DIGITS_MIN: usize = 3;

/// Names of the validated contact fields, as exposed to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Street,
    Zip,
    City,
    Country,
    PhoneNumber,
    EmailAddress,
}

impl ContactField {
    /// camelCase name used in request bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Street => "street",
            Self::Zip => "zip",
            Self::City => "city",
            Self::Country => "country",
            Self::PhoneNumber => "phoneNumber",
            Self::EmailAddress => "emailAddress",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised while building [`ContactDetails`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: ContactField },
    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: ContactField, max: usize },
    #[error("emailAddress must be a valid email address")]
    InvalidEmail,
    #[error(
        "phoneNumber may only contain digits, spaces, or + ( ) . / - and needs at least {min} digits",
        min = PHONE_DIGITS_MIN
    )]
    InvalidPhoneNumber,
}

impl ContactValidationError {
    /// The field the error refers to.
    pub fn field(&self) -> ContactField {
        match self {
            Self::EmptyField { field } | Self::FieldTooLong { field, .. } => *field,
            Self::InvalidEmail => ContactField::EmailAddress,
            Self::InvalidPhoneNumber => ContactField::PhoneNumber,
        }
    }
}

/// Store-assigned contact identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i32);

impl ContactId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ContactId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and a dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        let pattern = r"^\+?[0-9 ()./-]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Unvalidated contact fields as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub country: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email_address: String,
}

/// Validated personal and address data of a contact.
///
/// Text fields are trimmed, non-empty, and at most [`CONTACT_FIELD_MAX`]
/// characters long.
///
/// # Examples
/// ```
/// use address_book::domain::{ContactDetails, ContactDraft};
///
/// let details = ContactDetails::try_from(ContactDraft {
///     first_name: " Ada ".into(),
///     last_name: "Lovelace".into(),
///     street: "12 St James's Square".into(),
///     zip: "SW1Y 4JH".into(),
///     city: "London".into(),
///     country: "United Kingdom".into(),
///     phone_number: "+44 20 7946 0000".into(),
///     date_of_birth: None,
///     email_address: "ada@example.org".into(),
/// })
/// .expect("valid details");
/// assert_eq!(details.first_name(), "Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    first_name: String,
    last_name: String,
    street: String,
    zip: String,
    city: String,
    country: String,
    phone_number: String,
    date_of_birth: Option<NaiveDate>,
    email_address: String,
}

fn required(field: ContactField, value: String) -> Result<String, ContactValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ContactValidationError::EmptyField { field });
    }
    if trimmed.chars().count() > CONTACT_FIELD_MAX {
        return Err(ContactValidationError::FieldTooLong {
            field,
            max: CONTACT_FIELD_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

impl TryFrom<ContactDraft> for ContactDetails {
    type Error = ContactValidationError;

    fn try_from(draft: ContactDraft) -> Result<Self, Self::Error> {
        let phone_number = required(ContactField::PhoneNumber, draft.phone_number)?;
        let digits = phone_number.chars().filter(char::is_ascii_digit).count();
        if !phone_regex().is_match(&phone_number) || digits < PHONE_DIGITS_MIN {
            return Err(ContactValidationError::InvalidPhoneNumber);
        }

        let email_address = required(ContactField::EmailAddress, draft.email_address)?;
        if !email_regex().is_match(&email_address) {
            return Err(ContactValidationError::InvalidEmail);
        }

        Ok(Self {
            first_name: required(ContactField::FirstName, draft.first_name)?,
            last_name: required(ContactField::LastName, draft.last_name)?,
            street: required(ContactField::Street, draft.street)?,
            zip: required(ContactField::Zip, draft.zip)?,
            city: required(ContactField::City, draft.city)?,
            country: required(ContactField::Country, draft.country)?,
            phone_number,
            date_of_birth: draft.date_of_birth,
            email_address,
        })
    }
}

impl ContactDetails {
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }

    pub fn street(&self) -> &str {
        self.street.as_str()
    }

    pub fn zip(&self) -> &str {
        self.zip.as_str()
    }

    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    pub fn country(&self) -> &str {
        self.country.as_str()
    }

    pub fn phone_number(&self) -> &str {
        self.phone_number.as_str()
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    pub fn email_address(&self) -> &str {
        self.email_address.as_str()
    }

    /// Return the fields as an editable draft.
    pub fn into_draft(self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name,
            last_name: self.last_name,
            street: self.street,
            zip: self.zip,
            city: self.city,
            country: self.country,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
            email_address: self.email_address,
        }
    }
}

/// One address-book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: Option<ContactId>,
    details: ContactDetails,
    picture: Option<PictureName>,
}

impl Contact {
    /// A contact that has not been stored yet.
    pub fn new(details: ContactDetails) -> Self {
        Self {
            id: None,
            details,
            picture: None,
        }
    }

    /// Rebuild a stored contact. Used by repository adapters.
    pub fn with_id(id: ContactId, details: ContactDetails, picture: Option<PictureName>) -> Self {
        Self {
            id: Some(id),
            details,
            picture,
        }
    }

    pub fn with_picture(self, picture: PictureName) -> Self {
        Self {
            picture: Some(picture),
            ..self
        }
    }

    pub fn without_picture(self) -> Self {
        Self {
            picture: None,
            ..self
        }
    }

    /// Replace the details, keeping the identifier and picture.
    pub fn with_details(self, details: ContactDetails) -> Self {
        Self { details, ..self }
    }

    pub fn id(&self) -> Option<ContactId> {
        self.id
    }

    pub fn details(&self) -> &ContactDetails {
        &self.details
    }

    pub fn picture(&self) -> Option<&PictureName> {
        self.picture.as_ref()
    }
}

#[cfg(test)]
mod tests {
    //! Validation coverage for contact details.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> ContactDraft {
        ContactDraft {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            street: "1 Navy Yard".into(),
            zip: "20374".into(),
            city: "Washington".into(),
            country: "USA".into(),
            phone_number: "(202) 555-0100".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1906, 12, 9),
            email_address: "grace@example.com".into(),
        }
    }

    #[rstest]
    fn valid_draft_is_trimmed(mut draft: ContactDraft) {
        draft.city = "  Washington  ".into();
        let details = ContactDetails::try_from(draft).expect("valid details");
        assert_eq!(details.city(), "Washington");
        assert_eq!(details.date_of_birth(), NaiveDate::from_ymd_opt(1906, 12, 9));
    }

    #[rstest]
    fn blank_field_is_rejected(mut draft: ContactDraft) {
        draft.street = "   ".into();
        assert_eq!(
            ContactDetails::try_from(draft),
            Err(ContactValidationError::EmptyField {
                field: ContactField::Street
            })
        );
    }

    #[rstest]
    fn overlong_field_is_rejected(mut draft: ContactDraft) {
        draft.last_name = "x".repeat(CONTACT_FIELD_MAX + 1);
        let err = ContactDetails::try_from(draft).expect_err("too long");
        assert_eq!(err.field(), ContactField::LastName);
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("a@b")]
    #[case("two@@example.com")]
    #[case("spaced out@example.com")]
    fn malformed_email_is_rejected(mut draft: ContactDraft, #[case] email: &str) {
        draft.email_address = email.into();
        assert_eq!(
            ContactDetails::try_from(draft),
            Err(ContactValidationError::InvalidEmail)
        );
    }

    #[rstest]
    #[case("12")]
    #[case("call me")]
    #[case("555-CODE")]
    fn malformed_phone_is_rejected(mut draft: ContactDraft, #[case] phone: &str) {
        draft.phone_number = phone.into();
        assert_eq!(
            ContactDetails::try_from(draft),
            Err(ContactValidationError::InvalidPhoneNumber)
        );
    }

    #[rstest]
    fn picture_constructors_only_touch_picture(draft: ContactDraft) {
        let details = ContactDetails::try_from(draft).expect("valid details");
        let stored = Contact::with_id(ContactId::new(7), details.clone(), None);
        let picture = PictureName::new("a.png").expect("valid name");

        let with = stored.clone().with_picture(picture.clone());
        assert_eq!(with.id(), Some(ContactId::new(7)));
        assert_eq!(with.picture(), Some(&picture));

        let without = with.without_picture();
        assert_eq!(without, stored);
    }

    #[rstest]
    fn with_details_keeps_identity(draft: ContactDraft) {
        let details = ContactDetails::try_from(draft.clone()).expect("valid details");
        let picture = PictureName::new("a.png").expect("valid name");
        let stored = Contact::with_id(ContactId::new(3), details, Some(picture.clone()));

        let mut edited = draft;
        edited.city = "Arlington".into();
        let edited = ContactDetails::try_from(edited).expect("valid details");
        let updated = stored.with_details(edited);

        assert_eq!(updated.id(), Some(ContactId::new(3)));
        assert_eq!(updated.picture(), Some(&picture));
        assert_eq!(updated.details().city(), "Arlington");
    }

    #[rstest]
    #[case(
        ContactValidationError::EmptyField { field: ContactField::City },
        "city must not be empty"
    )]
    #[case(
        ContactValidationError::FieldTooLong { field: ContactField::Zip, max: 20 },
        "zip must be at most 20 characters"
    )]
    #[case(
        ContactValidationError::InvalidPhoneNumber,
        "phoneNumber may only contain digits, spaces, or + ( ) . / - and needs at least 3 digits"
    )]
    fn validation_errors_render_messages(
        #[case] err: ContactValidationError,
        #[case] expected: &str,
    ) {
        assert_eq!(err.to_string(), expected);
    }
}
