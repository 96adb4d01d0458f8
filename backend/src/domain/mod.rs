//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed contact model and the service that owns
//! the picture lifecycle. Adapters depend on this module; it depends on no
//! adapter.
//!
//! Public surface:
//! - Contact, ContactDetails, ContactId: the address-book entry.
//! - PictureName, PictureUpload, PictureStoreConfig: picture files.
//! - SearchFilter: optional name/email/address fragments.
//! - Outcome, Completed, SuccessStatus: uniform operation results.
//! - Error, ErrorCode: transport-agnostic failures.
//! - ContactService: the driving-port implementation.

pub mod contact;
pub mod contact_service;
pub mod error;
pub mod outcome;
pub mod picture;
pub mod ports;
pub mod search_filter;
pub mod trace_id;

pub use self::contact::{
    CONTACT_FIELD_MAX, Contact, ContactDetails, ContactDraft, ContactField, ContactId,
    ContactValidationError,
};
pub use self::contact_service::ContactService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::outcome::{Completed, Outcome, SuccessStatus};
pub use self::picture::{
    DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_PICTURE_DIRECTORY, PictureName, PictureStoreConfig,
    PictureUpload, PictureValidationError,
};
pub use self::search_filter::{SearchClause, SearchField, SearchFilter};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use address_book::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("Contact not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
