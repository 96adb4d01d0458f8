//! Contact HTTP handlers.
//!
//! ```text
//! GET    /api/v1/contacts?page=&pageSize=
//! GET    /api/v1/contacts/search?contactName=&contactEmail=&contactAddress=
//! GET    /api/v1/contacts/{id}
//! POST   /api/v1/contacts
//! PUT    /api/v1/contacts/{id}
//! DELETE /api/v1/contacts/{id}
//! DELETE /api/v1/contacts/{id}/picture
//! ```
//!
//! `search_contacts` must be registered before `get_contact` so the literal
//! `search` segment is not parsed as an id.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{Completed, Error, SearchFilter, SuccessStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::contacts_dto::{
    ContactListResponse, ContactPageResponse, ContactRequestBody, ContactResponse,
    ListContactsQuery, MessageResponse, ParsedContactRequest, SearchContactsQuery,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_contact_id, parse_page_request};

const CONTACT_NOT_FOUND: &str = "Contact not found";

fn message_response(completed: Completed<String>) -> HttpResponse {
    let mut builder = match completed.status() {
        SuccessStatus::Created => HttpResponse::Created(),
        SuccessStatus::Ok => HttpResponse::Ok(),
    };
    builder.json(MessageResponse {
        message: completed.into_payload(),
    })
}

/// List contacts one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    params(ListContactsQuery),
    responses(
        (status = 200, description = "Page of contacts", body = ContactPageResponse),
        (status = 400, description = "Invalid page request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    query: web::Query<ListContactsQuery>,
) -> ApiResult<web::Json<ContactPageResponse>> {
    let query = query.into_inner();
    let request = parse_page_request(
        query.page.unwrap_or(1),
        query.page_size.unwrap_or_else(|| state.default_page_size()),
    )?;
    let page = state.contacts_query.list_contacts(request).await?;
    Ok(web::Json(ContactPageResponse::from(page)))
}

/// Search contacts by name, email or address fragments.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/search",
    params(SearchContactsQuery),
    responses(
        (status = 200, description = "Matching contacts", body = ContactListResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "searchContacts"
)]
#[get("/contacts/search")]
pub async fn search_contacts(
    state: web::Data<HttpState>,
    query: web::Query<SearchContactsQuery>,
) -> ApiResult<web::Json<ContactListResponse>> {
    let query = query.into_inner();
    let filter = SearchFilter::new(
        query.contact_name,
        query.contact_email,
        query.contact_address,
    );
    let contacts = state.contacts_query.search_contacts(&filter).await?;
    Ok(web::Json(ContactListResponse::from(
        contacts.into_payload(),
    )))
}

/// Fetch one contact.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}",
    params(("id" = i32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact", body = ContactResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "Contact not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContactResponse>> {
    let id = parse_contact_id(&path.into_inner())?;
    let contact = state
        .contacts_query
        .get_contact(id)
        .await?
        .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND))?;
    Ok(web::Json(ContactResponse::from(contact)))
}

/// Create a contact, optionally with a picture.
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = ContactRequestBody,
    responses(
        (status = 201, description = "Contact created", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Upload or persistence failed", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequestBody>,
) -> ApiResult<HttpResponse> {
    let parsed = ParsedContactRequest::try_from(payload.into_inner())?;
    let completed = state
        .contacts
        .create_contact(parsed.details, parsed.picture)
        .await?;
    Ok(message_response(completed))
}

/// Replace a contact's fields, optionally with a new picture.
#[utoipa::path(
    put,
    path = "/api/v1/contacts/{id}",
    params(("id" = i32, Path, description = "Contact identifier")),
    request_body = ContactRequestBody,
    responses(
        (status = 201, description = "Contact saved", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Upload or persistence failed", body = Error),
        (status = 404, description = "Contact not found", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ContactRequestBody>,
) -> ApiResult<HttpResponse> {
    let id = parse_contact_id(&path.into_inner())?;
    let parsed = ParsedContactRequest::try_from(payload.into_inner())?;
    let completed = state
        .contacts
        .update_contact(id, parsed.details, parsed.picture)
        .await?;
    Ok(message_response(completed))
}

/// Delete a contact and its picture.
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}",
    params(("id" = i32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact deleted", body = MessageResponse),
        (status = 403, description = "Deletion failed", body = Error),
        (status = 404, description = "Contact not found", body = Error),
        (status = 500, description = "Picture removal failed", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_contact_id(&path.into_inner())?;
    let completed = state.contacts.delete_contact(id).await?;
    Ok(message_response(completed))
}

/// Remove a contact's picture, keeping the contact.
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}/picture",
    params(("id" = i32, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Picture deleted", body = MessageResponse),
        (status = 403, description = "No picture, or update failed", body = Error),
        (status = 404, description = "Contact not found", body = Error),
        (status = 500, description = "Picture removal failed", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "deleteContactPicture"
)]
#[delete("/contacts/{id}/picture")]
pub async fn delete_contact_picture(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_contact_id(&path.into_inner())?;
    let completed = state.contacts.delete_contact_picture(id).await?;
    Ok(message_response(completed))
}

/// Register every contact route on `cfg`, search before the id routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_contacts)
        .service(search_contacts)
        .service(get_contact)
        .service(create_contact)
        .service(update_contact)
        .service(delete_contact)
        .service(delete_contact_picture);
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
