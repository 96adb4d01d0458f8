//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every contact endpoint, the health probes, and the
//! request, response and error schemas they use. The generated document is
//! served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::contacts_dto::{
    ContactListResponse, ContactPageResponse, ContactRequestBody, ContactResponse,
    MessageResponse, PictureBody,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Address book API",
        description = "Contacts with optional pictures, search, and paginated listing."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::search_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::contacts::delete_contact_picture,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ContactRequestBody,
        PictureBody,
        ContactResponse,
        ContactListResponse,
        ContactPageResponse,
        MessageResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "contacts", description = "Address book entries and their pictures"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
