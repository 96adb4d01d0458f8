//! Tests for contact HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockall::predicate::eq;
use pagination::Page;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockContactsCommand, MockContactsQuery};
use crate::domain::{Contact, ContactDetails, ContactDraft, ContactId, ErrorCode, PictureName};

#[fixture]
fn details() -> ContactDetails {
    ContactDetails::try_from(ContactDraft {
        first_name: "Grace".to_owned(),
        last_name: "Hopper".to_owned(),
        street: "1 Navy Yard".to_owned(),
        zip: "20374".to_owned(),
        city: "Washington".to_owned(),
        country: "USA".to_owned(),
        phone_number: "+1 202 555 0100".to_owned(),
        date_of_birth: None,
        email_address: "grace@example.org".to_owned(),
    })
    .expect("valid details")
}

fn request_body() -> Value {
    json!({
        "firstName": "Grace",
        "lastName": "Hopper",
        "street": "1 Navy Yard",
        "zip": "20374",
        "city": "Washington",
        "country": "USA",
        "phoneNumber": "+1 202 555 0100",
        "emailAddress": "grace@example.org"
    })
}

async fn call(
    command: MockContactsCommand,
    query: MockContactsQuery,
    req: actix_test::TestRequest,
) -> actix_web::dev::ServiceResponse {
    let state = HttpState::new(Arc::new(command), Arc::new(query)).with_default_page_size(5);
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").configure(configure)),
    )
    .await;
    actix_test::call_service(&app, req.to_request()).await
}

#[rstest]
#[actix_web::test]
async fn list_uses_default_page_size(details: ContactDetails) {
    let mut query = MockContactsQuery::new();
    query
        .expect_list_contacts()
        .withf(|request| request.page() == 1 && request.page_size() == 5)
        .times(1)
        .returning(move |request| {
            let contact = Contact::with_id(ContactId::new(1), details.clone(), None);
            Ok(Page::new(vec![contact], request, 1))
        });

    let res = call(
        MockContactsCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/v1/contacts"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["pageSize"], 5);
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["contacts"][0]["lastName"], "Hopper");
}

#[rstest]
#[actix_web::test]
async fn list_rejects_oversized_pages() {
    let res = call(
        MockContactsCommand::new(),
        MockContactsQuery::new(),
        actix_test::TestRequest::get().uri("/api/v1/contacts?page=1&pageSize=500"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "pageSize");
}

#[rstest]
#[actix_web::test]
async fn search_builds_filter_from_query(details: ContactDetails) {
    let mut query = MockContactsQuery::new();
    query
        .expect_search_contacts()
        .withf(|filter| {
            filter.name() == Some("hop") && filter.email().is_none() && filter.address().is_none()
        })
        .times(1)
        .returning(move |_| {
            let contact = Contact::with_id(ContactId::new(3), details.clone(), None);
            Ok(Completed::ok(vec![contact]))
        });

    let res = call(
        MockContactsCommand::new(),
        query,
        actix_test::TestRequest::get()
            .uri("/api/v1/contacts/search?contactName=hop&contactEmail="),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["contacts"][0]["id"], 3);
}

#[rstest]
#[actix_web::test]
async fn get_returns_contact(details: ContactDetails) {
    let mut query = MockContactsQuery::new();
    query
        .expect_get_contact()
        .with(eq(ContactId::new(9)))
        .times(1)
        .returning(move |id| {
            let picture = PictureName::new("f00d.jpg").expect("picture name");
            Ok(Some(Contact::with_id(id, details.clone(), Some(picture))))
        });

    let res = call(
        MockContactsCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/v1/contacts/9"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["picture"], "f00d.jpg");
    assert_eq!(body["emailAddress"], "grace@example.org");
}

#[rstest]
#[actix_web::test]
async fn get_unknown_contact_is_not_found() {
    let mut query = MockContactsQuery::new();
    query.expect_get_contact().returning(|_| Ok(None));

    let res = call(
        MockContactsCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/api/v1/contacts/404"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.code(), ErrorCode::NotFound);
    assert_eq!(body.message(), "Contact not found");
}

#[rstest]
#[case("abc")]
#[case("0")]
#[actix_web::test]
async fn get_rejects_invalid_ids(#[case] id: &str) {
    let res = call(
        MockContactsCommand::new(),
        MockContactsQuery::new(),
        actix_test::TestRequest::get().uri(&format!("/api/v1/contacts/{id}")),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_message() {
    let mut command = MockContactsCommand::new();
    command
        .expect_create_contact()
        .withf(|details, picture| details.first_name() == "Grace" && picture.is_none())
        .times(1)
        .returning(|_, _| Ok(Completed::created("Contact created successfully".to_owned())));

    let res = call(
        command,
        MockContactsQuery::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/contacts")
            .set_json(request_body()),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Contact created successfully");
}

#[rstest]
#[actix_web::test]
async fn create_passes_decoded_picture() {
    let mut command = MockContactsCommand::new();
    command
        .expect_create_contact()
        .withf(|_, picture| {
            picture
                .as_ref()
                .is_some_and(|upload| upload.extension() == "jpg" && upload.bytes() == b"hello")
        })
        .times(1)
        .returning(|_, _| Ok(Completed::created("Contact created successfully".to_owned())));
    let mut body = request_body();
    body["picture"] = json!({ "extension": "JPG", "data": "aGVsbG8=" });

    let res = call(
        command,
        MockContactsQuery::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/contacts")
            .set_json(body),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn create_surfaces_forbidden_outcome() {
    let mut command = MockContactsCommand::new();
    command.expect_create_contact().returning(|_, _| {
        Err(Error::forbidden(
            "Invalid type, supported types are : jpg, jpeg, png",
        ))
    });
    let mut body = request_body();
    body["picture"] = json!({ "extension": "gif", "data": "aGVsbG8=" });

    let res = call(
        command,
        MockContactsQuery::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/contacts")
            .set_json(body),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(
        body.message(),
        "Invalid type, supported types are : jpg, jpeg, png"
    );
}

#[rstest]
#[actix_web::test]
async fn create_rejects_missing_fields_before_the_service() {
    let mut body = request_body();
    body["lastName"] = Value::Null;

    let res = call(
        MockContactsCommand::new(),
        MockContactsQuery::new(),
        actix_test::TestRequest::post()
            .uri("/api/v1/contacts")
            .set_json(body),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "lastName");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[rstest]
#[actix_web::test]
async fn update_targets_path_id() {
    let mut command = MockContactsCommand::new();
    command
        .expect_update_contact()
        .withf(|id, _, picture| *id == ContactId::new(12) && picture.is_none())
        .times(1)
        .returning(|_, _, _| Ok(Completed::created("Success".to_owned())));

    let res = call(
        command,
        MockContactsQuery::new(),
        actix_test::TestRequest::put()
            .uri("/api/v1/contacts/12")
            .set_json(request_body()),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["message"], "Success");
}

#[rstest]
#[actix_web::test]
async fn delete_returns_ok_message() {
    let mut command = MockContactsCommand::new();
    command
        .expect_delete_contact()
        .with(eq(ContactId::new(4)))
        .times(1)
        .returning(|_| Ok(Completed::ok("Contact deleted successfully".to_owned())));

    let res = call(
        command,
        MockContactsQuery::new(),
        actix_test::TestRequest::delete().uri("/api/v1/contacts/4"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn delete_surfaces_picture_removal_failure() {
    let mut command = MockContactsCommand::new();
    command
        .expect_delete_contact()
        .returning(|_| Err(Error::internal("No such file or directory (os error 2)")));

    let res = call(
        command,
        MockContactsQuery::new(),
        actix_test::TestRequest::delete().uri("/api/v1/contacts/4"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Error = actix_test::read_body_json(res).await;
    assert_eq!(body.message(), "No such file or directory (os error 2)");
}

#[rstest]
#[actix_web::test]
async fn delete_picture_without_picture_is_forbidden() {
    let mut command = MockContactsCommand::new();
    command
        .expect_delete_contact_picture()
        .with(eq(ContactId::new(4)))
        .times(1)
        .returning(|_| Err(Error::forbidden("Picture not found")));

    let res = call(
        command,
        MockContactsQuery::new(),
        actix_test::TestRequest::delete().uri("/api/v1/contacts/4/picture"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
