//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns a domain `InvalidRequest` error whose details name
//! the offending field and a stable machine-readable code.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use pagination::{PageRequest, PaginationError};
use serde_json::json;

use crate::domain::{ContactId, ContactValidationError, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidField,
    InvalidDate,
    InvalidBase64,
    InvalidId,
    InvalidPage,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidField => "invalid_field",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidBase64 => "invalid_base64",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidPage => "invalid_page",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

pub(crate) fn require(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn contact_validation_error(err: &ContactValidationError) -> Error {
    let field = err.field().as_str();
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": ErrorCode::InvalidField.as_str(),
    }))
}

pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                let name = field.as_str();
                field_value_error(
                    field,
                    ErrorCode::InvalidDate,
                    format!("{name} must be a YYYY-MM-DD date"),
                    raw,
                )
            }),
    }
}

pub(crate) fn decode_base64(value: &str, field: FieldName) -> Result<Vec<u8>, Error> {
    STANDARD.decode(value.trim()).map_err(|_| {
        let name = field.as_str();
        field_error(
            field,
            ErrorCode::InvalidBase64,
            format!("{name} must be standard base64"),
        )
    })
}

pub(crate) fn parse_contact_id(value: &str) -> Result<ContactId, Error> {
    value
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .map(ContactId::new)
        .ok_or_else(|| {
            field_value_error(
                FieldName::new("id"),
                ErrorCode::InvalidId,
                "id must be a positive integer".to_owned(),
                value,
            )
        })
}

pub(crate) fn parse_page_request(page: u32, page_size: u32) -> Result<PageRequest, Error> {
    PageRequest::new(page, page_size).map_err(|err| {
        let field = match err {
            PaginationError::PageOutOfRange => FieldName::new("page"),
            PaginationError::PageSizeOutOfRange { .. } => FieldName::new("pageSize"),
        };
        field_error(field, ErrorCode::InvalidPage, err.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactField, ErrorCode as DomainCode};
    use rstest::rstest;
    use serde_json::Value;

    fn detail(err: &Error, key: &str) -> Value {
        err.details()
            .and_then(|details| details.get(key))
            .cloned()
            .unwrap_or(Value::Null)
    }

    #[rstest]
    fn missing_field_names_the_field() {
        let err = require(None, FieldName::new("firstName")).expect_err("missing");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), "firstName");
        assert_eq!(detail(&err, "code"), "missing_field");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("1990-02-28"), NaiveDate::from_ymd_opt(1990, 2, 28))]
    fn optional_dates_parse(#[case] raw: Option<&str>, #[case] expected: Option<NaiveDate>) {
        let parsed = parse_optional_date(raw.map(str::to_owned), FieldName::new("dateOfBirth"))
            .expect("valid date");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case("28/02/1990")]
    #[case("1990-02-30")]
    fn invalid_dates_are_rejected(#[case] raw: &str) {
        let err = parse_optional_date(Some(raw.to_owned()), FieldName::new("dateOfBirth"))
            .expect_err("invalid date");
        assert_eq!(detail(&err, "code"), "invalid_date");
        assert_eq!(detail(&err, "value"), raw);
    }

    #[rstest]
    fn base64_is_decoded() {
        let bytes = decode_base64("aGVsbG8=", FieldName::new("picture.data")).expect("decode");
        assert_eq!(bytes, b"hello");
        let err = decode_base64("***", FieldName::new("picture.data")).expect_err("invalid");
        assert_eq!(detail(&err, "code"), "invalid_base64");
    }

    #[rstest]
    #[case("0")]
    #[case("-4")]
    #[case("abc")]
    fn contact_ids_must_be_positive_integers(#[case] raw: &str) {
        let err = parse_contact_id(raw).expect_err("invalid id");
        assert_eq!(detail(&err, "code"), "invalid_id");
    }

    #[rstest]
    #[case(0, 10, "page")]
    #[case(1, 0, "pageSize")]
    #[case(1, 101, "pageSize")]
    fn page_bounds_are_checked(#[case] page: u32, #[case] size: u32, #[case] field: &str) {
        let err = parse_page_request(page, size).expect_err("out of range");
        assert_eq!(detail(&err, "field"), field);
    }

    #[rstest]
    fn contact_validation_maps_to_field() {
        let err = contact_validation_error(&ContactValidationError::InvalidEmail);
        assert_eq!(detail(&err, "field"), ContactField::EmailAddress.as_str());
        assert_eq!(detail(&err, "code"), "invalid_field");
    }
}
