//! Internal Diesel row structs for the `contacts` table.
//!
//! These types never leave the persistence layer; the repository converts
//! them to and from domain [`Contact`](crate::domain::Contact)s.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::contacts;

/// Row struct for reading from the contacts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub country: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email_address: String,
    pub picture: Option<String>,
}

/// Column values written on insert and update.
///
/// `treat_none_as_null` makes an update with `picture: None` clear the
/// column instead of leaving it untouched.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactValues<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub street: &'a str,
    pub zip: &'a str,
    pub city: &'a str,
    pub country: &'a str,
    pub phone_number: &'a str,
    pub date_of_birth: Option<NaiveDate>,
    pub email_address: &'a str,
    pub picture: Option<&'a str>,
}
