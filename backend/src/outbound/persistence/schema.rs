//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Address-book entries.
    ///
    /// Text columns are `VARCHAR(255)`; `picture` holds the stored file name
    /// of the contact's picture, if any.
    contacts (id) {
        id -> Int4,
        first_name -> Varchar,
        last_name -> Varchar,
        street -> Varchar,
        zip -> Varchar,
        city -> Varchar,
        country -> Varchar,
        phone_number -> Varchar,
        date_of_birth -> Nullable<Date>,
        email_address -> Varchar,
        picture -> Nullable<Varchar>,
    }
}
