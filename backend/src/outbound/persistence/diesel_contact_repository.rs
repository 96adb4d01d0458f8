//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.
//!
//! Search builds one boxed query: every present clause of the filter adds an
//! `AND`ed group of `ILIKE` matches, and absent clauses add nothing, so an
//! empty filter selects the whole table.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{
    Contact, ContactDetails, ContactDraft, ContactId, PictureName, SearchField, SearchFilter,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ContactRow, ContactValues};
use super::pool::DbPool;
use super::schema::contacts;

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Wrap `fragment` in `%` wildcards, escaping LIKE metacharacters so the
/// fragment itself matches literally.
fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Build the filtered, id-ordered contact query for `filter`.
pub(crate) fn search_query(filter: &SearchFilter) -> contacts::BoxedQuery<'static, Pg> {
    let mut query = contacts::table.order(contacts::id.asc()).into_boxed();

    for clause in filter.clauses() {
        let pattern = like_pattern(&clause.fragment);
        query = match clause.field {
            SearchField::Name => query.filter(
                contacts::first_name
                    .ilike(pattern.clone())
                    .or(contacts::last_name.ilike(pattern)),
            ),
            SearchField::Email => query.filter(contacts::email_address.ilike(pattern)),
            SearchField::Address => query.filter(
                contacts::street
                    .ilike(pattern.clone())
                    .or(contacts::zip.ilike(pattern.clone()))
                    .or(contacts::city.ilike(pattern.clone()))
                    .or(contacts::country.ilike(pattern)),
            ),
        };
    }

    query
}

fn contact_values(contact: &Contact) -> ContactValues<'_> {
    let details = contact.details();
    ContactValues {
        first_name: details.first_name(),
        last_name: details.last_name(),
        street: details.street(),
        zip: details.zip(),
        city: details.city(),
        country: details.country(),
        phone_number: details.phone_number(),
        date_of_birth: details.date_of_birth(),
        email_address: details.email_address(),
        picture: contact.picture().map(PictureName::as_str),
    }
}

/// Convert a database row into a domain contact.
///
/// Rows are written only through validated domain values, so a row that
/// fails validation means the table was edited externally.
fn row_to_contact(row: ContactRow) -> Result<Contact, ContactRepositoryError> {
    let id = row.id;
    let details = ContactDetails::try_from(ContactDraft {
        first_name: row.first_name,
        last_name: row.last_name,
        street: row.street,
        zip: row.zip,
        city: row.city,
        country: row.country,
        phone_number: row.phone_number,
        date_of_birth: row.date_of_birth,
        email_address: row.email_address,
    })
    .map_err(|err| ContactRepositoryError::query(format!("contact {id} is invalid: {err}")))?;
    let picture = row
        .picture
        .map(PictureName::new)
        .transpose()
        .map_err(|err| ContactRepositoryError::query(format!("contact {id} picture: {err}")))?;

    Ok(Contact::with_id(ContactId::new(id), details, picture))
}

fn rows_to_contacts(rows: Vec<ContactRow>) -> Result<Vec<Contact>, ContactRepositoryError> {
    rows.into_iter().map(row_to_contact).collect()
}

fn to_sql_bound(value: u64) -> Result<i64, ContactRepositoryError> {
    i64::try_from(value)
        .map_err(|_| ContactRepositoryError::query("page bound exceeds database range"))
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn create(&self, contact: &Contact) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(&contact_values(contact))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(id = row.id, "contact inserted");
        row_to_contact(row)
    }

    async fn create_or_update(&self, contact: &Contact) -> Result<Contact, ContactRepositoryError> {
        let Some(id) = contact.id() else {
            return self.create(contact).await;
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ContactRow> = diesel::update(contacts::table.find(id.get()))
            .set(&contact_values(contact))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_contact(row),
            None => Err(ContactRepositoryError::query(format!(
                "contact {id} not found for update"
            ))),
        }
    }

    async fn delete(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let Some(id) = contact.id() else {
            return Err(ContactRepositoryError::query(
                "cannot delete a contact that was never stored",
            ));
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(contacts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(ContactRepositoryError::query(format!(
                "contact {id} not found for delete"
            )));
        }
        Ok(())
    }

    async fn find(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .find(id.get())
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_contact).transpose()
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = search_query(filter)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_contacts(rows)
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = contacts::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .order(contacts::id.asc())
            .limit(to_sql_bound(request.limit())?)
            .offset(to_sql_bound(request.offset())?)
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::new(rows_to_contacts(rows)?, request, total))
    }
}
