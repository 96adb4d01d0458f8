//! In-process contact storage.
//!
//! Used when no database is configured and by integration tests. Matching
//! follows the Diesel adapter: case-insensitive substring clauses, AND across
//! clauses, OR across the columns of one clause, results ordered by id.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactId, SearchClause, SearchField, SearchFilter};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<ContactId, Contact>,
    last_id: i32,
}

/// Mutex-guarded map of contacts keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    table: Mutex<Table>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, ContactRepositoryError> {
        self.table
            .lock()
            .map_err(|_| ContactRepositoryError::connection("contact table lock poisoned"))
    }
}

fn contains(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_clause(contact: &Contact, clause: &SearchClause) -> bool {
    let needle = clause.fragment.to_lowercase();
    let details = contact.details();
    match clause.field {
        SearchField::Name => {
            contains(details.first_name(), &needle) || contains(details.last_name(), &needle)
        }
        SearchField::Email => contains(details.email_address(), &needle),
        SearchField::Address => [
            details.street(),
            details.zip(),
            details.city(),
            details.country(),
        ]
        .into_iter()
        .any(|column| contains(column, &needle)),
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, contact: &Contact) -> Result<Contact, ContactRepositoryError> {
        let mut table = self.lock()?;
        let next = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| ContactRepositoryError::query("contact id sequence exhausted"))?;
        table.last_id = next;

        let id = ContactId::new(next);
        let stored = Contact::with_id(
            id,
            contact.details().clone(),
            contact.picture().cloned(),
        );
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn create_or_update(&self, contact: &Contact) -> Result<Contact, ContactRepositoryError> {
        let Some(id) = contact.id() else {
            return self.create(contact).await;
        };

        let mut table = self.lock()?;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = contact.clone();
                Ok(contact.clone())
            }
            None => Err(ContactRepositoryError::query(format!(
                "contact {id} not found for update"
            ))),
        }
    }

    async fn delete(&self, contact: &Contact) -> Result<(), ContactRepositoryError> {
        let id = contact.id().ok_or_else(|| {
            ContactRepositoryError::query("cannot delete a contact that was never stored")
        })?;

        let mut table = self.lock()?;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ContactRepositoryError::query(format!("contact {id} not found for delete")))
    }

    async fn find(&self, id: ContactId) -> Result<Option<Contact>, ContactRepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn search(&self, filter: &SearchFilter) -> Result<Vec<Contact>, ContactRepositoryError> {
        let clauses = filter.clauses();
        let table = self.lock()?;
        Ok(table
            .rows
            .values()
            .filter(|contact| clauses.iter().all(|clause| matches_clause(contact, clause)))
            .cloned()
            .collect())
    }

    async fn list(&self, request: PageRequest) -> Result<Page<Contact>, ContactRepositoryError> {
        let table = self.lock()?;
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = table
            .rows
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        let total = u64::try_from(table.rows.len()).unwrap_or(u64::MAX);
        Ok(Page::new(items, request, total))
    }
}
