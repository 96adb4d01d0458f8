//! Contact search criteria.
//!
//! A [`SearchFilter`] holds up to three optional fragments. Each present
//! fragment becomes one [`SearchClause`]; adapters AND the clauses together
//! and OR the columns inside each clause.

/// Which group of contact columns a clause matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// First or last name.
    Name,
    /// Email address.
    Email,
    /// Street, zip, city, or country.
    Address,
}

/// One case-insensitive substring match over a [`SearchField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClause {
    pub field: SearchField,
    pub fragment: String,
}

/// Optional name, email, and address fragments.
///
/// Blank fragments are treated as absent.
///
/// # Examples
/// ```
/// use address_book::domain::{SearchField, SearchFilter};
///
/// let filter = SearchFilter::new(Some("ann".into()), Some("  ".into()), None);
/// let clauses = filter.clauses();
/// assert_eq!(clauses.len(), 1);
/// assert_eq!(clauses[0].field, SearchField::Name);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    name: Option<String>,
    email: Option<String>,
    address: Option<String>,
}

fn present(fragment: Option<String>) -> Option<String> {
    fragment
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

impl SearchFilter {
    pub fn new(name: Option<String>, email: Option<String>, address: Option<String>) -> Self {
        Self {
            name: present(name),
            email: present(email),
            address: present(address),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// `true` when no fragment is present, so every contact matches.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.address.is_none()
    }

    /// Clauses for the present fragments, in name, email, address order.
    pub fn clauses(&self) -> Vec<SearchClause> {
        [
            (SearchField::Name, &self.name),
            (SearchField::Email, &self.email),
            (SearchField::Address, &self.address),
        ]
        .into_iter()
        .filter_map(|(field, fragment)| {
            fragment.as_ref().map(|fragment| SearchClause {
                field,
                fragment: fragment.clone(),
            })
        })
        .collect()
    }
}
