//! Uniform result of a contact or picture operation.
//!
//! Successful operations report how they succeeded ([`SuccessStatus`]) next
//! to their payload; failures are a domain [`Error`]. Inbound adapters map
//! the status onto a transport code, so the service never names HTTP
//! statuses directly.

use crate::domain::Error;

/// How an operation succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuccessStatus {
    /// A record or file was written.
    Created,
    /// The operation completed without creating anything new.
    Ok,
}

/// Successful operation payload paired with its status.
///
/// # Examples
/// ```
/// use address_book::domain::{Completed, SuccessStatus};
///
/// let done = Completed::created("Contact created successfully");
/// assert_eq!(done.status(), SuccessStatus::Created);
/// assert_eq!(*done.payload(), "Contact created successfully");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed<T> {
    status: SuccessStatus,
    payload: T,
}

impl<T> Completed<T> {
    /// Successful outcome that created something.
    pub fn created(payload: T) -> Self {
        Self {
            status: SuccessStatus::Created,
            payload,
        }
    }

    /// Successful outcome that created nothing new.
    pub fn ok(payload: T) -> Self {
        Self {
            status: SuccessStatus::Ok,
            payload,
        }
    }

    pub fn status(&self) -> SuccessStatus {
        self.status
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Transform the payload while keeping the status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Completed<U> {
        Completed {
            status: self.status,
            payload: f(self.payload),
        }
    }
}

/// Operation result returned by the contact service and picture store.
pub type Outcome<T> = Result<Completed<T>, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keeps_status() {
        let done = Completed::ok(2_u8).map(|value| value * 3);
        assert_eq!(done.status(), SuccessStatus::Ok);
        assert_eq!(done.into_payload(), 6);
    }
}
