//! Diesel and pool error mapping for the contact repository.
//!
//! Database diagnostics are logged at `debug` and reduced to a short message
//! so SQL details never reach API callers.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ContactRepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    debug!(%message, "contact repository pool failure");
    ContactRepositoryError::connection(message)
}

pub(crate) fn map_diesel_error(error: DieselError) -> ContactRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %error,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ContactRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => ContactRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ContactRepositoryError::query("duplicate contact")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _)
        | DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, _) => {
            ContactRepositoryError::query("contact violates column constraints")
        }
        _ => ContactRepositoryError::query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_maps_to_query_error() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound),
            ContactRepositoryError::query("record not found")
        );
    }

    #[rstest]
    #[case(PoolError::checkout("timed out"))]
    #[case(PoolError::build("refused"))]
    fn pool_errors_map_to_connection(#[case] error: PoolError) {
        assert!(matches!(
            map_pool_error(error),
            ContactRepositoryError::Connection { .. }
        ));
    }
}
