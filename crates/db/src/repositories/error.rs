//! The data access layer's failure type.

use sea_orm::DbErr;
use thiserror::Error;
use tracing::error;

use invoicer_shared::AppError;

/// A query fault, labelled with the operation that failed.
///
/// `Display` is the operation-specific message, e.g. `Failed to fetch revenue data.`
#[derive(Debug, Error)]
#[error("{operation}")]
pub struct DatabaseError {
    /// Operation-specific message.
    pub operation: &'static str,
    /// Underlying driver error.
    #[source]
    pub source: DbErr,
}

impl DatabaseError {
    /// Returns a mapper that logs `source` and wraps it with `operation`.
    pub(crate) fn wrap(operation: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| {
            error!(error = %source, operation, "Database Error");
            Self { operation, source }
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(e: DatabaseError) -> Self {
        Self::Database(e.operation.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_operation_message() {
        let error = DatabaseError::wrap("Failed to fetch revenue data.")(DbErr::Custom(
            "connection refused".into(),
        ));

        assert_eq!(error.to_string(), "Failed to fetch revenue data.");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_into_app_error() {
        let error = DatabaseError::wrap("Failed to fetch user.")(DbErr::Custom("boom".into()));
        let app: AppError = error.into();

        assert_eq!(app.status_code(), 500);
        assert_eq!(app.message(), "Failed to fetch user.");
        assert_eq!(app.to_string(), "Database error: Failed to fetch user.");
    }
}
