//! Invoice action errors and the state rendered back to the form.

use serde::Serialize;
use thiserror::Error;

use invoicer_shared::AppError;

use super::form::FieldErrors;

/// Result of an invoice action.
pub type ActionResult = Result<super::actions::Redirect, ActionError>;

/// Invoice action failures.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The submitted form did not validate.
    #[error("{message}")]
    Validation {
        /// Summary shown above the form.
        message: &'static str,
        /// Per-field messages.
        errors: FieldErrors,
    },

    /// The store rejected the write.
    #[error("{message}")]
    Database {
        /// User-facing message.
        message: &'static str,
        /// Underlying fault.
        #[source]
        source: AppError,
    },

    /// Deleting invoices is switched off; the store is never called.
    #[error("Failed to Delete Invoice")]
    DeleteDisabled,
}

impl ActionError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 422,
            Self::Database { .. } | Self::DeleteDisabled => 500,
        }
    }

    /// Returns the state handed back to the caller for inline rendering.
    #[must_use]
    pub fn state(&self) -> ActionState {
        let errors = match self {
            Self::Validation { errors, .. } => errors.clone(),
            Self::Database { .. } | Self::DeleteDisabled => FieldErrors::default(),
        };

        ActionState {
            message: self.to_string(),
            errors,
        }
    }
}

/// Serializable `{ message, errors }` shape shown next to a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionState {
    /// Summary message.
    pub message: String,
    /// Per-field messages; omitted when empty.
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}
