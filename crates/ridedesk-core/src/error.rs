//! Error types for the ridedesk admin console

use thiserror::Error;

/// Main error type for ridedesk
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The admin service could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// The admin service answered with a non-success status
    #[error("Admin service returned {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Not found error
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operator identity missing from the session store
    #[error("Operator identity missing: {key}")]
    MissingOperator {
        /// Session key that had no value
        key: String,
    },

    /// An action required a selected request but none was selected
    #[error("No request selected")]
    NoSelection,

    /// An action was submitted while the console was in the wrong mode
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the failure came from the network rather than the server's answer
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map_or_else(|| "invalid value".to_string(), ToString::to_string);
                Self::Validation {
                    field: field.to_string(),
                    message,
                }
            }
            None => Self::Validation {
                field: "unknown".to_string(),
                message: errors.to_string(),
            },
        }
    }
}
