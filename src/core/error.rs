//! Typed error handling for content-admin
//!
//! Every failure is scoped to one page or one operation and is recoverable by
//! retrying the user action. Front ends show [`AdminError::operator_message`]
//! verbatim.
//!
//! # Error Categories
//!
//! - Credentials: [`AdminError::MissingCredential`], [`AdminError::Forbidden`]
//! - Transport: [`AdminError::Http`], [`AdminError::Network`], [`AdminError::Decode`]
//! - Local input: [`AdminError::Validation`], [`AdminError::InvalidSortKey`]
//! - Programming/configuration: [`AdminError::Config`], [`AdminError::Unsupported`]
//!
//! # Example
//!
//! ```rust,ignore
//! match page.load().await {
//!     Ok(()) => render(page.view()),
//!     Err(e) if e.requires_login() => redirect_to_login(),
//!     Err(e) => show_inline(e.operator_message()),
//! }
//! ```

use reqwest::StatusCode;

pub type Result<T, E = AdminError> = std::result::Result<T, E>;

/// The main error type for content-admin
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// No token is stored in the session
    #[error("No authentication token found")]
    MissingCredential,

    /// The backend answered 403; the session has been cleared
    #[error("Session expired or access denied, please log in again")]
    Forbidden,

    /// Any other non-success status
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// A response body did not match the expected record shape
    #[error("Failed to decode {entity} response: {message}")]
    Decode { entity: &'static str, message: String },

    /// A form payload was rejected before sending
    #[error("Invalid form: {0}")]
    Validation(String),

    /// A sort key string is not one of the entity's keys
    #[error("Unknown sort key '{key}' for {entity}")]
    InvalidSortKey { entity: &'static str, key: String },

    /// The backend returned two records with the same identifier
    #[error("Duplicate {entity} id '{id}' in backend response")]
    DuplicateId { entity: &'static str, id: String },

    /// The entity does not support this operation (e.g. deleting a user)
    #[error("Cannot {operation} {entity}")]
    Unsupported {
        entity: &'static str,
        operation: &'static str,
    },

    /// A submission is already in flight on this page
    #[error("Another request is already in progress")]
    Busy,

    /// Invalid configuration (bad base URL, inconsistent sort-key table, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local file access (token file, upload file)
    #[error("I/O error: {0}")]
    Io(String),
}

impl AdminError {
    /// Message shown to the operator as-is
    pub fn operator_message(&self) -> String {
        self.to_string()
    }

    /// Whether the front end should send the operator back to the login boundary
    pub fn requires_login(&self) -> bool {
        matches!(self, AdminError::MissingCredential | AdminError::Forbidden)
    }

    /// HTTP status attached to the error, if the backend answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AdminError::Http { status, .. } => Some(*status),
            AdminError::Forbidden => Some(StatusCode::FORBIDDEN),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        AdminError::Network(err.to_string())
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        AdminError::Io(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AdminError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AdminError::Validation(crate::core::validation::describe(&errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_shows_backend_message_verbatim() {
        let err = AdminError::Http {
            status: StatusCode::BAD_REQUEST,
            message: "Story number already exists".to_string(),
        };
        assert_eq!(err.operator_message(), "Story number already exists");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(!err.requires_login());
    }

    #[test]
    fn test_credential_errors_require_login() {
        assert!(AdminError::MissingCredential.requires_login());
        assert!(AdminError::Forbidden.requires_login());
        assert_eq!(AdminError::Forbidden.status(), Some(StatusCode::FORBIDDEN));
        assert!(!AdminError::Busy.requires_login());
    }

    #[test]
    fn test_invalid_sort_key_message() {
        let err = AdminError::InvalidSortKey {
            entity: "episode",
            key: "colour-asc".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown sort key 'colour-asc' for episode");
    }

    #[test]
    fn test_unsupported_message() {
        let err = AdminError::Unsupported {
            entity: "user",
            operation: "delete",
        };
        assert_eq!(err.to_string(), "Cannot delete user");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AdminError = io.into();
        assert!(matches!(err, AdminError::Io(_)));
    }
}
