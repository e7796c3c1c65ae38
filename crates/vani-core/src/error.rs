//! Catalog errors
//!
//! Store, validation and lookup failures all end up as an [`AppError`]. How each one is
//! shown to API clients (status, code, retry hint, log level) lives next to it in
//! [`Presentation`], exposed through the [`ErrorMetadata`] trait.
//!
//! `AppError::Database` wraps `sqlx::Error` only when the `sqlx` feature is on.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Source-chain depth rendered by [`AppError::detailed_message`].
const MAX_CAUSE_DEPTH: usize = 5;

/// Level an error is logged at when it reaches the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Caller mistakes: bad ids, bad payloads, unknown documents
    Debug,
    Warn,
    /// Failures on our side
    Error,
}

/// How an error is presented to API clients.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable upper-case code clients can branch on, e.g. `NOT_FOUND`
    fn error_code(&self) -> &'static str;

    /// True when repeating the same request may succeed
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to return in the `error` field
    fn client_message(&self) -> String;

    /// True when the internal text must not leave the service in production
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Document store error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Document store error: {0}")]
    Database(String),

    /// Payload or query parameters failed to parse or validate
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Well-formed request that cannot be served as asked, e.g. a malformed document id
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("Malformed JSON: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::BadRequest(format!("Invalid ID: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation failed: {}", err))
    }
}

/// Client-facing treatment of one error kind.
#[derive(Debug, Clone, Copy)]
struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    log_level: LogLevel,
}

const STORE_FAILURE: Presentation = Presentation {
    status: 500,
    code: "DATABASE_ERROR",
    recoverable: true,
    action: Some("The catalog store is unavailable; try again shortly"),
    sensitive: true,
    log_level: LogLevel::Error,
};

const INVALID_INPUT: Presentation = Presentation {
    status: 400,
    code: "INVALID_INPUT",
    recoverable: false,
    action: Some("Fix the listed fields or query parameters and resend"),
    sensitive: false,
    log_level: LogLevel::Debug,
};

const BAD_REQUEST: Presentation = Presentation {
    status: 400,
    code: "BAD_REQUEST",
    recoverable: false,
    action: Some("Use an id returned by a create or list call"),
    sensitive: false,
    log_level: LogLevel::Debug,
};

const NOT_FOUND: Presentation = Presentation {
    status: 404,
    code: "NOT_FOUND",
    recoverable: false,
    action: Some("List the collection to find an existing id"),
    sensitive: false,
    log_level: LogLevel::Debug,
};

const INTERNAL: Presentation = Presentation {
    status: 500,
    code: "INTERNAL_ERROR",
    recoverable: true,
    action: Some("Try again shortly"),
    sensitive: true,
    log_level: LogLevel::Error,
};

impl AppError {
    fn presentation(&self) -> Presentation {
        match self {
            AppError::Database(_) => STORE_FAILURE,
            AppError::InvalidInput(_) => INVALID_INPUT,
            AppError::BadRequest(_) => BAD_REQUEST,
            AppError::NotFound(_) => NOT_FOUND,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => INTERNAL,
        }
    }

    /// Variant name, returned as `error_type` when details are shown
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// The error text followed by one `Caused by:` line per source.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let causes = std::iter::successors(self.source(), |&err| err.source());
        for (depth, cause) in causes.enumerate() {
            if depth == MAX_CAUSE_DEPTH {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", cause));
        }
        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().action
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().log_level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::InvalidInput(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_is_hidden_and_retryable() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to access database");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_missing_document_is_404() {
        let err = AppError::NotFound("Not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_malformed_uuid_is_bad_request() {
        let err: AppError = uuid::Uuid::parse_str("not-a-uuid").unwrap_err().into();
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "BAD_REQUEST");
        assert!(err.client_message().starts_with("Invalid ID"));
    }

    #[test]
    fn test_validation_errors_are_invalid_input() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("title", validator::ValidationError::new("nul_character"));
        let err = AppError::from(errors);
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.client_message().contains("title"));
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("connection refused").context("Failed to list"));
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error: Failed to list"));
        assert!(details.contains("Caused by:"));
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_every_client_error_suggests_an_action() {
        for err in [
            AppError::InvalidInput("x".to_string()),
            AppError::BadRequest("x".to_string()),
            AppError::NotFound("x".to_string()),
        ] {
            assert!(err.suggested_action().is_some());
            assert!(!err.is_recoverable());
        }
    }
}
