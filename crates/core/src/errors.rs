//! Core error types for the Taskfolio application.
//!
//! This module defines storage-agnostic error types. Transport and storage
//! errors (HTTP, database, etc.) are converted to these types by whichever
//! adapter implements the repository traits.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for task and collection operations.
///
/// The task model itself never fails; these errors are raised by services
/// when a requested mutation is invalid, and by repositories.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Repository operation failed: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Operation not allowed: {0}")]
    InvalidOperation(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage-agnostic error type for repository operations.
///
/// All details are carried as `String` so that the external collaborator can
/// map its own failures (network, SQL, ...) into this shape.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A query or request failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Internal/unexpected repository error.
    #[error("Internal repository error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl Error {
    /// Shorthand for an `InvalidInput` validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }

    /// Shorthand for a `MissingField` validation error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Error::Validation(ValidationError::MissingField(field.into()))
    }
}

// === From implementations for common error types ===

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_wraps_into_root() {
        let err: Error = RepositoryError::NotFound("task-1".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Repository operation failed: Record not found: task-1"
        );
    }

    #[test]
    fn test_datetime_parse_error_is_validation() {
        let parse_err = chrono::NaiveDate::parse_from_str("soon", "%Y-%m-%d").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DateTimeParse(_))
        ));
    }

    #[test]
    fn test_error_into_string() {
        let message: String = Error::missing_field("title").into();
        assert_eq!(
            message,
            "Input validation failed: Required field 'title' is missing"
        );
    }
}
