//! Domain errors

use thiserror::Error;

/// Boxed underlying cause carried by a validation failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Tag for the kind of a [`DomainError`], for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Storage,
    Cancelled,
    DeadlineExceeded,
}

#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad or missing caller input, including credentials that cannot be hashed.
    #[error("Validation: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    /// Persistence failure reported by a repository adapter.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Deadline exceeded")]
    DeadlineExceeded,
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    pub fn validation_caused_by<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    pub fn user_not_found(field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity: "User",
            field,
            value: value.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded => ErrorKind::DeadlineExceeded,
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_validation_keeps_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::InvalidInput, "too long");
        let err = DomainError::validation_caused_by(cause);

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Validation: too long");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_not_found_message() {
        let err = DomainError::user_not_found("id", 7);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Not found: User with id=7");
    }
}
