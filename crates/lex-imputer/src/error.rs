//! Custom error types for the imputer.
//!
//! This module provides the error hierarchy using `thiserror`. Every error
//! is raised synchronously and terminates the call; no operation commits
//! partial state before failing.
//!
//! Errors are serializable so a surrounding pipeline can forward them as
//! `{ code, message }` objects.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the imputer.
#[derive(Error, Debug)]
pub enum ImputerError {
    /// Unrecognized strategy or tie-breaking policy, or an unusable
    /// combination of options.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `transform` was called before a successful `fit`.
    #[error("This imputer is not fitted yet; call `fit` before `transform`")]
    NotFitted,

    /// Nothing left to learn from once missing entries are removed.
    #[error("Data is empty or all values are null")]
    NoValidValues,

    /// Several values share the highest frequency and ties are not allowed.
    #[error("No single most frequent value: {candidates:?} each occur {count} times")]
    UnresolvedTie {
        candidates: Vec<String>,
        count: usize,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ImputerError>,
    },
}

impl ImputerError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ImputerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for callers that dispatch on error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::NotFitted => "NOT_FITTED",
            Self::NoValidValues => "NO_VALID_VALUES",
            Self::UnresolvedTie { .. } => "UNRESOLVED_TIE",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by calling `transform` too early.
    pub fn is_not_fitted(&self) -> bool {
        match self {
            Self::NotFitted => true,
            Self::WithContext { source, .. } => source.is_not_fitted(),
            _ => false,
        }
    }

    /// Check if this error comes from the training data rather than the
    /// configuration or the environment.
    pub fn is_data_error(&self) -> bool {
        match self {
            Self::NoValidValues | Self::UnresolvedTie { .. } => true,
            Self::WithContext { source, .. } => source.is_data_error(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for ImputerError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        ImputerError::InvalidConfig(err.to_string())
    }
}

impl Serialize for ImputerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ImputerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for imputer operations.
pub type Result<T> = std::result::Result<T, ImputerError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ImputerError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(ImputerError::NotFitted.error_code(), "NOT_FITTED");
        assert_eq!(
            ImputerError::InvalidConfig("median".to_string()).error_code(),
            "INVALID_CONFIG"
        );
        assert_eq!(
            ImputerError::UnresolvedTie {
                candidates: vec!["a".into(), "b".into()],
                count: 2
            }
            .error_code(),
            "UNRESOLVED_TIE"
        );
    }

    #[test]
    fn test_tie_message_lists_candidates() {
        let error = ImputerError::UnresolvedTie {
            candidates: vec!["a".into(), "b".into()],
            count: 2,
        };
        let message = error.to_string();
        assert!(message.contains("\"a\""));
        assert!(message.contains("\"b\""));
        assert!(message.contains("2 times"));
    }

    #[test]
    fn test_is_data_error() {
        assert!(ImputerError::NoValidValues.is_data_error());
        assert!(!ImputerError::NotFitted.is_data_error());
        assert!(!ImputerError::InvalidConfig("x".into()).is_data_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = ImputerError::NoValidValues;
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("NO_VALID_VALUES"));
        assert!(json.contains("all values are null"));
    }

    #[test]
    fn test_with_context() {
        let error = ImputerError::NotFitted.with_context("Imputing column 'color'");
        assert!(error.to_string().contains("Imputing column 'color'"));
        assert_eq!(error.error_code(), "NOT_FITTED");
        assert!(error.is_not_fitted());
    }
}
