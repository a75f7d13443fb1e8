//! Centralized error types for the WeatherHub application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Auth(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
        }
    }
}

/// Authentication errors raised by the remote auth endpoints.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the stored credential (HTTP 401).
    #[error("Session expired or invalid")]
    SessionInvalidated,

    #[error("Not signed in")]
    NotSignedIn,
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::SessionInvalidated => "Your session has expired. Please sign in again.",
            AuthError::NotSignedIn => "Please sign in to access weather data",
        }
    }
}

/// Local session storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Session store corrupted: {0}")]
    Corrupted(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Unavailable(_) => "Unable to access saved session. Please try again.",
            StorageError::Corrupted(_) => "Saved session is unreadable. Please sign in again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_non_empty() {
        let errors: Vec<AppError> = vec![
            StorageError::Corrupted("test".into()).into(),
            AuthError::SessionInvalidated.into(),
            StorageError::Unavailable("test".into()).into(),
            AuthError::NotSignedIn.into(),
        ];

        for err in errors {
            assert!(!err.user_message().is_empty(), "empty message for {err:?}");
        }
    }

    #[test]
    fn test_app_error_conversion() {
        let auth_err = AuthError::SessionInvalidated;
        let app_err: AppError = auth_err.into();
        assert!(matches!(app_err, AppError::Auth(AuthError::SessionInvalidated)));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Auth(AuthError::SessionInvalidated);
        assert_eq!(
            app_err.user_message(),
            "Your session has expired. Please sign in again."
        );
    }
}
