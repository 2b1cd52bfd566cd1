//! Error types and handling
//!
//! This module provides the error type used throughout the organizer.
//! All errors implement the `OrganizerErrorExt` trait which provides
//! operator-facing hints and indicates whether the run can continue.
//!
//! # Security
//!
//! Error messages never carry the API key. Transport errors coming out of the
//! HTTP client are scrubbed by the engine before they are wrapped here.

use std::path::PathBuf;
use thiserror::Error;

/// Trait for organizer error extensions
///
/// Provides an operator-facing hint and recoverability information.
pub trait OrganizerErrorExt {
    /// Returns a short hint describing how to fix the error
    fn user_hint(&self) -> String;

    /// Returns whether the pipeline can keep going after this error
    ///
    /// Non-recoverable errors are fatal preconditions: the process exits
    /// before any report is written.
    fn is_recoverable(&self) -> bool;
}

/// Main engine error type
///
/// # Error Categories
///
/// - **Configuration**: invalid config file or overrides
/// - **Inventory**: the scanned projects file is missing or unreadable
/// - **Credentials**: the API key variable is unset
/// - **Classifier**: a remote batch call failed (always degraded, never fatal)
/// - **Report**: an output file could not be rendered or written
///
/// # Examples
///
/// ```
/// use organizer_sdk::errors::{EngineError, OrganizerErrorExt};
///
/// let error = EngineError::MissingApiKey("GEMINI_API_KEY".to_string());
/// assert!(!error.is_recoverable());
/// assert!(error.user_hint().contains("makersuite"));
///
/// let batch_error = EngineError::Classifier("timed out".to_string());
/// assert!(batch_error.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Inventory errors
    #[error("Project data file not found: {0:?}")]
    ProjectsFileMissing(PathBuf),

    #[error("Project data file {0:?} could not be parsed: {1}")]
    ProjectsFileInvalid(PathBuf, String),

    // Credential errors
    #[error("{0} environment variable not set")]
    MissingApiKey(String),

    // Classifier errors
    #[error("Classifier error: {0}")]
    Classifier(String),

    // Report errors
    #[error("Report error: {0}")]
    Report(String),

    // Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrganizerErrorExt for EngineError {
    fn user_hint(&self) -> String {
        let hint = match self {
            Self::Config(_) => "Check your organizer.toml file and command-line overrides",
            Self::ProjectsFileMissing(_) => "Run the project scanner first to scan projects",
            Self::ProjectsFileInvalid(_, _) => {
                "Re-run the project scanner; the inventory must be a JSON array of projects"
            }
            Self::MissingApiKey(var) => {
                return format!(
                    "Get your API key from https://makersuite.google.com/app/apikey, \
                     then export it, e.g. export {}='your-key-here'",
                    var
                );
            }
            Self::Classifier(_) => "The batch falls back to local classifications",
            Self::Report(_) => "Check that the data directory is writable",
            Self::Io(_) => "File system operation failed",
        };
        hint.to_string()
    }

    fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(_)
            | Self::ProjectsFileMissing(_)
            | Self::ProjectsFileInvalid(_, _)
            | Self::MissingApiKey(_)
            | Self::Report(_) => false,

            Self::Classifier(_) | Self::Io(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_preconditions_are_not_recoverable() {
        assert!(!EngineError::ProjectsFileMissing(PathBuf::from("/tmp/x.json")).is_recoverable());
        assert!(!EngineError::MissingApiKey("GEMINI_API_KEY".into()).is_recoverable());
        assert!(!EngineError::Config("bad".into()).is_recoverable());
    }

    #[test]
    fn test_missing_api_key_message_names_variable() {
        let err = EngineError::MissingApiKey("MY_KEY".into());
        assert_eq!(err.to_string(), "MY_KEY environment variable not set");
    }

    #[test]
    fn test_missing_api_key_hint_uses_configured_variable() {
        let hint = EngineError::MissingApiKey("MY_KEY".into()).user_hint();
        assert!(hint.contains("export MY_KEY='your-key-here'"));
        assert!(!hint.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::Io(_)));
        assert_eq!(err.user_hint(), "File system operation failed");
    }
}
