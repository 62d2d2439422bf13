//! Unified error types for chatstats.
//!
//! This module provides a single [`ChatstatsError`] enum that covers all error
//! cases in the library, from reading an export to writing result tables.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get messages that name the offending record and field
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::message::NormalizedMessage;
///
/// fn my_function() -> Result<Vec<NormalizedMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file or folder doesn't exist
    /// - Permission denied
    /// - The output folder cannot be created
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse the input file.
    ///
    /// Contains the format being parsed, the underlying parse error,
    /// and optionally the file path.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "Messenger JSON")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The input doesn't have the expected structure.
    ///
    /// This occurs when:
    /// - The export JSON is missing the "messages" array
    /// - A conversation folder has no `message_N.json` parts
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The analysis configuration is unusable.
    ///
    /// Raised before any record is processed, e.g. when `terms_per_year`
    /// does not divide 12.
    #[error("Invalid configuration for '{field}': {message}")]
    Configuration {
        /// The configuration field at fault
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// The timezone identifier is not in the IANA database.
    #[error("Unknown timezone '{input}'. Expected an IANA name such as 'US/Eastern' or 'Europe/Berlin'")]
    InvalidTimezone {
        /// The identifier that was provided
        input: String,
    },

    /// A message record is missing a required field or holds an unusable value.
    #[error("Malformed message record #{index}: field '{field}' {reason}")]
    MalformedRecord {
        /// Position of the record in archive order
        index: usize,
        /// The field at fault
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A sender display name has no extractable first name.
    #[error("Invalid sender in message #{index}: {name:?} has no first name")]
    InvalidSender {
        /// Position of the message in archive order
        index: usize,
        /// The sender name as found in the record
        name: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON parsing error
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatstatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates a parse error for the Messenger JSON format.
    pub fn messenger_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatstatsError::Parse {
            format: "Messenger JSON",
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatstatsError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates a configuration error.
    pub fn configuration(field: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::Configuration {
            field,
            message: message.into(),
        }
    }

    /// Creates an unknown timezone error.
    pub fn invalid_timezone(input: impl Into<String>) -> Self {
        ChatstatsError::InvalidTimezone {
            input: input.into(),
        }
    }

    /// Creates a malformed record error.
    pub fn malformed_record(index: usize, field: &'static str, reason: impl Into<String>) -> Self {
        ChatstatsError::MalformedRecord {
            index,
            field,
            reason: reason.into(),
        }
    }

    /// Creates an invalid sender error.
    pub fn invalid_sender(index: usize, name: impl Into<String>) -> Self {
        ChatstatsError::InvalidSender {
            index,
            name: name.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatstatsError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatstatsError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatstatsError::InvalidDate { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ChatstatsError::Configuration { .. } | ChatstatsError::InvalidTimezone { .. }
        )
    }

    /// Returns `true` if this is a malformed record error.
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, ChatstatsError::MalformedRecord { .. })
    }

    /// Returns `true` if this is an invalid sender error.
    pub fn is_invalid_sender(&self) -> bool {
        matches!(self, ChatstatsError::InvalidSender { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
