//! Error types for the attendance rules engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while recording attendance and
//! computing fines.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance rules engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidTimeFormat {
///     value: "8.30".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time '8.30': expected HH:MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A time-of-day string did not have the `HH:MM` shape.
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTimeFormat {
        /// The raw value that failed to parse.
        value: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration values were individually valid but inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// The attendance store failed to serve a read or a write.
    #[error("Attendance store error: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },

    /// A confirmation arrived for a user with no pending intent.
    #[error("No pending attendance intent for user '{user_id}'")]
    NoPendingIntent {
        /// The user whose session was empty.
        user_id: String,
    },

    /// A date whose billing cycle leaves the representable calendar.
    #[error("Date {date} has no billing cycle within the supported calendar")]
    DateOutOfRange {
        /// The reference date.
        date: NaiveDate,
    },

    /// A request carried values the engine cannot act on.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
