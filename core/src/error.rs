//! Error types for the upload and configuration flows.
//!
//! - [`ConfigError`] - Precondition and validation violations (no network call made)
//! - [`TransportError`] - The request never produced an HTTP reply
//! - [`SubmitError`] - Anything that made a dispatched submission fail
//!
//! Every variant is recoverable: the flows restore the UI and keep the
//! user's state so the submission can be retried.

use thiserror::Error;

/// Maximum allowed distance between the computed total and the target marks.
pub const MARKS_TOLERANCE: u32 = 5;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Violations detected synchronously by the configuration builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The page carries no session identifier.
    #[error("Session expired. Please upload your files again.")]
    MissingSession,

    /// Submission attempted with an empty question-set list.
    #[error("Please add at least one question set")]
    NoQuestionSets,

    /// Removal of the only remaining question set.
    #[error("At least one question set is required")]
    LastQuestionSet,

    /// Total marks outside the allowed tolerance.
    #[error("Total marks ({actual}) must be within 5 of the target ({target})")]
    MarksOutOfTolerance { actual: u32, target: u32 },

    /// Marks value outside the allowed set.
    #[error("Invalid marks per question: {0} (allowed: 1-8, 10, 15)")]
    InvalidMarks(u32),

    /// Question count outside 1..=20.
    #[error("Invalid question count: {0} (must be between 1 and 20)")]
    InvalidCount(u32),

    /// Unknown question type code.
    #[error("Unknown question type: {0}")]
    UnknownQuestionType(String),

    /// Unknown question-set field name.
    #[error("Unknown question set field: {0}")]
    UnknownField(String),

    /// Target marks must be positive.
    #[error("Target marks must be greater than zero")]
    InvalidTargetMarks,

    /// Difficulty outside 1..=10.
    #[error("Difficulty must be between 1 and 10, got {0}")]
    InvalidDifficulty(u32),

    /// A numeric field could not be parsed.
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    /// The question configuration could not be serialized.
    #[error("Failed to serialize question configuration: {0}")]
    Serialization(String),

    /// A submission is already in flight.
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// The paper for this page was already generated.
    #[error("This paper has already been generated")]
    AlreadySubmitted,
}

// =============================================================================
// Transport Errors
// =============================================================================

/// The request failed before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

// =============================================================================
// Submission Errors
// =============================================================================

/// Why a dispatched upload or generation request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Rejected promise / connection failure.
    #[error("Network error: {0}")]
    Transport(#[from] TransportError),

    /// Non-2xx HTTP status.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Status { status: u16, message: Option<String> },

    /// 2xx reply whose `status` field is not `"success"`.
    #[error("{}", .message.as_deref().unwrap_or("request was not successful"))]
    Declared { message: Option<String> },

    /// 2xx reply without a parseable JSON body.
    #[error("Invalid server response: {0}")]
    InvalidResponse(String),

    /// The optional client-side timeout elapsed.
    #[error("Request timed out after {0} ms")]
    Timeout(u32),
}

impl SubmitError {
    /// Message shown to the user, most specific first.
    ///
    /// Declared failures without a server message fall back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            SubmitError::Declared { message: Some(message) } => message.clone(),
            SubmitError::Declared { message: None } => fallback.to_string(),
            other => format!("{}: {}", fallback, other),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for dispatched submissions.
pub type SubmitResult<T> = Result<T, SubmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_message_cites_both_values() {
        let err = ConfigError::MarksOutOfTolerance { actual: 50, target: 100 };
        let msg = err.to_string();
        assert!(msg.contains("50"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_user_message_prefers_server_text() {
        let declared = SubmitError::Declared { message: Some("Session not found".into()) };
        assert_eq!(declared.user_message("Upload failed"), "Session not found");

        let silent = SubmitError::Declared { message: None };
        assert_eq!(silent.user_message("Upload failed"), "Upload failed");

        let network: SubmitError = TransportError::new("connection refused").into();
        assert_eq!(
            network.user_message("Upload failed"),
            "Upload failed: Network error: connection refused"
        );
    }

    #[test]
    fn test_status_error_format() {
        let err = SubmitError::Status { status: 500, message: Some("boom".into()) };
        assert_eq!(err.to_string(), "Server error (500): boom");

        let bare = SubmitError::Status { status: 502, message: None };
        assert_eq!(bare.to_string(), "Server error (502): no details");
    }
}
