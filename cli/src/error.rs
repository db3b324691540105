//! Error types for the `qgen` command line client.
//!
//! Flow errors from `qgen_core` are wrapped as-is so their messages reach
//! the terminal unchanged; the CLI only adds its own file and setup failures.

use std::path::PathBuf;

use qgen_core::{ConfigError, GenerationFailure, SubmitError};
use thiserror::Error;

// =============================================================================
// CLI Errors
// =============================================================================

/// Everything that makes a `qgen` command exit non-zero.
#[derive(Debug, Error)]
pub enum CliError {
    /// A source file or draft could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The paper draft is not valid JSON or misses required fields.
    #[error("Invalid paper draft {path}: {source}")]
    Draft {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Nothing was given to upload.
    #[error("No files to upload")]
    NoFiles,

    /// The upload succeeded but no session could be read from the reply.
    #[error("Upload reply carried no session id")]
    MissingSession,

    /// Validation or precondition failure, no request was sent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The server or the network rejected the request.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// The reply could not be printed.
    #[error("Failed to encode reply: {0}")]
    Output(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl From<GenerationFailure> for CliError {
    fn from(failure: GenerationFailure) -> Self {
        match failure {
            GenerationFailure::Blocked(e) => CliError::Config(e),
            GenerationFailure::Failed(e) => CliError::Submit(e),
        }
    }
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_failure_conversion() {
        let blocked: CliError = GenerationFailure::Blocked(ConfigError::MissingSession).into();
        assert!(matches!(blocked, CliError::Config(ConfigError::MissingSession)));
        assert_eq!(blocked.to_string(), "Session expired. Please upload your files again.");

        let failed: CliError = GenerationFailure::Failed(SubmitError::Timeout(10)).into();
        assert!(matches!(failed, CliError::Submit(SubmitError::Timeout(10))));
    }
}
