/*!
 * Error types for the tubetrans application.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 *
 * Translation failures never reach the caller as errors: they are absorbed
 * by the translation service fallback. Only invalid input and missing
 * transcripts surface as `AppError`.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation endpoint
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within its timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while obtaining a transcript
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscriptError {
    /// The uploader disabled captions for this video
    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    /// None of the requested caption variants exist
    #[error("No transcript found for video {0}")]
    NoTranscriptFound(String),

    /// The upstream source failed for another reason
    #[error("Transcript source failed for video {video_id}: {message}")]
    SourceFailed {
        /// Video the fetch was for
        video_id: String,
        /// Upstream failure description
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The caller supplied something unusable (bad URL, empty transcript, bad language code)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The transcript could not be obtained
    #[error("Transcript not available: {0}")]
    Transcript(#[from] TranscriptError),

    /// Error from a provider outside the translation fallback path
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Whether the error was caused by the request rather than by the system
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Whether the error means the requested transcript does not exist upstream
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Transcript(_))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
