//! Error types raised by the Gemini client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::commentary::GenerationError;

/// Convenient result alias returning [`GeminiError`] failures.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Failures that can occur while talking to the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build Gemini client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent.
    #[error("failed to send Gemini request for model `{model}`")]
    RequestSend {
        model: String,
        #[source]
        source: reqwest::Error,
    },
    /// Gemini answered with a non-success status.
    #[error("unexpected Gemini response status {status} for model `{model}`")]
    RequestStatus { model: String, status: StatusCode },
    /// Response payload could not be parsed.
    #[error("failed to decode Gemini response for model `{model}`")]
    DecodeResponse {
        model: String,
        #[source]
        source: reqwest::Error,
    },
}

impl From<GeminiError> for GenerationError {
    fn from(err: GeminiError) -> Self {
        GenerationError::backend(err.to_string(), err)
    }
}
