//! Game commentary produced by an external text-generation service.

#[cfg(feature = "gemini")]
pub mod gemini;
mod prompt;

use std::error::Error;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::dao::credentials::ApiKey;

pub use self::prompt::build_prompt;

/// Text used when the model answers without any usable content.
pub const NO_ANALYSIS: &str = "Could not generate analysis.";

/// Abstraction over the remote model that turns a prompt into free text.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        api_key: &ApiKey,
        prompt: String,
    ) -> BoxFuture<'static, Result<String, GenerationError>>;
}

/// Failure reported by a [`TextGenerator`], whatever the backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text generation failed: {message}")]
    Backend {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl GenerationError {
    /// Wrap any backend failure.
    pub fn backend(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        GenerationError::Backend {
            message,
            source: Box::new(source),
        }
    }
}
