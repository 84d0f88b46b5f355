use thiserror::Error;
use validator::ValidationErrors;

use crate::commentary::GenerationError;

/// Errors raised while editing the timetable.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The course failed validation; nothing was stored.
    #[error("invalid course: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Why no commentary could be produced.
#[derive(Debug, Error)]
pub enum CommentaryError {
    /// No API key is configured; the caller should route to settings.
    #[error("no API key configured")]
    MissingCredential,
    /// The text-generation request failed.
    #[error("commentary request failed")]
    RequestFailed(#[source] GenerationError),
}

impl CommentaryError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            CommentaryError::MissingCredential => {
                "Add a Gemini API key in settings to get game commentary."
            }
            CommentaryError::RequestFailed(_) => "Failed to analyze game. Check API Key.",
        }
    }

    /// Whether the caller should open the credential settings.
    pub fn needs_configuration(&self) -> bool {
        matches!(self, CommentaryError::MissingCredential)
    }
}

impl From<GenerationError> for CommentaryError {
    fn from(err: GenerationError) -> Self {
        CommentaryError::RequestFailed(err)
    }
}
