use crate::config::{CommentaryConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Runtime configuration describing which Gemini endpoint and model to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
}

impl GeminiConfig {
    /// Construct a configuration from an explicit base URL and model name.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Build a configuration from `GEMINI_BASE_URL` / `GEMINI_MODEL`, defaulting each.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(base_url, model)
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl From<&CommentaryConfig> for GeminiConfig {
    fn from(value: &CommentaryConfig) -> Self {
        Self::new(value.base_url.clone(), value.model.clone())
    }
}
