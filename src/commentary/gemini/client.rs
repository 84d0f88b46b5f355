use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    commentary::{GenerationError, NO_ANALYSIS, TextGenerator},
    dao::credentials::ApiKey,
};

use super::{
    config::GeminiConfig,
    error::{GeminiError, GeminiResult},
    models::{GenerateContentRequest, GenerateContentResponse},
};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Arc<str>,
    model: Arc<str>,
}

impl GeminiClient {
    /// Build the client; no request is sent until [`TextGenerator::generate`] is called.
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| GeminiError::ClientBuilder { source })?;

        Ok(Self {
            client,
            endpoint: Arc::from(config.endpoint()),
            model: Arc::from(config.model),
        })
    }

    async fn generate_content(&self, api_key: &str, prompt: &str) -> GeminiResult<String> {
        let model = self.model.to_string();
        debug!(model = %model, prompt_len = prompt.len(), "sending Gemini request");

        let response = self
            .client
            .post(self.endpoint.as_ref())
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::user_prompt(prompt))
            .send()
            .await
            .map_err(|source| GeminiError::RequestSend {
                model: model.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeminiError::RequestStatus { model, status });
        }

        let payload = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|source| GeminiError::DecodeResponse {
                model: model.clone(),
                source,
            })?;

        Ok(payload.text().unwrap_or_else(|| {
            warn!(model = %model, "Gemini response carried no text");
            NO_ANALYSIS.to_string()
        }))
    }
}

impl TextGenerator for GeminiClient {
    fn generate(
        &self,
        api_key: &ApiKey,
        prompt: String,
    ) -> BoxFuture<'static, Result<String, GenerationError>> {
        let client = self.clone();
        let api_key = api_key.clone();
        Box::pin(async move {
            client
                .generate_content(api_key.expose(), &prompt)
                .await
                .map_err(Into::into)
        })
    }
}
