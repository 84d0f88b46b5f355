//! One-shot commentary on the current ledger.

use tracing::{info, warn};

use crate::{
    commentary::{NO_ANALYSIS, TextGenerator, build_prompt},
    dao::credentials::CredentialStore,
    error::CommentaryError,
    state::ledger::GameState,
};

/// Reads the ledger, asks the generator once, and never mutates anything.
pub struct Commentator<G> {
    generator: G,
    credentials: CredentialStore,
    max_chars: usize,
}

impl<G: TextGenerator> Commentator<G> {
    pub fn new(generator: G, credentials: CredentialStore, max_chars: usize) -> Self {
        Self {
            generator,
            credentials,
            max_chars,
        }
    }

    /// Whether a credential is configured; when not, the caller should open settings instead.
    pub fn is_configured(&self) -> bool {
        self.credentials.api_key().is_some()
    }

    /// Produce commentary for `state`. A single attempt; failures are not retried.
    pub async fn analyze(&self, state: &GameState) -> Result<String, CommentaryError> {
        let Some(api_key) = self.credentials.api_key() else {
            info!("commentary requested without an API key");
            return Err(CommentaryError::MissingCredential);
        };

        let prompt = build_prompt(state);
        let text = self
            .generator
            .generate(&api_key, prompt)
            .await
            .map_err(|err| {
                warn!(error = %err, "commentary request failed");
                CommentaryError::from(err)
            })?;

        let text = text.trim();
        if text.is_empty() {
            return Ok(NO_ANALYSIS.to_string());
        }
        Ok(truncate_chars(text, self.max_chars))
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use futures::future::BoxFuture;

    use super::*;
    use crate::{
        commentary::GenerationError,
        dao::{credentials::ApiKey, kv::MemoryStore},
    };

    #[derive(Clone, Default)]
    struct ScriptedGenerator {
        reply: Option<String>,
        seen: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl TextGenerator for ScriptedGenerator {
        fn generate(
            &self,
            api_key: &ApiKey,
            prompt: String,
        ) -> BoxFuture<'static, Result<String, GenerationError>> {
            self.seen
                .lock()
                .unwrap()
                .push((api_key.expose().to_string(), prompt));
            let reply = self.reply.clone();
            Box::pin(async move {
                reply.ok_or_else(|| {
                    GenerationError::backend("boom".into(), io::Error::other("offline"))
                })
            })
        }
    }

    fn credentials(key: Option<&str>) -> CredentialStore {
        let credentials = CredentialStore::new(Arc::new(MemoryStore::new()));
        if let Some(key) = key {
            credentials.set_api_key(key).unwrap();
        }
        credentials
    }

    #[tokio::test]
    async fn missing_key_is_distinguished() {
        let generator = ScriptedGenerator::default();
        let commentator = Commentator::new(generator.clone(), credentials(None), 100);

        let err = commentator.analyze(&GameState::initialize()).await.unwrap_err();
        assert!(err.needs_configuration());
        assert!(!commentator.is_configured());
        assert!(generator.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn request_failure_is_distinguished() {
        let commentator =
            Commentator::new(ScriptedGenerator::default(), credentials(Some("k")), 100);

        let err = commentator.analyze(&GameState::initialize()).await.unwrap_err();
        assert!(matches!(err, CommentaryError::RequestFailed(_)));
        assert!(!err.needs_configuration());
        assert_ne!(
            err.user_message(),
            CommentaryError::MissingCredential.user_message()
        );
    }

    #[tokio::test]
    async fn reply_is_trimmed_and_bounded() {
        let generator = ScriptedGenerator {
            reply: Some("  North keeps eating the pig 🐷 and will lose  ".into()),
            ..Default::default()
        };
        let commentator = Commentator::new(generator.clone(), credentials(Some("secret")), 12);

        let text = commentator.analyze(&GameState::initialize()).await.unwrap();
        assert_eq!(text, "North keeps…");

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen[0].0, "secret");
        assert!(seen[0].1.contains("Current Standings:"));
    }

    #[tokio::test]
    async fn blank_reply_uses_fallback() {
        let generator = ScriptedGenerator {
            reply: Some("   ".into()),
            ..Default::default()
        };
        let commentator = Commentator::new(generator, credentials(Some("k")), 100);
        let text = commentator.analyze(&GameState::initialize()).await.unwrap();
        assert_eq!(text, NO_ANALYSIS);
    }
}
