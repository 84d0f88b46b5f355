use std::fmt;

use tracing::warn;

use crate::dao::{kv::SharedStore, storage::StorageResult};

/// Key holding the text-generation API key.
pub const API_KEY_KEY: &str = "gemini_api_key";

/// Opaque API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key; blank input yields `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// Raw value, for the authenticated request only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Stores the credential next to the game state.
#[derive(Clone)]
pub struct CredentialStore {
    store: SharedStore,
}

impl CredentialStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Stored key, if any. A read failure is logged and treated as "not configured".
    pub fn api_key(&self) -> Option<ApiKey> {
        match self.store.get(API_KEY_KEY) {
            Ok(value) => value.as_deref().and_then(ApiKey::new),
            Err(err) => {
                warn!(error = %err, "failed to read stored API key");
                None
            }
        }
    }

    /// Replace the stored key. Blank input clears it.
    pub fn set_api_key(&self, raw: &str) -> StorageResult<()> {
        match ApiKey::new(raw) {
            Some(key) => self.store.set(API_KEY_KEY, key.expose()),
            None => self.store.remove(API_KEY_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dao::kv::MemoryStore;

    #[test]
    fn key_is_trimmed_and_blank_clears() {
        let credentials = CredentialStore::new(Arc::new(MemoryStore::new()));
        assert!(credentials.api_key().is_none());

        credentials.set_api_key("  AIzaSyExample \n").unwrap();
        assert_eq!(credentials.api_key().unwrap().expose(), "AIzaSyExample");

        credentials.set_api_key("   ").unwrap();
        assert!(credentials.api_key().is_none());
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = ApiKey::new("secret-value").unwrap();
        assert!(!format!("{key:?}").contains("secret"));
    }
}
