pub mod ledger;
pub mod schedule;
pub mod score_entry;

use std::sync::Arc;

use tracing::info;

#[cfg(feature = "gemini")]
use crate::commentary::gemini::{GeminiClient, GeminiConfig, GeminiResult};
use crate::{
    commentary::TextGenerator,
    config::AppConfig,
    dao::{
        credentials::CredentialStore,
        kv::{FileStore, SharedStore},
        storage::StorageResult,
    },
    services::{
        commentary_service::Commentator, schedule_service::Timetable, scorekeeper::Scorekeeper,
    },
};

/// Everything the application holds for one device, wired to a single key-value store.
pub struct AppState {
    /// Score ledger.
    pub scorekeeper: Scorekeeper,
    /// Class timetable.
    pub timetable: Timetable,
    credentials: CredentialStore,
    config: AppConfig,
}

impl AppState {
    /// Open the file-backed store named by `config` and restore all state from it.
    pub fn open(config: AppConfig) -> StorageResult<Self> {
        let store = FileStore::open(&config.storage_dir)?;
        info!(dir = %store.root().display(), "opened local storage");
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Restore all state from an arbitrary store.
    pub fn with_store(config: AppConfig, store: SharedStore) -> Self {
        Self {
            scorekeeper: Scorekeeper::open(store.clone()),
            timetable: Timetable::open(store.clone()),
            credentials: CredentialStore::new(store),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Credential settings.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Commentator backed by `generator`, sharing this state's credential.
    pub fn commentator<G: TextGenerator>(&self, generator: G) -> Commentator<G> {
        Commentator::new(
            generator,
            self.credentials.clone(),
            self.config.commentary.max_chars,
        )
    }

    /// Commentator backed by the Gemini API described in the configuration.
    #[cfg(feature = "gemini")]
    pub fn gemini_commentator(&self) -> GeminiResult<Commentator<GeminiClient>> {
        let client = GeminiClient::new(GeminiConfig::from(&self.config.commentary))?;
        Ok(self.commentator(client))
    }
}
