//! Application-level configuration loading: storage location and commentary settings.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the configuration JSON is looked up.
const DEFAULT_CONFIG_PATH: &str = "config/ledger.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GONGZHU_LEDGER_CONFIG_PATH";
/// Directory holding the persisted entries when none is configured.
const DEFAULT_STORAGE_DIR: &str = ".gongzhu";
/// Generation model used for commentary.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
/// Base URL of the generative language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Upper bound on the commentary length, in characters.
const DEFAULT_MAX_CHARS: usize = 2_000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration.
pub struct AppConfig {
    /// Directory backing the key-value store.
    pub storage_dir: PathBuf,
    /// Text-generation settings.
    pub commentary: CommentaryConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Settings for the commentary request.
pub struct CommentaryConfig {
    /// Model name inserted into the request path.
    pub model: String,
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Responses longer than this are cut.
    pub max_chars: usize,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|err| {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config; falling back to defaults"
                );
                Self::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a configuration document. Missing fields take their defaults.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let raw = serde_json::from_str::<RawConfig>(contents)?;
        let config: Self = raw.into();
        info!(
            storage_dir = %config.storage_dir.display(),
            model = %config.commentary.model,
            "loaded configuration"
        );
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            commentary: CommentaryConfig::default(),
        }
    }
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file.
struct RawConfig {
    storage_dir: Option<PathBuf>,
    commentary: RawCommentary,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the `commentary` section.
struct RawCommentary {
    model: Option<String>,
    base_url: Option<String>,
    max_chars: Option<usize>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = CommentaryConfig::default();
        let RawCommentary {
            model,
            base_url,
            max_chars,
        } = value.commentary;
        Self {
            storage_dir: value
                .storage_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR)),
            commentary: CommentaryConfig {
                model: model.unwrap_or(defaults.model),
                base_url: base_url
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.base_url),
                max_chars: max_chars.unwrap_or(defaults.max_chars),
            },
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
