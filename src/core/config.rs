//! Run configuration
//!
//! Everything is resolved once at startup and passed down explicitly;
//! no module-level state.

use std::env;
use std::path::PathBuf;

use crate::core::errors::Result;
use crate::core::store::{self, CredentialStore};

/// Base endpoint for the OneSky platform API
pub const API_BASE: &str = "https://platform.api.onesky.io/1";

/// Keychain identifier for the API key
pub const API_KEY_ID: &str = "OneSkyApiKey";

/// Keychain identifier for the API secret
pub const API_SECRET_ID: &str = "OneSkyApiSecret";

/// Preferences identifier for the project id
pub const PROJECT_ID_KEY: &str = "OneSkyProjectId";

/// Logical resource files exported for every language
pub const SOURCE_FILES: &[&str] = &[
    "InfoPlist.strings",
    "Localizable.strings",
    "Localizable.stringsdict",
];

/// Configuration for one pull run
#[derive(Debug, Clone)]
pub struct PullConfig {
    pub api_key: String,
    pub api_secret: String,
    pub project_id: String,
    pub api_base: String,
    pub languages_root: PathBuf,
    pub files: Vec<String>,
}

impl PullConfig {
    /// Resolve each credential from the environment, the given store, or an
    /// interactive prompt, in that order. Prompted values are persisted.
    pub fn resolve(secrets: &dyn CredentialStore, prefs: &dyn CredentialStore) -> Result<Self> {
        let api_key = resolve_value(
            "ONESKY_API_KEY",
            secrets,
            API_KEY_ID,
            "Enter your OneSky API Key:",
        )?;
        let api_secret = resolve_value(
            "ONESKY_API_SECRET",
            secrets,
            API_SECRET_ID,
            "Enter your OneSky API Secret:",
        )?;
        let project_id = resolve_value(
            "ONESKY_PROJECT_ID",
            prefs,
            PROJECT_ID_KEY,
            "Enter your OneSky Project Id:",
        )?;

        Ok(Self {
            api_key,
            api_secret,
            project_id,
            api_base: API_BASE.to_string(),
            languages_root: languages_root_from_env(),
            files: SOURCE_FILES.iter().map(|f| f.to_string()).collect(),
        })
    }
}

/// Environment wins over the store; the store wins over the prompt.
fn resolve_value(
    env_var: &str,
    store: &dyn CredentialStore,
    key: &str,
    prompt: &str,
) -> Result<String> {
    if let Ok(value) = env::var(env_var) {
        if !value.is_empty() {
            return Ok(value);
        }
    }
    store::get_or_prompt(store, key, prompt)
}

/// Fixed per-deployment output tree, overridable only through
/// `ONESKY_LANGUAGES_ROOT`.
fn languages_root_from_env() -> PathBuf {
    if let Ok(root) = env::var("ONESKY_LANGUAGES_ROOT") {
        if !root.is_empty() {
            return PathBuf::from(root);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wa-ios")
        .join("WorkAngel")
        .join("Supporting Files")
}
