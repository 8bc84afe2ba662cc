//! Credential resolution and persistence
//!
//! The API key and secret live in the OS credential manager; the project id
//! is not sensitive and lives in a plain JSON preferences file. Both are
//! behind [`CredentialStore`] so the prompt logic can be tested with an
//! in-memory fake.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::PathBuf;

use crate::core::errors::{PullError, Result};

/// Service name for keychain entries
const KEYCHAIN_SERVICE: &str = "onesky-pull";

/// Keyed string storage for credentials
pub trait CredentialStore {
    /// Stored value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Persist `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Secret-capable store backed by the OS credential manager
pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    pub fn new() -> Self {
        Self {
            service: KEYCHAIN_SERVICE.to_string(),
        }
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeychainStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = keyring::Entry::new(&self.service, key)
            .map_err(|e| credential_error(key, e.to_string()))?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(credential_error(key, e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let entry = keyring::Entry::new(&self.service, key)
            .map_err(|e| credential_error(key, e.to_string()))?;
        entry
            .set_password(value)
            .map_err(|e| credential_error(key, e.to_string()))
    }
}

/// Plain preferences store, a JSON map on disk
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    /// Store backed by `onesky-pull/prefs.json` under the user config directory.
    pub fn user_default() -> Result<Self> {
        let dir = dirs::config_dir().ok_or_else(|| {
            credential_error("prefs", "could not determine config directory".to_string())
        })?;
        Ok(Self::with_path(dir.join("onesky-pull").join("prefs.json")))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> std::result::Result<BTreeMap<String, String>, String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| format!("invalid prefs file {}: {}", self.path.display(), e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(format!("failed to read {}: {}", self.path.display(), e)),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> std::result::Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
        }
        let contents = serde_json::to_string_pretty(map)
            .map_err(|e| format!("failed to serialize prefs: {}", e))?;
        fs::write(&self.path, contents)
            .map_err(|e| format!("failed to write {}: {}", self.path.display(), e))
    }
}

impl CredentialStore for PrefsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self
            .read_map()
            .map_err(|message| credential_error(key, message))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .read_map()
            .map_err(|message| credential_error(key, message))?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
            .map_err(|message| credential_error(key, message))
    }
}

/// Return the stored value for `key`, or prompt on stdin until a non-empty
/// line is entered, persisting the entry before returning it.
pub fn get_or_prompt(store: &dyn CredentialStore, key: &str, prompt: &str) -> Result<String> {
    let stdin = io::stdin();
    get_or_prompt_from(store, key, prompt, &mut stdin.lock(), &mut io::stdout())
}

fn get_or_prompt_from(
    store: &dyn CredentialStore,
    key: &str,
    prompt: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<String> {
    if let Some(value) = store.get(key)? {
        if !value.is_empty() {
            return Ok(value);
        }
    }

    let entered = loop {
        writeln!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // Unattended run with nothing stored: fail instead of spinning.
            return Err(credential_error(
                key,
                "stdin closed before a value was entered".to_string(),
            ));
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            break trimmed.to_string();
        }
    };

    store.set(key, &entered)?;
    Ok(entered)
}

fn credential_error(key: &str, message: String) -> PullError {
    PullError::CredentialStore {
        key: key.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MemoryStore {
        values: RefCell<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                values: RefCell::new(HashMap::new()),
                fail_writes: false,
            }
        }

        fn with_value(key: &str, value: &str) -> Self {
            let store = Self::new();
            store
                .values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            store
        }
    }

    impl CredentialStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(credential_error(key, "write refused".to_string()));
            }
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn prompt(store: &dyn CredentialStore, input: &str) -> (Result<String>, String) {
        let mut reader = input.as_bytes();
        let mut output = Vec::new();
        let result = get_or_prompt_from(store, "ApiKey", "Enter your API Key:", &mut reader, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_stored_value_returned_without_prompting() {
        let store = MemoryStore::with_value("ApiKey", "abc123");
        let (result, output) = prompt(&store, "");
        assert_eq!(result.unwrap(), "abc123");
        assert!(output.is_empty());
    }

    #[test]
    fn test_empty_stored_value_triggers_prompt() {
        let store = MemoryStore::with_value("ApiKey", "");
        let (result, output) = prompt(&store, "entered-key\n");
        assert_eq!(result.unwrap(), "entered-key");
        assert!(output.contains("Enter your API Key:"));
    }

    #[test]
    fn test_prompt_repeats_until_non_empty_line() {
        let store = MemoryStore::new();
        let (result, output) = prompt(&store, "\n\nfinally\n");
        assert_eq!(result.unwrap(), "finally");
        assert_eq!(output.matches("Enter your API Key:").count(), 3);
        assert_eq!(
            store.values.borrow().get("ApiKey").map(String::as_str),
            Some("finally")
        );
    }

    #[test]
    fn test_eof_before_value_is_an_error() {
        let store = MemoryStore::new();
        let (result, _) = prompt(&store, "\n");
        assert!(matches!(
            result,
            Err(PullError::CredentialStore { ref key, .. }) if key == "ApiKey"
        ));
    }

    #[test]
    fn test_persistence_failure_is_surfaced() {
        let mut store = MemoryStore::new();
        store.fail_writes = true;
        let (result, _) = prompt(&store, "value\n");
        assert!(matches!(result, Err(PullError::CredentialStore { .. })));
    }

    #[test]
    fn test_prefs_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::with_path(dir.path().join("nested").join("prefs.json"));

        assert_eq!(store.get("OneSkyProjectId").unwrap(), None);
        store.set("OneSkyProjectId", "12345").unwrap();
        assert_eq!(
            store.get("OneSkyProjectId").unwrap().as_deref(),
            Some("12345")
        );

        // Second key must not clobber the first.
        store.set("Other", "x").unwrap();
        assert_eq!(
            store.get("OneSkyProjectId").unwrap().as_deref(),
            Some("12345")
        );
    }
}
