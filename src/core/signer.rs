//! Request signing
//!
//! OneSky authenticates every call with three query parameters: `api_key`,
//! `timestamp` and `dev_hash`, where the hash is the MD5 of the decimal Unix
//! timestamp concatenated with the API secret.

use md5::{Digest, Md5};

/// Lowercase hex MD5 of the decimal `timestamp` followed by `secret`.
pub fn dev_hash(secret: &str, timestamp: i64) -> String {
    let mut hasher = Md5::new();
    hasher.update(timestamp.to_string().as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Signature material attached to every request.
///
/// Computed once at startup and reused for the whole run; the run must
/// finish inside the service's signature validity window.
#[derive(Debug, Clone)]
pub struct Signature {
    pub api_key: String,
    pub timestamp: String,
    pub dev_hash: String,
}

impl Signature {
    pub fn new(api_key: &str, api_secret: &str, timestamp: i64) -> Self {
        Self {
            api_key: api_key.to_string(),
            timestamp: timestamp.to_string(),
            dev_hash: dev_hash(api_secret, timestamp),
        }
    }

    /// Signature stamped with the current Unix time.
    pub fn now(api_key: &str, api_secret: &str) -> Self {
        Self::new(api_key, api_secret, chrono::Utc::now().timestamp())
    }

    /// The three authentication query parameters.
    pub fn query_params(&self) -> [(&'static str, &str); 3] {
        [
            ("api_key", self.api_key.as_str()),
            ("timestamp", self.timestamp.as_str()),
            ("dev_hash", self.dev_hash.as_str()),
        ]
    }
}
