//! OneSky API client
//!
//! Two calls: list a project's languages, export one translation file.
//! Requests are issued one at a time; every request carries the signature
//! query parameters computed at startup.

use tracing::debug;

use crate::core::errors::{PullError, Result};
use crate::core::models::{ExportTarget, Language};
use crate::core::signer::Signature;

/// Client for the OneSky platform API
#[derive(Debug, Clone)]
pub struct OneSkyClient {
    http: reqwest::Client,
    api_base: String,
    signature: Signature,
}

impl OneSkyClient {
    pub fn new(api_base: impl Into<String>, signature: Signature) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            signature,
        }
    }

    /// `GET /projects/{id}/languages` — the project's configured locales,
    /// in the order the service reports them.
    pub async fn list_languages(&self, project_id: &str) -> Result<Vec<Language>> {
        let url = format!("{}/projects/{}/languages", self.api_base, project_id);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&self.signature.query_params())
            .send()
            .await
            .map_err(transport_error)?;

        let body = response.bytes().await.map_err(transport_error)?;
        if body.is_empty() {
            return Err(PullError::MissingBody {
                endpoint: "languages".to_string(),
            });
        }

        let json: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| PullError::MalformedJson {
                message: e.to_string(),
            })?;

        parse_languages(&json)
    }

    /// `GET /projects/{id}/translations` — one exported file, as raw bytes.
    ///
    /// The service answers non-200 while the export is still being
    /// generated; that is reported, not retried.
    pub async fn export_file(&self, project_id: &str, target: &ExportTarget) -> Result<Vec<u8>> {
        let url = format!("{}/projects/{}/translations", self.api_base, project_id);
        debug!("GET {} locale={} file={}", url, target.locale, target.file_name);

        let response = self
            .http
            .get(&url)
            .query(&self.signature.query_params())
            .query(&[
                ("locale", target.locale.as_str()),
                ("source_file_name", target.file_name.as_str()),
                ("export_file_name", target.file_name.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(PullError::UnexpectedStatus {
                status: status.as_u16(),
                locale: target.locale.clone(),
                file_name: target.file_name.clone(),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        if body.is_empty() {
            return Err(PullError::MissingBody {
                endpoint: "translations".to_string(),
            });
        }

        Ok(body.to_vec())
    }
}

fn transport_error(e: reqwest::Error) -> PullError {
    PullError::Transport {
        message: e.to_string(),
    }
}

fn parse_languages(json: &serde_json::Value) -> Result<Vec<Language>> {
    let entries = json
        .get("data")
        .and_then(|d| d.as_array())
        .ok_or_else(|| schema_error("no `data` array"))?;

    entries
        .iter()
        .map(|entry| {
            let code = entry
                .get("code")
                .and_then(|c| c.as_str())
                .ok_or_else(|| schema_error("language entry without a string `code`"))?;
            let is_base = entry
                .get("is_base_language")
                .and_then(|b| b.as_bool())
                .ok_or_else(|| schema_error("language entry without a bool `is_base_language`"))?;
            Ok(Language::new(code, is_base))
        })
        .collect()
}

fn schema_error(message: &str) -> PullError {
    PullError::Schema {
        message: message.to_string(),
    }
}
