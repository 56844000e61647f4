//! Persistence Gateway client
//!
//! Typed async wrapper around the remote JSON store. The wire protocol
//! dispatches on an `action` query parameter against a single endpoint;
//! record fields travel in the original camelCase names.
//!
//! A misconfigured endpoint tends to answer with an HTML error page
//! instead of JSON. That is a recoverable sync failure: surfaced as
//! [`Error::Gateway`] so callers can keep operating on held data.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{Error, Result};
use crate::models::Subscription;
use crate::settings::SettingsOverrides;

/// Client for the five gateway operations
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http_client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every subscription record.
    pub async fn get_all(&self) -> Result<Vec<Subscription>> {
        let response = self
            .http_client
            .get(format!("{}?action=get_all", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let text = response.text().await?;
        parse_json_body(&text)
    }

    /// Fetch the stored per-key settings overrides.
    pub async fn get_settings(&self) -> Result<SettingsOverrides> {
        let response = self
            .http_client
            .get(format!("{}?action=get_settings", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let text = response.text().await?;
        parse_json_body(&text)
    }

    /// Upsert one subscription by id.
    pub async fn save(&self, sub: &Subscription) -> Result<()> {
        let response = self
            .http_client
            .post(format!("{}?action=save", self.base_url))
            .json(sub)
            .send()
            .await?;

        read_envelope(response).await
    }

    /// Remove one subscription by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self
            .http_client
            .post(format!("{}?action=delete&id={}", self.base_url, id))
            .send()
            .await?;

        read_envelope(response).await
    }

    /// Persist one named configuration blob.
    pub async fn save_setting(&self, key: &str, value: serde_json::Value) -> Result<()> {
        let response = self
            .http_client
            .post(format!("{}?action=save_setting", self.base_url))
            .json(&json!({ "key": key, "value": value }))
            .send()
            .await?;

        read_envelope(response).await
    }
}

/// Mutation responses carry a `{"success": bool}` envelope
#[derive(Debug, serde::Deserialize)]
struct GatewayEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

async fn read_envelope(response: reqwest::Response) -> Result<()> {
    if !response.status().is_success() {
        return Err(Error::Http(response.error_for_status().unwrap_err()));
    }
    let text = response.text().await?;
    let envelope: GatewayEnvelope = parse_json_body(&text)?;
    if envelope.success {
        Ok(())
    } else {
        Err(Error::Gateway(envelope.error.unwrap_or_else(|| {
            "Operation rejected by the gateway".to_string()
        })))
    }
}

fn parse_json_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    if looks_like_html(text) {
        return Err(Error::Gateway(
            "Endpoint returned HTML instead of JSON (is the API deployed?)".to_string(),
        ));
    }
    Ok(serde_json::from_str(text)?)
}

fn looks_like_html(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<!doctype") || trimmed.starts_with("<html")
}
