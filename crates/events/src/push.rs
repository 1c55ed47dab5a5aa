//! Push notification delivery over HTTP.
//!
//! [`PushGateway`] POSTs a JSON [`PushMessage`] to the configured gateway
//! URL. Each broadcast gets exactly one attempt; the caller records the
//! outcome in `notifications.delivery_status`.

use std::time::Duration;

use parish_core::types::DbId;
use serde::{Deserialize, Serialize};

/// HTTP request timeout for the delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("Push gateway returned HTTP {0}")]
    HttpStatus(u16),
}

/// Body sent to the push gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    pub notification_id: DbId,
    pub title: String,
    pub body: String,
    /// `ALL` or `ROLE`.
    pub audience: String,
    pub target_role: Option<String>,
}

/// Client for the external push gateway.
pub struct PushGateway {
    client: reqwest::Client,
    url: String,
}

impl PushGateway {
    pub fn new(url: impl Into<String>) -> Result<Self, PushError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one message. No retry.
    pub async fn send(&self, message: &PushMessage) -> Result<(), PushError> {
        let response = self.client.post(&self.url).json(message).send().await?;
        if !response.status().is_success() {
            return Err(PushError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_url() {
        let gateway = PushGateway::new("http://push.local/send").unwrap();
        assert_eq!(gateway.url(), "http://push.local/send");
    }

    #[test]
    fn error_display_http_status() {
        let err = PushError::HttpStatus(503);
        assert_eq!(err.to_string(), "Push gateway returned HTTP 503");
    }

    #[test]
    fn message_serializes_flat() {
        let message = PushMessage {
            notification_id: 4,
            title: "New event: Easter Vigil".to_string(),
            body: "Easter Vigil at Main church".to_string(),
            audience: "ALL".to_string(),
            target_role: None,
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["notification_id"], 4);
        assert_eq!(json["audience"], "ALL");
        assert!(json["target_role"].is_null());
    }
}
