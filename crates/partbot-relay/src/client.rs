use async_trait::async_trait;
use partbot_models::{OutboundRequest, RemoteResponse};
use reqwest::Client;
use tracing::debug;

use crate::error::RelayError;

/// The remote automation endpoint. Mockable for testing.
#[async_trait]
pub trait AutomationClient: Send + Sync {
    /// POST one request and return the decoded JSON object.
    async fn call(&self, request: &OutboundRequest) -> Result<RemoteResponse, RelayError>;
}

/// Client for the spreadsheet web app. Uses the transport's default timeouts.
#[derive(Clone)]
pub struct HttpAutomationClient {
    client: Client,
    endpoint: String,
}

impl HttpAutomationClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl AutomationClient for HttpAutomationClient {
    async fn call(&self, request: &OutboundRequest) -> Result<RemoteResponse, RelayError> {
        debug!(action = request.action(), "Calling automation endpoint");

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let text = response.text().await?;
        let body: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            RelayError::Decode(format!("{e} (length={})", text.len()))
        })?;

        RemoteResponse::from_value(body)
            .ok_or_else(|| RelayError::Decode("top-level value is not an object".to_string()))
    }
}
