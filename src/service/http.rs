//! HTTP client for the polish backend.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{AnalyzeRequest, AnalyzeResponse, HealthStatus, PolishService, SendReceipt, SendRequest};
use crate::config::ClientConfig;
use crate::error::TransportError;

/// Error bodies are truncated to this many characters before logging.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// `PolishService` over HTTP/JSON.
pub struct HttpPolishService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPolishService {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Request {
                endpoint: config.base_url.clone(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let endpoint = self.api_url(path);
        let resp = self
            .client
            .post(&endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;
        decode_response(endpoint, resp).await
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, TransportError> {
        let endpoint = self.api_url(path);
        let resp = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;
        decode_response(endpoint, resp).await
    }
}

async fn decode_response<R: DeserializeOwned>(
    endpoint: String,
    resp: reqwest::Response,
) -> Result<R, TransportError> {
    let status = resp.status();
    let text = resp.text().await.map_err(|e| TransportError::Request {
        endpoint: endpoint.clone(),
        reason: format!("Failed to read response body: {e}"),
    })?;

    if !status.is_success() {
        return Err(TransportError::Status {
            endpoint,
            status: status.as_u16(),
            body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    serde_json::from_str(&text).map_err(|e| TransportError::Decode {
        endpoint,
        reason: e.to_string(),
    })
}

#[async_trait]
impl PolishService for HttpPolishService {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, TransportError> {
        let response: AnalyzeResponse = self.post_json("analyze", request).await?;
        tracing::debug!(
            subject_len = response.polished_subject.len(),
            body_len = response.polished_body.len(),
            "Analyze response received"
        );
        Ok(response)
    }

    async fn send(&self, request: &SendRequest) -> Result<SendReceipt, TransportError> {
        let receipt: SendReceipt = self.post_json("send", request).await?;
        tracing::info!(to = %request.to, message = ?receipt.message, "Send accepted by backend");
        Ok(receipt)
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        self.get_json("health").await
    }
}
