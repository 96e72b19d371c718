//! Polish backend request/response types and the `PolishService` trait.
//!
//! The backend rewrites a draft and relays the final email. It is an
//! external collaborator; `HttpPolishService` speaks its JSON contract.

pub mod http;

pub use http::HttpPolishService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::form::{PolishedResult, ToneOption};

/// Tone reported when the backend omits it.
pub const DEFAULT_TONE: &str = "Professional";
/// Readability reported when the backend omits it.
pub const DEFAULT_READABILITY: &str = "High";

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub subject: String,
    pub body: String,
    pub tone_option: ToneOption,
}

/// Response of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub polished_subject: String,
    pub polished_body: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub readability: Option<String>,
}

impl AnalyzeResponse {
    /// Convert into the stored result, filling in missing metrics.
    ///
    /// Empty strings count as missing.
    pub fn into_result(self) -> PolishedResult {
        PolishedResult {
            subject: self.polished_subject,
            body: self.polished_body,
            tone: non_empty_or(self.tone, DEFAULT_TONE),
            readability: non_empty_or(self.readability, DEFAULT_READABILITY),
        }
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Body of `POST /api/send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Response of `POST /api/send`. Only success matters; the message is logged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub ai_available: bool,
}

/// The remote polish/send backend.
#[async_trait]
pub trait PolishService: Send + Sync {
    /// Rewrite a draft. Any non-2xx status or malformed body is an error.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, TransportError>;

    /// Deliver the polished email.
    async fn send(&self, request: &SendRequest) -> Result<SendReceipt, TransportError>;

    /// Probe backend liveness.
    async fn health(&self) -> Result<HealthStatus, TransportError>;
}
