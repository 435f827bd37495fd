use std::time::Duration;

use chat_logging::{chat_debug, chat_warn, preview};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::map_reqwest_error;
use crate::wire::{error_detail, AskRequest, AskResponse, HealthResponse, LoadResponse};
use crate::{GatewayError, GatewayResult};

/// Deployment origin of the backend.
pub const DEFAULT_BASE_URL: &str = "https://xlintz-clint.hf.space";

/// Reply shown when the backend cannot be reached at all.
pub const WAKING_UP_REPLY: &str = "Error: Could not connect. The server might be waking up (this takes ~30s for free tier). Please try again.";

/// Message shown when the data load fails for any reason.
pub const LOAD_FAILED_MESSAGE: &str = "Error: Could not load data. Please try again later.";

const MALFORMED_REPLY: &str =
    "Error: The server sent an unexpected response. Please try again.";
const GENERIC_SERVER_ERROR: &str = "Server Error";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            // Free-tier backends can take ~30s to wake up.
            request_timeout: Duration::from_secs(60),
            max_bytes: 1024 * 1024,
        }
    }
}

/// Outbound operations against the chat backend.
///
/// Implementations never fail: every error is folded into
/// `GatewayResult::Failed` with a user-facing message.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn send_chat(&self, text: &str) -> GatewayResult;
    async fn trigger_load(&self) -> GatewayResult;
    async fn check_health(&self) -> GatewayResult;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let base = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::Client(err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|err| GatewayError::InvalidBaseUrl {
                url: self.base.to_string(),
                reason: err.to_string(),
            })
    }

    async fn ask(&self, text: &str) -> Result<AskResponse, GatewayError> {
        let body = serde_json::to_vec(&AskRequest { message: text })
            .map_err(|err| GatewayError::Malformed(err.to_string()))?;
        let request = self
            .client
            .post(self.endpoint("ask")?)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        self.execute(request).await
    }

    async fn load(&self) -> Result<LoadResponse, GatewayError> {
        let request = self.client.post(self.endpoint("load-txt")?);
        self.execute(request).await
    }

    async fn health(&self) -> Result<HealthResponse, GatewayError> {
        let request = self.client.get(self.endpoint("")?);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // The body is only a hint; a broken error body still yields the status.
            let detail = self
                .read_body(response)
                .await
                .ok()
                .and_then(|body| error_detail(&body));
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                detail,
            });
        }

        let body = self.read_body(response).await?;
        serde_json::from_slice(&body).map_err(|err| GatewayError::Malformed(err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, GatewayError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(GatewayError::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(GatewayError::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn send_chat(&self, text: &str) -> GatewayResult {
        match self.ask(text).await {
            Ok(response) => {
                chat_debug!(
                    "ask ok query={} context_chunks={}",
                    preview(response.query.as_deref().unwrap_or(text), 40),
                    response.top_chunks.len()
                );
                GatewayResult::Reply {
                    reply: response.reply,
                }
            }
            Err(err) => {
                chat_warn!("ask failed: {}", err);
                GatewayResult::Failed {
                    kind: err.kind(),
                    message: chat_failure_text(&err),
                }
            }
        }
    }

    async fn trigger_load(&self) -> GatewayResult {
        match self.load().await {
            Ok(response) => GatewayResult::Loaded {
                message: response.message,
            },
            Err(err) => {
                chat_warn!("load-txt failed: {}", err);
                GatewayResult::Failed {
                    kind: err.kind(),
                    message: LOAD_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }

    async fn check_health(&self) -> GatewayResult {
        match self.health().await {
            Ok(response) => GatewayResult::Status {
                status: response.status,
                chunks_loaded: response.chunks_loaded,
            },
            Err(err) => {
                chat_warn!("health check failed: {}", err);
                let message = match &err {
                    GatewayError::Unreachable(_) | GatewayError::Timeout(_) => {
                        WAKING_UP_REPLY.to_string()
                    }
                    other => format!("Error: Backend status unavailable ({}).", other.kind()),
                };
                GatewayResult::Failed {
                    kind: err.kind(),
                    message,
                }
            }
        }
    }
}

/// User-facing reply for a failed chat request.
fn chat_failure_text(err: &GatewayError) -> String {
    match err {
        GatewayError::Unreachable(_) | GatewayError::Timeout(_) => WAKING_UP_REPLY.to_string(),
        GatewayError::HttpStatus { detail, .. } => {
            let detail = detail
                .as_deref()
                .map(|text| text.trim().trim_end_matches('.'))
                .filter(|text| !text.is_empty())
                .unwrap_or(GENERIC_SERVER_ERROR);
            format!("Error: {detail}. Please try again.")
        }
        GatewayError::TooLarge { .. } | GatewayError::Malformed(_) => MALFORMED_REPLY.to_string(),
        // Only raised while the gateway is being built.
        GatewayError::InvalidBaseUrl { .. } | GatewayError::Client(_) | GatewayError::Runtime(_) => {
            WAKING_UP_REPLY.to_string()
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, GatewayError> {
    let invalid = |reason: String| GatewayError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    // Endpoints are joined relative to the base, which needs a trailing slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
