use super::{ApiRequest, FetchError};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Performs a prepared request and returns the parsed JSON body.
///
/// Implementations hold no per-request state; every call is independent.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch(&self, request: &ApiRequest) -> Result<Value, FetchError>;
}

/// [`ResourceFetcher`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, request: &ApiRequest) -> Result<Value, FetchError> {
        let mut builder = self
            .http
            .get(&request.url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &request.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(url = %request.url, error = %e, "Request failed");
            FetchError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = server_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            warn!(url = %request.url, status = status.as_u16(), %message, "Backend rejected request");
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(url = %request.url, status = status.as_u16(), bytes = body.len(), "Response received");
        Ok(serde_json::from_str(&body)?)
    }
}

/// Extracts `message` (or `error.message`, or a string `error`) from an error body.
fn server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let candidates = [
        json.get("message"),
        json.get("error").and_then(|e| e.get("message")),
        json.get("error"),
    ];
    let message = candidates
        .into_iter()
        .find_map(|c| c.and_then(Value::as_str))
        .map(str::to_owned);
    message
}
