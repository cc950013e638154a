//! JSON fetch capability used by the loader and the edit submitter.

use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;

use crate::config::ViewerConfig;

pub const JSON_UTF8: &str = "application/json; charset=UTF-8";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{reason} (HTTP {code})")]
    Status { code: u16, reason: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("response is not valid JSON: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn status(code: StatusCode) -> Self {
        Self::Status {
            code: code.as_u16(),
            reason: code.canonical_reason().unwrap_or("Unknown Status").to_string(),
        }
    }
}

/// Resolve a possibly relative record URL against the page it was listed on.
pub fn resolve(base: &Url, reference: &str) -> Result<Url, FetchError> {
    base.join(reference).map_err(|e| FetchError::InvalidUrl {
        url: reference.to_string(),
        reason: e.to_string(),
    })
}

pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Trait for the host's HTTP capability.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and decode the body as JSON.
    async fn get_json(&self, url: &Url) -> Result<Value, FetchError>;

    /// PUT an already-serialized JSON body to `url`. The response body is ignored.
    async fn put_json(&self, url: &Url, body: String) -> Result<(), FetchError>;
}

/// `reqwest`-backed transport talking to a Sumatra server.
pub struct HttpTransport {
    client: Client,
    credentials: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(config: &ViewerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .user_agent(config.http.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let credentials = config
            .auth
            .username
            .clone()
            .map(|user| (user, config.auth.password.clone().unwrap_or_default()));
        Ok(Self {
            client,
            credentials,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some((user, password)) => request.basic_auth(user, Some(password)),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &Url) -> Result<Value, FetchError> {
        tracing::debug!(%url, "GET");
        let request = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(status));
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn put_json(&self, url: &Url, body: String) -> Result<(), FetchError> {
        tracing::debug!(%url, bytes = body.len(), "PUT");
        let request = self
            .client
            .put(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))
            .body(body);
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(status));
        }
        Ok(())
    }
}
