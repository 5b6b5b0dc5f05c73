//! HTTP client for an Evolution API gateway.

use std::time::{Duration, Instant};

use evolution_common::{Body, GatewayResponse, SendTextRequest};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde_json::Value;
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::error::{Error, Result};

const API_KEY_HEADER: &str = "apikey";

/// HTTP methods the gateway endpoints use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Evolution API client.
///
/// Every call is a single round trip: no retries, no caching, and idle
/// connections are not kept between calls.
#[derive(Debug, Clone)]
pub struct EvolutionClient {
    http_client: Client,
    base_url: String,
    /// `apikey` and `Content-Type`, sent on every request.
    headers: HeaderMap,
    timeout: Duration,
}

impl EvolutionClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let mut api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| Error::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = Client::builder().pool_max_idle_per_host(0).build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `GET /` - gateway liveness.
    pub async fn health(&self) -> Result<GatewayResponse> {
        self.request(Method::Get, "/", None).await
    }

    /// `GET /instance/connectionState/{instance}`.
    pub async fn connection_state(&self, instance: &str) -> Result<GatewayResponse> {
        let path = format!("/instance/connectionState/{}", instance);
        self.request(Method::Get, &path, None).await
    }

    /// `GET /instance/connect/{instance}` - pairing code for a closed session.
    pub async fn connect_instance(&self, instance: &str) -> Result<GatewayResponse> {
        let path = format!("/instance/connect/{}", instance);
        self.request(Method::Get, &path, None).await
    }

    /// `POST /message/sendText/{instance}`.
    ///
    /// Not idempotent: a timeout does not tell whether the message went out.
    pub async fn send_text(
        &self,
        instance: &str,
        number: &str,
        text: &str,
    ) -> Result<GatewayResponse> {
        let path = format!("/message/sendText/{}", instance);
        let body = serde_json::to_value(SendTextRequest::new(number, text))?;
        self.request(Method::Post, &path, Some(&body)).await
    }

    /// Perform one request with the configured timeout.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<GatewayResponse> {
        self.request_with_timeout(method, path, body, self.timeout)
            .await
    }

    /// Perform one request bounded by `timeout`.
    ///
    /// Non-2xx answers are returned as [`Error::HttpStatus`] carrying the
    /// decoded body.
    pub async fn request_with_timeout(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        timeout: Duration,
    ) -> Result<GatewayResponse> {
        let url = self.url(path)?;
        let request_id = Uuid::new_v4();

        let mut request = self
            .http_client
            .request(method.into(), url)
            .timeout(timeout)
            .headers(self.headers.clone());

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let start = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    "Gateway request failed: {}",
                    e
                );
                return Err(Error::Transport(e));
            }
        };

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let elapsed = start.elapsed();
        let response = GatewayResponse::new(status, Body::from_bytes(&bytes), elapsed);

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            duration_ms = %elapsed.as_millis(),
            "Gateway request"
        );

        if !response.is_success() {
            tracing::warn!(
                request_id = %request_id,
                "Gateway returned {} for {} {}",
                status,
                method,
                path
            );
            return Err(Error::HttpStatus(response));
        }

        Ok(response)
    }

    fn url(&self, path: &str) -> Result<Url> {
        let url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }
}
