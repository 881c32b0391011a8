//! Shared HTTP plumbing for schedule providers.
//!
//! Every provider call goes through [`fetch_json`], which maps transport
//! failures, HTTP status codes and JSON decoding errors onto
//! [`ProviderError`], always tagged with the endpoint that was called.
//! Nothing here retries.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Number of response body characters kept in JSON error messages.
const BODY_EXCERPT_CHARS: usize = 500;

/// Errors from talking to a third-party provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, connection refused, etc.)
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete before the client timeout
    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// Invalid credentials or expired token
    #[error("unauthorized by {endpoint} (check credentials)")]
    Unauthorized { endpoint: String },

    /// Rate limited by the provider
    #[error("rate limited by {endpoint}")]
    RateLimited { endpoint: String },

    /// Provider returned a non-success status code
    #[error("{endpoint} returned {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// Response body was not the JSON we expected
    #[error("JSON parse error from {endpoint}: {message}")]
    Json {
        endpoint: String,
        message: String,
        body: Option<String>,
    },

    /// Client could not be constructed from its configuration
    #[error("invalid provider configuration: {0}")]
    Config(String),
}

impl ProviderError {
    fn from_reqwest(endpoint: String, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ProviderError::Timeout { endpoint }
        } else {
            ProviderError::Http { endpoint, source }
        }
    }
}

/// Send a request and decode its JSON response body.
pub async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ProviderError> {
    let (endpoint, body) = fetch_body(request).await?;
    match body {
        Some(body) => decode_json(&endpoint, &body),
        None => Err(ProviderError::Json {
            endpoint,
            message: "empty response body".to_string(),
            body: None,
        }),
    }
}

/// Like [`fetch_json`], but a `204 No Content` or empty body yields `None`.
pub async fn fetch_optional_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<Option<T>, ProviderError> {
    let (endpoint, body) = fetch_body(request).await?;
    body.map(|body| decode_json(&endpoint, &body)).transpose()
}

/// Send a request, map failure statuses, and return the endpoint label
/// together with the body (`None` when there is no content).
async fn fetch_body(request: RequestBuilder) -> Result<(String, Option<String>), ProviderError> {
    let (http, request) = request.build_split();
    let request = request.map_err(|e| ProviderError::Config(e.to_string()))?;
    let endpoint = format!("{} {}", request.method(), request.url());

    debug!(%endpoint, "calling provider");

    let response = http
        .execute(request)
        .await
        .map_err(|e| ProviderError::from_reqwest(endpoint.clone(), e))?;

    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ProviderError::Unauthorized { endpoint });
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ProviderError::RateLimited { endpoint });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            endpoint,
            status: status.as_u16(),
            message: body.chars().take(BODY_EXCERPT_CHARS).collect(),
        });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok((endpoint, None));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::from_reqwest(endpoint.clone(), e))?;

    if body.trim().is_empty() {
        return Ok((endpoint, None));
    }

    Ok((endpoint, Some(body)))
}

/// Decode a response body, keeping an excerpt of it on failure.
pub fn decode_json<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Json {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
        body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
    })
}

/// Build a reqwest client with the given timeout and default headers.
pub fn build_http_client(
    timeout_secs: u64,
    headers: reqwest::header::HeaderMap,
) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ProviderError::Config(e.to_string()))
}
