// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Low-level client for the Ativvo REST API.
//!
//! Handles:
//! - Bearer token attachment
//! - JSON request/response bodies
//! - Error body normalization (`{error}` → raw text → status text)

use crate::config::Config;
use crate::error::{AppError, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Ativvo API client. Cheap to clone; the connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured base URL.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute URL from an API path such as `/events/by-date`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T> {
        self.request_json::<(), T>(Method::GET, path, token, &[], None)
            .await
    }

    /// GET a JSON resource with query parameters.
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.request_json::<(), T>(Method::GET, path, token, query, None)
            .await
    }

    /// POST a JSON body and parse the JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T> {
        self.request_json(Method::POST, path, token, &[], Some(body))
            .await
    }

    /// PUT a JSON body and parse the JSON response.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T> {
        self.request_json(Method::PUT, path, token, &[], Some(body))
            .await
    }

    /// POST a JSON body, ignoring any response body.
    pub async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<()> {
        let response = self
            .build(Method::POST, path, token, &[])
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        check_response(response).await?;
        Ok(())
    }

    /// PATCH without a body and parse the JSON response.
    pub async fn patch_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        self.request_json::<(), T>(Method::PATCH, path, token, &[], None)
            .await
    }

    /// DELETE and parse the JSON response.
    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T> {
        self.request_json::<(), T>(Method::DELETE, path, token, &[], None)
            .await
    }

    /// Generic request with an optional JSON body and a JSON response.
    async fn request_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T> {
        let mut request = self.build(method.clone(), path, token, query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        tracing::debug!(%method, path, status = %response.status(), "API response");
        check_response_json(response).await
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> reqwest::RequestBuilder {
        let mut request = self.http.request(method, self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
    }
}

/// Percent-encode an id for use as a path segment.
pub fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Check response status and return a normalized error if not successful.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = normalize_error_body(status, &body);

    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!("Ativvo API rate limit hit (429)");
    }

    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Check response and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_response(response).await?;
    response
        .json()
        .await
        .map_err(|e| AppError::Network(format!("JSON parse error: {}", e)))
}

/// Turn an error body into a single message.
///
/// Order: JSON `error` field, the JSON text itself, the raw body text, the
/// HTTP status text, and finally "Unknown error".
pub fn normalize_error_body(status: StatusCode, body: &str) -> String {
    if let Ok(data) = serde_json::from_str::<serde_json::Value>(body) {
        return match data.get("error") {
            Some(serde_json::Value::String(msg)) if !msg.is_empty() => msg.clone(),
            Some(serde_json::Value::Null) | Some(serde_json::Value::String(_)) | None => {
                data.to_string()
            }
            Some(other) => other.to_string(),
        };
    }

    if !body.trim().is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .map(String::from)
        .unwrap_or_else(|| "Unknown error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prefers_error_field() {
        let msg = normalize_error_body(StatusCode::BAD_REQUEST, r#"{"error":"Email already used"}"#);
        assert_eq!(msg, "Email already used");
    }

    #[test]
    fn test_normalize_falls_back_to_json_text() {
        let msg = normalize_error_body(StatusCode::BAD_REQUEST, r#"{"error":""}"#);
        assert_eq!(msg, r#"{"error":""}"#);

        let msg = normalize_error_body(StatusCode::BAD_REQUEST, r#"{"detail":"nope"}"#);
        assert_eq!(msg, r#"{"detail":"nope"}"#);
    }

    #[test]
    fn test_normalize_falls_back_to_text_then_status() {
        let msg = normalize_error_body(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(msg, "upstream down");

        let msg = normalize_error_body(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(msg, "Service Unavailable");

        let odd = StatusCode::from_u16(599).unwrap();
        assert_eq!(normalize_error_body(odd, ""), "Unknown error");
    }

    #[test]
    fn test_path_segment_encodes() {
        assert_eq!(path_segment("abc-123"), "abc-123");
        assert_eq!(path_segment("a/b c"), "a%2Fb%20c");
    }
}
