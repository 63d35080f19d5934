//! Backend HTTP Client
//!
//! Thin wrapper around `reqwest` configured with the clinic backend's base
//! URL and JSON content type. All facade calls go through the generic
//! helpers here, and every failure is normalized into [`ApiError`].

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Default backend base URL when no configuration is provided
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// HTTP client for the clinic backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. "http://localhost:3000/api")
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The configured backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, path, "GET");

        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response, request_id).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, path, "POST");

        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::decode(response, request_id).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, path, "PUT");

        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::decode(response, request_id).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, path, "DELETE");

        let response = self.http.delete(self.url(path)).send().await?;
        Self::decode(response, request_id).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        request_id: Uuid,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = backend_message(&body);
        tracing::warn!(
            %request_id,
            status = status.as_u16(),
            %message,
            "backend returned an error"
        );

        Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extract the `message`/`error` field from an error body, if it is JSON
fn backend_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.trim().to_string()
}

// ============================================
// Errors
// ============================================

/// Errors from talking to the clinic backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-2xx response, carrying whatever the backend put in the body
    #[error("backend error {status}: {message}")]
    Backend { status: u16, message: String },

    /// Transport-level failure (connection refused, DNS, malformed body)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Human-readable message for inline display.
    ///
    /// Prefers the backend-supplied `message`/`error` field, then the
    /// transport error's own message, then "Unknown error".
    pub fn user_message(&self) -> String {
        let message = match self {
            ApiError::Backend { status, message } => {
                if message.is_empty() {
                    format!("Request failed with status code {status}")
                } else {
                    message.clone()
                }
            }
            ApiError::Transport(e) => e.to_string(),
        };

        if message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/api/");
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(client.url("/patients"), "http://localhost:3000/api/patients");
    }

    #[test]
    fn test_backend_message_prefers_message_field() {
        let body = r#"{ "message": "name is required", "error": "ValidationError" }"#;
        assert_eq!(backend_message(body), "name is required");
    }

    #[test]
    fn test_backend_message_falls_back_to_error_field() {
        let body = r#"{ "error": "Patient not found" }"#;
        assert_eq!(backend_message(body), "Patient not found");
    }

    #[test]
    fn test_backend_message_keeps_plain_text() {
        assert_eq!(backend_message("Internal Server Error"), "Internal Server Error");
        assert_eq!(backend_message(""), "");
    }

    #[test]
    fn test_user_message_surfaces_backend_text() {
        let err = ApiError::Backend {
            status: 400,
            message: "endAt must be after startAt".to_string(),
        };
        assert_eq!(err.user_message(), "endAt must be after startAt");
    }

    #[test]
    fn test_user_message_defaults_for_empty_body() {
        let err = ApiError::Backend {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "Request failed with status code 500");
    }
}
