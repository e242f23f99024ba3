use std::sync::Mutex;

use rand::{distributions::Alphanumeric, Rng};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::BookingError;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
}

/// What a backend call resolves to once the transport has done its job.
/// Callers branch on `status`; error mapping stays with them.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

/// Authenticated HTTP transport for the booking backend.
///
/// Attaches the bearer credential to every call. On an authentication
/// failure the credential is refreshed once and the original request retried
/// exactly once; any further failure surfaces to the caller. Mutating
/// requests carry an idempotency key so a retry after a committed transition
/// is not replayed as a duplicate transition.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Mutex<String>,
    refresh_token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, access_token: &str, refresh_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: Mutex::new(access_token.to_string()),
            refresh_token: refresh_token.to_string(),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, BookingError> {
        let idempotency_key = if method == Method::GET {
            None
        } else {
            Some(idempotency_key())
        };

        let response = self
            .send(&method, path, body.as_ref(), idempotency_key.as_deref())
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return into_api_response(response).await;
        }

        // One refresh, one retry of the original request, then fail fast.
        self.refresh_credential().await?;
        let retried = self
            .send(&method, path, body.as_ref(), idempotency_key.as_deref())
            .await?;
        into_api_response(retried).await
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        idempotency_key: Option<&str>,
    ) -> Result<reqwest::Response, BookingError> {
        let token = self.access_token.lock().unwrap().clone();
        let mut request = self
            .http
            .request(method.clone(), format!("{}{}", self.base_url, path))
            .header("Authorization", format!("Bearer {}", token));

        if let Some(key) = idempotency_key {
            request = request.header("Idempotency-Key", key);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request
            .send()
            .await
            .map_err(|err| BookingError::Transport(err.to_string()))
    }

    async fn refresh_credential(&self) -> Result<(), BookingError> {
        log::info!("Access token rejected; refreshing credential");

        let response = self
            .http
            .post(format!("{}/api/auth/refresh", self.base_url))
            .json(&json!({ "refresh_token": self.refresh_token }))
            .send()
            .await
            .map_err(|err| BookingError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(BookingError::Transport(format!(
                "Credential refresh failed with status {}",
                response.status()
            )));
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|err| BookingError::Transport(err.to_string()))?;
        *self.access_token.lock().unwrap() = refreshed.access_token;
        Ok(())
    }
}

async fn into_api_response(response: reqwest::Response) -> Result<ApiResponse, BookingError> {
    let status = response.status().as_u16();
    // Empty or non-JSON bodies are legal for some endpoints.
    let data = response.json::<Value>().await.unwrap_or(Value::Null);
    Ok(ApiResponse { status, data })
}

fn idempotency_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idempotency_key_shape() {
        let key = idempotency_key();
        assert_eq!(key.len(), 16);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("https://api.tourbook.app/", "token", "refresh");
        assert_eq!(client.base_url, "https://api.tourbook.app");
    }
}
