use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{api::types::ApiError, config, utils::storage};

/// Transparent retry budget for idempotent lookups. Connection failures and
/// 5xx responses are retried back to back; there is no backoff policy.
const MAX_GET_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn with_bearer(&self, request: RequestBuilder) -> RequestBuilder {
        match storage::read_access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            Self::clear_auth_session();
            Self::redirect_to_login_if_needed();
        }
    }

    fn clear_auth_session() {
        storage::clear_access_token();
    }

    fn redirect_to_login_if_needed() {
        #[cfg(target_arch = "wasm32")]
        if let Some(window) = web_sys::window() {
            let location = window.location();
            if let Ok(pathname) = location.pathname() {
                if pathname == "/login" {
                    return;
                }
            }
            let _ = location.set_href("/login");
        }
    }

    /// GET with a backoff-free retry loop: connection errors and server
    /// errors are retried up to the attempt budget, everything else is
    /// returned as-is.
    pub(crate) async fn send_get(&self, url: &str) -> Result<Response, ApiError> {
        let mut attempt = 1;
        loop {
            log::debug!("GET {} (attempt {}/{})", url, attempt, MAX_GET_ATTEMPTS);
            let request = self.with_bearer(self.client.get(url));
            match request.send().await {
                Ok(response) if response.status().is_server_error() => {
                    if attempt >= MAX_GET_ATTEMPTS {
                        return Ok(response);
                    }
                    log::warn!("GET {} returned {}, retrying", url, response.status());
                    attempt += 1;
                }
                Ok(response) => return Ok(response),
                Err(err) => {
                    if attempt >= MAX_GET_ATTEMPTS {
                        return Err(ApiError::request_failed(format!("Request failed: {}", err)));
                    }
                    log::warn!("GET {} failed ({}), retrying", url, err);
                    attempt += 1;
                }
            }
        }
    }

    pub(crate) async fn send_post<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        log::debug!("POST {}", url);
        self.with_bearer(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::request_failed(format!("Request failed: {}", err)))
    }

    pub(crate) async fn send_put<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        log::debug!("PUT {}", url);
        self.with_bearer(self.client.put(url))
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::request_failed(format!("Request failed: {}", err)))
    }

    /// Success bodies parse into `T`; failure bodies surface the backend's
    /// JSON payload as the error value so callers can branch on it.
    pub(crate) async fn map_json_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        log::debug!("response status {}", status);
        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|err| ApiError::unknown(format!("Failed to parse response: {}", err)))
        } else {
            Self::handle_unauthorized_status(status);
            let payload = response.json::<Value>().await.ok();
            let error = error_from_payload(status, payload);
            log::error!("request failed: {} ({})", error.error, error.code);
            Err(error)
        }
    }
}

fn error_from_payload(status: StatusCode, payload: Option<Value>) -> ApiError {
    let Some(payload) = payload else {
        return ApiError::request_failed(format!("Request failed with status {}", status));
    };
    if let Ok(error) = serde_json::from_value::<ApiError>(payload.clone()) {
        return error;
    }
    let message = payload
        .get("message")
        .or_else(|| payload.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status));
    ApiError {
        error: message,
        code: status.as_u16().to_string(),
        details: Some(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_payload_prefers_typed_shape() {
        let payload = serde_json::json!({
            "error": "Token expired",
            "code": "AUTH_EXPIRED"
        });
        let error = error_from_payload(StatusCode::UNAUTHORIZED, Some(payload));
        assert_eq!(error.code, "AUTH_EXPIRED");
        assert_eq!(error.error, "Token expired");
    }

    #[test]
    fn error_from_payload_falls_back_to_message_field() {
        let payload = serde_json::json!({ "message": "Driver not found" });
        let error = error_from_payload(StatusCode::NOT_FOUND, Some(payload.clone()));
        assert_eq!(error.error, "Driver not found");
        assert_eq!(error.code, "404");
        assert_eq!(error.details, Some(payload));
    }

    #[test]
    fn error_from_payload_without_body_reports_status() {
        let error = error_from_payload(StatusCode::BAD_GATEWAY, None);
        assert_eq!(error.code, "REQUEST_FAILED");
        assert!(error.error.contains("502"));
    }
}
