use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::{
    api::types::ApiError,
    config::{normalize_base_url, Config},
    utils::storage::{SessionStore, StorageError},
};

pub const AUTH_HEADER: &str = "x-auth-token";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::unknown(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: normalize_base_url(&config.api_base_url),
            session,
        })
    }

    pub fn new_with_base_url(base_url: impl AsRef<str>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.as_ref()),
            session,
        }
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn access_token(&self) -> Result<String, ApiError> {
        self.session
            .get_token()
            .map_err(storage_error)?
            .ok_or_else(|| ApiError::unauthorized("Not signed in. Run `leavedesk login` first."))
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        tracing::debug!(
            status = %response.status(),
            url = %response.url(),
            "API response received"
        );
        Ok(response)
    }

    /// A 401 here means the stored token was rejected, so it is dropped.
    /// Unauthenticated calls such as login leave the session alone.
    pub(crate) async fn send_authenticated(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let token = self.access_token()?;
        let response = self.send(request.header(AUTH_HEADER, token)).await?;
        self.handle_unauthorized_status(response.status());
        Ok(response)
    }

    fn handle_unauthorized_status(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Session rejected by the API; clearing stored token");
            self.clear_auth_session();
        }
    }

    pub(crate) fn clear_auth_session(&self) {
        if let Err(err) = self.session.clear() {
            tracing::warn!(error = %err, "Failed to clear stored session");
        }
    }

    pub(crate) async fn map_json_response<T>(&self, response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub(crate) async fn map_empty_response(&self, response: Response) -> Result<(), ApiError> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// The API answers failures either with plain text or with the JSON
    /// error envelope; both end up as an [`ApiError`].
    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error_from_body(status, &body)
    }
}

pub(crate) fn error_from_body(status: StatusCode, body: &str) -> ApiError {
    if let Ok(mut envelope) = serde_json::from_str::<ApiError>(body) {
        if envelope.code == "UNKNOWN" {
            envelope.code = status_code(status);
        }
        return envelope;
    }
    let message = match body.trim() {
        "" => format!("Request failed with status {}", status),
        text => text.trim_matches('"').to_string(),
    };
    ApiError {
        error: message,
        code: status_code(status),
        details: None,
    }
}

fn status_code(status: StatusCode) -> String {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST".to_string(),
        StatusCode::UNAUTHORIZED => "UNAUTHORIZED".to_string(),
        StatusCode::FORBIDDEN => "FORBIDDEN".to_string(),
        StatusCode::NOT_FOUND => "NOT_FOUND".to_string(),
        StatusCode::CONFLICT => "CONFLICT".to_string(),
        other if other.is_server_error() => "SERVER_ERROR".to_string(),
        other => format!("HTTP_{}", other.as_u16()),
    }
}

pub(crate) fn storage_error(err: StorageError) -> ApiError {
    ApiError::unknown(format!("Session storage error: {}", err))
}
