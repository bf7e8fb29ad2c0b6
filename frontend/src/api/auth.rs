use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use super::{
    client::{storage_error, ApiClient},
    types::{ApiError, Claims, LoginRequest, LoginResponse},
};

impl ApiClient {
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        tracing::info!(user = %request.user_name, "Signing in");
        let response = self
            .send(
                self.http_client()
                    .post(self.url("/employee/login"))
                    .json(&request),
            )
            .await?;
        let login_response: LoginResponse = self.map_json_response(response).await?;

        self.session()
            .set_token(&login_response.token)
            .map_err(storage_error)?;
        Ok(login_response)
    }

    /// Signing out only forgets the local token; the API keeps no session.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().clear().map_err(storage_error)
    }

    pub fn current_claims(&self) -> Result<Option<Claims>, ApiError> {
        let token = self.session().get_token().map_err(storage_error)?;
        Ok(token.as_deref().and_then(decode_claims))
    }
}

/// Reads the payload segment of a JWT without verifying its signature.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut parts = token.split('.');
    parts.next()?;
    let payload = parts.next()?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&decoded).ok()
}
