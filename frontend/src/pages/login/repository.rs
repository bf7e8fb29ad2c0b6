use std::sync::Arc;

use crate::api::{ApiClient, ApiError, Claims, LoginRequest};

#[derive(Clone)]
pub struct LoginRepository {
    client: Arc<ApiClient>,
}

impl LoginRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<(), ApiError> {
        self.client.login(request).await.map(|_| ())
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.logout()
    }

    pub fn current_claims(&self) -> Result<Option<Claims>, ApiError> {
        self.client.current_claims()
    }
}
