use std::sync::Arc;

use crate::api::{ApiClient, ApiError, LeaveRequestResponse, LeaveStatus};

#[derive(Clone)]
pub struct ManagerRepository {
    client: Arc<ApiClient>,
}

impl ManagerRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_all_requests(&self) -> Result<Vec<LeaveRequestResponse>, ApiError> {
        self.client.list_all_requests().await
    }

    pub async fn update_status(&self, id: &str, status: LeaveStatus) -> Result<(), ApiError> {
        self.client.update_leave_status(id, status).await.map(|_| ())
    }
}
