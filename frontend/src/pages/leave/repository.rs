use std::sync::Arc;

use crate::api::{
    ApiClient, ApiError, CreateLeaveRequest, LeaveBalanceResponse, LeaveRequestResponse,
};

#[derive(Clone)]
pub struct LeaveRepository {
    client: Arc<ApiClient>,
}

impl LeaveRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list_balances(&self) -> Result<Vec<LeaveBalanceResponse>, ApiError> {
        self.client.list_leave_balances().await
    }

    pub async fn list_my_requests(&self) -> Result<Vec<LeaveRequestResponse>, ApiError> {
        self.client.list_my_requests().await
    }

    pub async fn submit_leave(&self, payload: CreateLeaveRequest) -> Result<(), ApiError> {
        self.client.create_leave_request(payload).await.map(|_| ())
    }

    pub async fn cancel_request(&self, id: &str) -> Result<(), ApiError> {
        self.client.cancel_leave_request(id).await
    }
}
