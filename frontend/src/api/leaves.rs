use serde_json::Value;

use super::{
    client::ApiClient,
    types::{
        ApiError, CreateLeaveRequest, LeaveBalanceResponse, LeaveRequestResponse, LeaveStatus,
        UpdateLeaveStatus,
    },
};

impl ApiClient {
    pub async fn list_leave_balances(&self) -> Result<Vec<LeaveBalanceResponse>, ApiError> {
        let response = self
            .send_authenticated(self.http_client().get(self.url("/leaves")))
            .await?;
        self.map_json_response(response).await
    }

    /// Requests filed by the signed-in employee, oldest first.
    pub async fn list_my_requests(&self) -> Result<Vec<LeaveRequestResponse>, ApiError> {
        let response = self
            .send_authenticated(self.http_client().get(self.url("/leaveRequest")))
            .await?;
        self.map_json_response(response).await
    }

    /// Every employee's requests, with the employee and their balances
    /// embedded. Manager-only.
    pub async fn list_all_requests(&self) -> Result<Vec<LeaveRequestResponse>, ApiError> {
        let response = self
            .send_authenticated(
                self.http_client()
                    .get(self.url("/leaveRequest"))
                    .query(&[("getAllLeaveRequests", "true")]),
            )
            .await?;
        self.map_json_response(response).await
    }

    pub async fn create_leave_request(
        &self,
        request: CreateLeaveRequest,
    ) -> Result<Value, ApiError> {
        tracing::info!(
            leave_type = %request.leave_type,
            from = %request.from_date,
            to = %request.to_date,
            "Submitting leave request"
        );
        let response = self
            .send_authenticated(
                self.http_client()
                    .post(self.url("/leaveRequest/"))
                    .json(&request),
            )
            .await?;
        self.map_json_response(response).await
    }

    pub async fn cancel_leave_request(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!(request_id = %id, "Deleting leave request");
        let response = self
            .send_authenticated(
                self.http_client()
                    .delete(self.url(&format!("/leaveRequest/{}", id))),
            )
            .await?;
        self.map_empty_response(response).await
    }

    pub async fn update_leave_status(
        &self,
        id: &str,
        status: LeaveStatus,
    ) -> Result<Value, ApiError> {
        tracing::info!(request_id = %id, status = status.as_str(), "Updating leave request status");
        let response = self
            .send_authenticated(
                self.http_client()
                    .put(self.url(&format!("/leaveRequest/{}", id)))
                    .json(&UpdateLeaveStatus { status }),
            )
            .await?;
        self.map_json_response(response).await
    }
}
