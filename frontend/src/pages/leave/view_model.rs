use chrono::NaiveDate;
use leavedesk_core::{validate_allocation, AllocationPlan};

use super::{
    repository::LeaveRepository,
    types::{leave_types_from_balances, summarize_requests, LeaveRequestSummary, MyLeaveOverview},
};
use crate::api::{ApiError, Claims, CreateLeaveRequest};

#[derive(Clone)]
pub struct LeaveViewModel {
    repo: LeaveRepository,
}

impl LeaveViewModel {
    pub fn new(repo: LeaveRepository) -> Self {
        Self { repo }
    }

    /// Balances and the employee's own requests, fetched concurrently.
    pub async fn load(&self, claims: Claims) -> Result<MyLeaveOverview, ApiError> {
        let (balances, requests) =
            tokio::try_join!(self.repo.list_balances(), self.repo.list_my_requests())?;
        tracing::debug!(
            leave_types = balances.len(),
            requests = requests.len(),
            "Loaded leave overview"
        );
        Ok(MyLeaveOverview {
            claims,
            leave_types: leave_types_from_balances(&balances),
            requests: summarize_requests(&requests),
        })
    }

    /// Runs the allocation checks for the form input without submitting.
    pub fn preview(
        &self,
        overview: &MyLeaveOverview,
        leave_type: &str,
        from: &str,
        to: &str,
        today: NaiveDate,
    ) -> Result<AllocationPlan, ApiError> {
        let leave_type = overview
            .leave_type(leave_type)
            .ok_or_else(|| ApiError::validation(format!("Unknown leave type \"{}\".", leave_type)))?;
        Ok(validate_allocation(leave_type, from, to, today)?)
    }

    pub async fn submit(&self, plan: &AllocationPlan) -> Result<(), ApiError> {
        self.repo
            .submit_leave(CreateLeaveRequest {
                leave_type: plan.leave_type.api_name(),
                from_date: plan.range.from,
                to_date: plan.range.to,
            })
            .await
    }

    /// The request `id` if it may still be withdrawn.
    pub fn cancellable<'a>(
        &self,
        overview: &'a MyLeaveOverview,
        id: &str,
    ) -> Result<&'a LeaveRequestSummary, ApiError> {
        let request = overview
            .request(id)
            .ok_or_else(|| ApiError::validation(format!("Leave request {} was not found.", id)))?;
        if !request.is_pending() {
            return Err(ApiError::validation(format!(
                "Leave request {} is {} and can no longer be deleted.",
                id,
                request.status.to_lowercase()
            )));
        }
        Ok(request)
    }

    pub async fn cancel(
        &self,
        overview: &MyLeaveOverview,
        id: &str,
    ) -> Result<LeaveRequestSummary, ApiError> {
        let request = self.cancellable(overview, id)?.clone();
        self.repo.cancel_request(id).await?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{decode_claims, test_support::*};
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    async fn mock_overview(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("/leaves"));
                then.status(200).json_body(json!([
                    balance_json("annual", 14.0),
                    balance_json("casual", 2.0),
                    balance_json("sick", 0.0)
                ]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path(api_path("/leaveRequest"));
                then.status(200).json_body(json!([
                    own_request_json(1, "annual", "2023-12-04", "2023-12-08", "approved"),
                    own_request_json(2, "casual", "2024-01-15", "2024-01-15", "pending")
                ]));
            })
            .await;
    }

    fn view_model(server: &MockServer) -> (LeaveViewModel, Claims) {
        let token = employee_token();
        let (client, _) = signed_in_client(server, &token);
        let vm = LeaveViewModel::new(LeaveRepository::new(Arc::new(client)));
        (vm, decode_claims(&token).unwrap())
    }

    #[tokio::test]
    async fn load_builds_the_overview() {
        let server = MockServer::start_async().await;
        mock_overview(&server).await;
        let (vm, claims) = view_model(&server);

        let overview = vm.load(claims).await.unwrap();
        assert_eq!(overview.leave_types.len(), 3);
        assert_eq!(overview.leave_types[0].name, "Annual");
        assert_eq!(overview.requests[0].id, "2");
        assert_eq!(overview.requests[1].duration.formatted, "5 days");
        assert_eq!(overview.requests[1].status, "Approved");
    }

    #[tokio::test]
    async fn preview_and_submit_post_the_lower_case_type() {
        let server = MockServer::start_async().await;
        mock_overview(&server).await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(api_path("/leaveRequest/"))
                    .json_body(json!({
                        "leaveType": "annual",
                        "fromDate": "2024-01-08",
                        "toDate": "2024-01-10"
                    }));
                then.status(200).json_body(json!({ "id": 3 }));
            })
            .await;
        let (vm, claims) = view_model(&server);
        let overview = vm.load(claims).await.unwrap();

        let plan = vm
            .preview(&overview, "Annual", "2024-01-08", "2024-01-10", today())
            .unwrap();
        assert_eq!(plan.duration.formatted, "3 days");
        vm.submit(&plan).await.unwrap();
        create.assert_async().await;
    }

    #[tokio::test]
    async fn preview_reports_validation_messages() {
        let server = MockServer::start_async().await;
        mock_overview(&server).await;
        let (vm, claims) = view_model(&server);
        let overview = vm.load(claims).await.unwrap();

        let err = vm
            .preview(&overview, "sick", "2024-01-08", "2024-01-08", today())
            .unwrap_err();
        assert_eq!(
            err.error,
            "Cannot perform allocation: The leave type \"Sick\" has zero days."
        );

        let err = vm
            .preview(&overview, "casual", "2024-01-08", "2024-01-10", today())
            .unwrap_err();
        assert_eq!(
            err.error,
            "Error during allocation: Cannot allocate 3 days while leave type \"Casual\" has only 2 days."
        );

        let err = vm
            .preview(&overview, "maternity", "2024-01-08", "2024-01-10", today())
            .unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn only_pending_requests_can_be_cancelled() {
        let server = MockServer::start_async().await;
        mock_overview(&server).await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path(api_path("/leaveRequest/2"));
                then.status(200).body("");
            })
            .await;
        let (vm, claims) = view_model(&server);
        let overview = vm.load(claims).await.unwrap();

        let err = vm.cancel(&overview, "1").await.unwrap_err();
        assert!(err.error.contains("approved"));
        assert!(vm.cancel(&overview, "404").await.is_err());

        let cancelled = vm.cancel(&overview, "2").await.unwrap();
        assert_eq!(cancelled.leave_type, "Casual");
        delete.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn decided_requests_are_refused_before_any_delete() {
        let server = MockServer::start_async().await;
        mock_overview(&server).await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path(api_path("/leaveRequest/1"));
                then.status(200).body("");
            })
            .await;
        let (vm, claims) = view_model(&server);
        let overview = vm.load(claims).await.unwrap();

        let err = vm.cancellable(&overview, "1").unwrap_err();
        assert_eq!(
            err.error,
            "Leave request 1 is approved and can no longer be deleted."
        );
        assert_eq!(vm.cancellable(&overview, "2").unwrap().leave_type, "Casual");
        delete.assert_hits_async(0).await;
    }
}
