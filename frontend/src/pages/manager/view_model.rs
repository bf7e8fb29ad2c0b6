use super::{
    repository::ManagerRepository,
    types::{pending_requests, Decision, PendingRequest},
};
use crate::api::ApiError;

#[derive(Clone)]
pub struct ManagerViewModel {
    repo: ManagerRepository,
}

impl ManagerViewModel {
    pub fn new(repo: ManagerRepository) -> Self {
        Self { repo }
    }

    pub async fn load(&self) -> Result<Vec<PendingRequest>, ApiError> {
        let requests = self.repo.list_all_requests().await?;
        let pending = pending_requests(&requests);
        tracing::debug!(
            total = requests.len(),
            pending = pending.len(),
            "Loaded team leave requests"
        );
        Ok(pending)
    }

    pub async fn decide(&self, id: &str, decision: Decision) -> Result<(), ApiError> {
        self.repo.update_status(id, decision.status()).await
    }
}
