use chrono::NaiveDate;
use leavedesk_core::{leave_duration, title_case, LeaveDuration, LeaveType};

use crate::api::{Claims, LeaveBalanceResponse, LeaveRequestResponse, LeaveStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct LeaveRequestSummary {
    pub id: String,
    pub leave_type: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub status: String,
    pub duration: LeaveDuration,
}

impl LeaveRequestSummary {
    pub fn from_response(value: &LeaveRequestResponse) -> Self {
        Self {
            id: value.id.clone(),
            leave_type: title_case(&value.leave_type),
            from: value.from_date,
            to: value.to_date,
            status: title_case(&value.status),
            duration: leave_duration(value.from_date, value.to_date),
        }
    }

    /// Only requests nobody has decided on yet may be withdrawn.
    pub fn is_pending(&self) -> bool {
        LeaveStatus::from_wire(&self.status) == Some(LeaveStatus::Pending)
    }

    pub fn deletion_summary(&self) -> String {
        format!(
            "Leave type: {}\nLeave duration: {} -> {} ({})",
            self.leave_type, self.from, self.to, self.duration
        )
    }
}

/// Everything the employee's leave page shows.
#[derive(Debug, Clone)]
pub struct MyLeaveOverview {
    pub claims: Claims,
    pub leave_types: Vec<LeaveType>,
    pub requests: Vec<LeaveRequestSummary>,
}

impl MyLeaveOverview {
    pub fn leave_type(&self, name: &str) -> Option<&LeaveType> {
        let name = name.trim();
        self.leave_types
            .iter()
            .find(|leave_type| leave_type.name.eq_ignore_ascii_case(name))
    }

    /// The type preselected in the form: the first one listed.
    pub fn default_leave_type(&self) -> Option<&LeaveType> {
        self.leave_types.first()
    }

    pub fn request(&self, id: &str) -> Option<&LeaveRequestSummary> {
        self.requests.iter().find(|request| request.id == id)
    }
}

pub fn leave_types_from_balances(balances: &[LeaveBalanceResponse]) -> Vec<LeaveType> {
    balances
        .iter()
        .map(|balance| LeaveType::new(title_case(&balance.leave_type), balance.leave_balance))
        .collect()
}

/// Newest first; the API returns requests in creation order.
pub fn summarize_requests(requests: &[LeaveRequestResponse]) -> Vec<LeaveRequestSummary> {
    requests
        .iter()
        .rev()
        .map(LeaveRequestSummary::from_response)
        .collect()
}
