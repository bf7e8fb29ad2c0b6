use chrono::NaiveDate;
use leavedesk_core::{leave_duration, title_case, LeaveDuration};

use crate::api::{LeaveBalanceResponse, LeaveRequestResponse, LeaveStatus};

const ANNUAL_QUOTA_DAYS: u32 = 14;
const OTHER_QUOTA_DAYS: u32 = 7;

/// Yearly allowance per leave type; the API only reports what remains.
pub fn quota_total(leave_type: &str) -> u32 {
    if leave_type.eq_ignore_ascii_case("annual") {
        ANNUAL_QUOTA_DAYS
    } else {
        OTHER_QUOTA_DAYS
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuotaEntry {
    pub leave_type: String,
    pub remaining: f64,
    pub total: u32,
}

impl QuotaEntry {
    pub fn label(&self) -> String {
        format!("{} {}/{}", self.leave_type, self.remaining, self.total)
    }

    pub fn remaining_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.remaining / f64::from(self.total)).clamp(0.0, 1.0)
    }
}

/// One entry per leave type; a repeated type replaces the earlier value.
pub fn quota_entries(balances: &[LeaveBalanceResponse]) -> Vec<QuotaEntry> {
    let mut entries: Vec<QuotaEntry> = Vec::with_capacity(balances.len());
    for balance in balances {
        let entry = QuotaEntry {
            leave_type: title_case(&balance.leave_type),
            remaining: balance.leave_balance,
            total: quota_total(&balance.leave_type),
        };
        match entries
            .iter_mut()
            .find(|existing| existing.leave_type == entry.leave_type)
        {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }
    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn status(&self) -> LeaveStatus {
        match self {
            Decision::Approve => LeaveStatus::Approved,
            Decision::Reject => LeaveStatus::Rejected,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::Reject => "reject",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub id: String,
    pub employee_name: String,
    pub employee_id: Option<String>,
    pub leave_type: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub duration: LeaveDuration,
    pub quota: Vec<QuotaEntry>,
}

impl PendingRequest {
    pub fn from_response(value: &LeaveRequestResponse) -> Self {
        let (employee_name, quota) = match &value.employee {
            Some(employee) => (employee.full_name(), quota_entries(&employee.leaves)),
            None => ("Unknown employee".to_string(), Vec::new()),
        };
        Self {
            id: value.id.clone(),
            employee_name,
            employee_id: value.employee_id.clone(),
            leave_type: title_case(&value.leave_type),
            from: value.from_date,
            to: value.to_date,
            duration: leave_duration(value.from_date, value.to_date),
            quota,
        }
    }

    pub fn decision_prompt(&self, decision: Decision) -> String {
        format!(
            "Are you sure you want to {} {} {} leave request for {}?",
            decision.verb(),
            self.duration,
            self.leave_type.to_lowercase(),
            self.employee_name
        )
    }
}

pub fn pending_requests(requests: &[LeaveRequestResponse]) -> Vec<PendingRequest> {
    requests
        .iter()
        .filter(|request| request.status() == Some(LeaveStatus::Pending))
        .map(PendingRequest::from_response)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::team_request_json;

    fn response(id: u64, status: &str) -> LeaveRequestResponse {
        serde_json::from_value(team_request_json(
            id,
            ("Sam", "Perera"),
            "annual",
            "2024-01-08",
            "2024-01-16",
            status,
        ))
        .unwrap()
    }

    #[test]
    fn keeps_only_pending_requests() {
        let pending = pending_requests(&[
            response(1, "approved"),
            response(2, "pending"),
            response(3, "rejected"),
        ]);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "2");
        assert_eq!(pending[0].employee_id.as_deref(), Some("102"));
    }

    #[test]
    fn shapes_employee_details_and_quota() {
        let request = PendingRequest::from_response(&response(2, "pending"));
        assert_eq!(request.employee_name, "Sam Perera");
        assert_eq!(request.leave_type, "Annual");
        assert_eq!(request.duration.formatted, "7 days");
        assert_eq!(
            request.quota,
            vec![
                QuotaEntry {
                    leave_type: "Annual".into(),
                    remaining: 10.0,
                    total: 14
                },
                QuotaEntry {
                    leave_type: "Casual".into(),
                    remaining: 4.0,
                    total: 7
                },
                QuotaEntry {
                    leave_type: "Sick".into(),
                    remaining: 7.0,
                    total: 7
                },
            ]
        );
        assert_eq!(request.quota[0].label(), "Annual 10/14");
        assert_eq!(request.quota[2].remaining_ratio(), 1.0);
    }

    #[test]
    fn prompts_mention_days_type_and_employee() {
        let request = PendingRequest::from_response(&response(2, "pending"));
        assert_eq!(
            request.decision_prompt(Decision::Approve),
            "Are you sure you want to approve 7 days annual leave request for Sam Perera?"
        );
        assert_eq!(Decision::Reject.status(), LeaveStatus::Rejected);
    }

    #[test]
    fn repeated_leave_types_keep_the_last_balance() {
        let entries = quota_entries(&[
            LeaveBalanceResponse {
                leave_type: "annual".into(),
                leave_balance: 3.0,
            },
            LeaveBalanceResponse {
                leave_type: "annual".into(),
                leave_balance: 5.0,
            },
        ]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].remaining, 5.0);
    }
}
