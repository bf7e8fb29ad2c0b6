//! Client-side checks run before a leave request is submitted.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::calendar::{is_business_day, DateField, DateFieldError, LeaveRange};
use crate::duration::{format_balance, LeaveDuration};

/// A leave category together with the business days still available in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveType {
    pub name: String,
    pub balance: f64,
}

impl LeaveType {
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }

    pub fn has_balance(&self) -> bool {
        self.balance > 0.0
    }

    pub fn formatted_balance(&self) -> String {
        format_balance(self.balance)
    }

    /// The API keys leave types by their lower-case name.
    pub fn api_name(&self) -> String {
        self.name.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("Cannot perform allocation: The leave type \"{leave_type}\" has zero days.")]
    ZeroBalance { leave_type: String },
    #[error("Cannot perform allocation: {0}")]
    InvalidDate(#[from] DateFieldError),
    #[error("Error during allocation: The date contained in \"Leave from\" cannot be same or earlier than current date.")]
    NotInFuture { from: NaiveDate, today: NaiveDate },
    #[error("Error during allocation: The date contained in \"{field}\" is on a weekend.")]
    Weekend { field: DateField, date: NaiveDate },
    #[error("Error during allocation: The date contained in \"Leave to\" cannot be earlier than \"Leave from\".")]
    InvalidRange { range: LeaveRange, days: i64 },
    #[error("Error during allocation: Cannot allocate {requested} while leave type \"{leave_type}\" has only {available}.")]
    InsufficientBalance {
        leave_type: String,
        requested: LeaveDuration,
        available: String,
    },
}

impl AllocationError {
    /// Stable identifier for the failed check.
    pub fn code(&self) -> &'static str {
        match self {
            AllocationError::ZeroBalance { .. } => "ZERO_BALANCE",
            AllocationError::InvalidDate(_) => "INVALID_DATE",
            AllocationError::NotInFuture { .. } => "NOT_IN_FUTURE",
            AllocationError::Weekend { .. } => "WEEKEND",
            AllocationError::InvalidRange { .. } => "INVALID_RANGE",
            AllocationError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
        }
    }
}

/// A request that passed every check and is ready to be confirmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationPlan {
    pub leave_type: LeaveType,
    pub range: LeaveRange,
    pub duration: LeaveDuration,
}

impl AllocationPlan {
    pub fn summary(&self) -> String {
        format!(
            "Leave type: {}\nLeave duration: {} -> {} ({})",
            self.leave_type.name, self.range.from, self.range.to, self.duration
        )
    }
}

/// Validates a leave request in the order the form reports problems:
/// balance, date syntax, start in the future, weekend endpoints, range
/// direction, and finally the remaining balance.
pub fn validate_allocation(
    leave_type: &LeaveType,
    from: &str,
    to: &str,
    today: NaiveDate,
) -> Result<AllocationPlan, AllocationError> {
    if !leave_type.has_balance() {
        return Err(AllocationError::ZeroBalance {
            leave_type: leave_type.name.clone(),
        });
    }

    let range = LeaveRange::parse(from, to)?;
    if range.from <= today {
        return Err(AllocationError::NotInFuture {
            from: range.from,
            today,
        });
    }

    for (field, date) in [(DateField::From, range.from), (DateField::To, range.to)] {
        if !is_business_day(date) {
            return Err(AllocationError::Weekend { field, date });
        }
    }

    let duration = range.duration();
    if !duration.is_allocatable() {
        return Err(AllocationError::InvalidRange {
            range,
            days: duration.days,
        });
    }

    if duration.days as f64 > leave_type.balance {
        return Err(AllocationError::InsufficientBalance {
            leave_type: leave_type.name.clone(),
            requested: duration,
            available: leave_type.formatted_balance(),
        });
    }

    Ok(AllocationPlan {
        leave_type: leave_type.clone(),
        range,
        duration,
    })
}
