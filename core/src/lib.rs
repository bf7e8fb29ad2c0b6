//! Domain logic shared by every leavedesk surface.
//!
//! Nothing in this crate performs I/O: callers hand in already-fetched data
//! (and the current date) and get plain values back.

pub mod allocation;
pub mod calendar;
pub mod duration;
pub mod text;

pub use allocation::{validate_allocation, AllocationError, AllocationPlan, LeaveType};
pub use calendar::{
    checked_leave_duration, count_business_days, is_business_day, iso_weekday, leave_duration,
    week_start, DateField, DateFieldError, LeaveRange, RangeError,
};
pub use duration::{format_balance, format_days, LeaveDuration};
pub use text::title_case;
