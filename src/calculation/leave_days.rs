//! Leave day counting and balance deduction.

use chrono::NaiveDate;

use crate::error::{HrisError, HrisResult};
use crate::models::{LeaveBalance, LeaveType};

/// Counts the calendar days between two dates, inclusive of both ends.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hris_engine::calculation::leave_days;
///
/// let start = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2023, 11, 5).unwrap();
/// assert_eq!(leave_days(start, end).unwrap(), 5);
/// ```
pub fn leave_days(start: NaiveDate, end: NaiveDate) -> HrisResult<u32> {
    let span = (end - start).num_days();
    if span < 0 {
        return Err(HrisError::validation(
            "end_date",
            "cannot be before the start date",
        ));
    }
    u32::try_from(span + 1).map_err(|_| HrisError::validation("end_date", "leave span is too long"))
}

/// Returns the balance after taking `days` of `leave_type`.
///
/// Maternity leave has no bucket and leaves the balance unchanged.
pub fn deduct_leave(
    balance: LeaveBalance,
    leave_type: LeaveType,
    days: u32,
) -> HrisResult<LeaveBalance> {
    let mut updated = balance;
    if let Some(bucket) = updated.bucket_mut(leave_type) {
        if *bucket < days {
            return Err(HrisError::InsufficientLeaveBalance {
                leave_type: leave_type.as_str().to_string(),
                requested: days,
                available: *bucket,
            });
        }
        *bucket -= days;
    }
    Ok(updated)
}
