//! Attendance hours and lateness.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::error::{HrisError, HrisResult};
use crate::models::AttendanceStatus;

use super::round_currency;

/// Hours worked between check-in and check-out, rounded to 2 decimal places.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use hris_engine::calculation::calculate_total_hours;
/// use rust_decimal::Decimal;
///
/// let check_in = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let check_out = NaiveTime::from_hms_opt(17, 30, 0).unwrap();
/// assert_eq!(calculate_total_hours(check_in, check_out).unwrap(), Decimal::new(850, 2));
/// ```
pub fn calculate_total_hours(check_in: NaiveTime, check_out: NaiveTime) -> HrisResult<Decimal> {
    if check_out < check_in {
        return Err(HrisError::validation(
            "check_out",
            "cannot be before check-in",
        ));
    }
    let seconds = (check_out - check_in).num_seconds();
    Ok(round_currency(Decimal::from(seconds) / Decimal::from(3600)))
}

/// `Late` when checking in strictly after `late_after`, otherwise `Present`.
pub fn attendance_status(check_in: NaiveTime, late_after: NaiveTime) -> AttendanceStatus {
    if check_in > late_after {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}
