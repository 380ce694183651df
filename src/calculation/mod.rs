//! Calculation logic for the HRIS engine.
//!
//! This module contains the pure calculation functions behind payroll and
//! time tracking: deduction amounts, net salary with an audit trace, leave
//! day counting against balances, and attendance hours.

mod attendance_hours;
mod deductions;
mod leave_days;
mod net_salary;
mod rounding;

pub use attendance_hours::{attendance_status, calculate_total_hours};
pub use deductions::{DeductionResult, calculate_deduction};
pub use leave_days::{deduct_leave, leave_days};
pub use net_salary::{
    DUPLICATE_DEDUCTION_NAME, NET_SALARY_FLOORED, PayrollInput, calculate_net_salary,
};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency};
