//! Domain models for the HRIS engine.
//!
//! This module contains the core data structures: employees, attendance,
//! leave, payroll, deductions, reports, users and notifications.

mod attendance;
mod calculation_result;
mod deduction;
mod employee;
mod leave;
mod notification;
mod payroll;
mod report;
mod user;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, PayrollCalculation};
pub use deduction::{DeductionKind, DeductionPatch, DeductionType, NewDeduction};
pub use employee::{Compensation, Employee, EmployeePatch, EmployeeStatus, NewEmployee};
pub use leave::{LeaveBalance, LeaveRequest, LeaveStatus, LeaveType, NewLeaveRequest};
pub use notification::Notification;
pub use payroll::{DeductionLine, PayrollRecord, PayrollStatus, period_label};
pub use report::{ReportConfig, ReportDownload, ReportFormat, ReportType};
pub use user::{Role, Session, User};
