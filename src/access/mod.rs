//! Role-scoped record filtering and section gating.
//!
//! Administrators see every record; employees see only records whose
//! `employee_id` matches the employee their login is linked to.

use serde::{Deserialize, Serialize};

use crate::error::{HrisError, HrisResult};
use crate::models::{AttendanceRecord, LeaveRequest, PayrollRecord, Role, User};

/// A record that belongs to a single employee.
pub trait EmployeeScoped {
    /// The id of the employee owning the record.
    fn employee_id(&self) -> &str;
}

impl EmployeeScoped for AttendanceRecord {
    fn employee_id(&self) -> &str {
        &self.employee_id
    }
}

impl EmployeeScoped for LeaveRequest {
    fn employee_id(&self) -> &str {
        &self.employee_id
    }
}

impl EmployeeScoped for PayrollRecord {
    fn employee_id(&self) -> &str {
        &self.employee_id
    }
}

/// Returns true if `user` may see `record`.
pub fn can_view<T: EmployeeScoped>(record: &T, user: &User) -> bool {
    user.is_admin() || user.employee_id.as_deref() == Some(record.employee_id())
}

/// Filters records down to those visible to `user`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hris_engine::access::visible_records;
/// use hris_engine::models::{LeaveRequest, LeaveStatus, LeaveType, Role, User};
///
/// let date = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
/// let request = |id: &str, employee: &str| LeaveRequest {
///     id: id.to_string(),
///     employee_id: employee.to_string(),
///     employee_name: String::new(),
///     leave_type: LeaveType::Annual,
///     start_date: date,
///     end_date: date,
///     reason: "Trip".to_string(),
///     status: LeaveStatus::Pending,
///     applied_on: date,
/// };
/// let records = vec![request("LR1", "EMP001"), request("LR2", "EMP002")];
///
/// let employee = User {
///     id: "2".to_string(),
///     name: "John Doe".to_string(),
///     email: "employee@company.com".to_string(),
///     role: Role::Employee,
///     avatar: None,
///     employee_id: Some("EMP001".to_string()),
/// };
/// let visible = visible_records(&records, &employee);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].id, "LR1");
/// ```
pub fn visible_records<T: EmployeeScoped + Clone>(records: &[T], user: &User) -> Vec<T> {
    records
        .iter()
        .filter(|record| can_view(*record, user))
        .cloned()
        .collect()
}

/// A navigable area of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Summary statistics.
    Dashboard,
    /// Employee directory.
    Employees,
    /// Attendance tracking.
    Attendance,
    /// Leave requests.
    Leave,
    /// Payroll records.
    Payroll,
    /// Report generation.
    Reports,
    /// Account and deduction settings.
    Settings,
}

/// Sections shown to every role.
const SHARED_SECTIONS: [Section; 5] = [
    Section::Dashboard,
    Section::Attendance,
    Section::Leave,
    Section::Payroll,
    Section::Settings,
];

/// The sections available to a role, in navigation order.
pub fn sections_for(role: Role) -> Vec<Section> {
    match role {
        Role::Admin => vec![
            Section::Dashboard,
            Section::Employees,
            Section::Attendance,
            Section::Leave,
            Section::Payroll,
            Section::Reports,
            Section::Settings,
        ],
        Role::Employee => SHARED_SECTIONS.to_vec(),
    }
}

/// Fails with `Forbidden` unless `user` is an administrator.
pub fn require_admin(user: &User, action: &str) -> HrisResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(HrisError::forbidden(action))
    }
}

/// The employee id linked to `user`, or `NoEmployeeRecord`.
pub fn own_employee_id(user: &User) -> HrisResult<&str> {
    user.employee_id
        .as_deref()
        .ok_or_else(|| HrisError::NoEmployeeRecord {
            user_id: user.id.clone(),
        })
}
