//! Dashboard summary statistics.

use serde::{Deserialize, Serialize};

use crate::access::{own_employee_id, visible_records};
use crate::error::HrisResult;
use crate::models::{AttendanceStatus, LeaveStatus, PayrollStatus, User};

use super::HrService;

/// Headline numbers for the dashboard, by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardStats {
    /// Organisation-wide figures.
    Admin {
        /// Employees on file.
        total_employees: usize,
        /// Attendance records with status present.
        present_records: usize,
        /// Approved leave requests.
        approved_leave: usize,
        /// Payroll records not yet paid.
        pending_payroll: usize,
    },
    /// The user's own figures.
    Employee {
        /// The employee's attendance records.
        attendance_records: usize,
        /// The employee's pending leave requests.
        pending_leave: usize,
        /// Leave days remaining across all buckets.
        leave_balance: u32,
    },
}

impl HrService {
    /// Summary statistics for `user`.
    pub async fn dashboard(&self, user: &User) -> HrisResult<DashboardStats> {
        if user.is_admin() {
            let state = self.read().await;
            return Ok(DashboardStats::Admin {
                total_employees: state.employees.len(),
                present_records: state
                    .attendance
                    .all()
                    .iter()
                    .filter(|r| r.status == AttendanceStatus::Present)
                    .count(),
                approved_leave: state
                    .leave_requests
                    .all()
                    .iter()
                    .filter(|r| r.status == LeaveStatus::Approved)
                    .count(),
                pending_payroll: state
                    .payroll
                    .all()
                    .iter()
                    .filter(|r| r.status != PayrollStatus::Paid)
                    .count(),
            });
        }

        let employee_id = own_employee_id(user)?;
        let state = self.read().await;
        Ok(DashboardStats::Employee {
            attendance_records: visible_records(state.attendance.all(), user).len(),
            pending_leave: visible_records(state.leave_requests.all(), user)
                .iter()
                .filter(|r| r.status == LeaveStatus::Pending)
                .count(),
            leave_balance: state.leave_balances.get(employee_id).total(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{admin, employee, service};
    use super::*;

    #[tokio::test]
    async fn test_admin_dashboard_counts_seed() {
        let service = service();
        let stats = service.dashboard(&admin()).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats::Admin {
                total_employees: 2,
                present_records: 2,
                approved_leave: 0,
                pending_payroll: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_employee_dashboard_is_scoped() {
        let service = service();
        let stats = service.dashboard(&employee()).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats::Employee {
                attendance_records: 1,
                pending_leave: 1,
                leave_balance: 28,
            }
        );
    }

    #[tokio::test]
    async fn test_admin_dashboard_tracks_approvals() {
        let service = service();
        service.approve_leave(&admin(), "LR001").await.unwrap();
        service.run_payroll(&admin(), 11, 2023).await.unwrap();

        match service.dashboard(&admin()).await.unwrap() {
            DashboardStats::Admin {
                approved_leave,
                pending_payroll,
                ..
            } => {
                assert_eq!(approved_leave, 1);
                assert_eq!(pending_payroll, 1);
            }
            other => panic!("Expected admin stats, got {:?}", other),
        }
    }

    #[test]
    fn test_stats_serialize_with_role_tag() {
        let stats = DashboardStats::Employee {
            attendance_records: 1,
            pending_leave: 0,
            leave_balance: 28,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["role"], "employee");
        assert_eq!(json["leave_balance"], 28);
    }
}
