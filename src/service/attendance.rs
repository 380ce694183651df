//! Attendance check-in and check-out.

use tracing::info;

use crate::access::{own_employee_id, visible_records};
use crate::calculation::{attendance_status, calculate_total_hours};
use crate::error::{HrisError, HrisResult};
use crate::models::{AttendanceRecord, User};

use super::{HrService, prefixed_id};

impl HrService {
    /// Attendance records visible to `user`.
    pub async fn attendance_records(&self, user: &User) -> HrisResult<Vec<AttendanceRecord>> {
        let state = self.read().await;
        Ok(visible_records(state.attendance.all(), user))
    }

    /// Records today's check-in for the user's employee.
    ///
    /// The status is `Late` after the configured threshold, otherwise
    /// `Present`. A second check-in on the same day fails.
    pub async fn check_in(&self, user: &User) -> HrisResult<AttendanceRecord> {
        let employee_id = own_employee_id(user)?;
        let mut state = self.write().await;

        let now = self.clock.now();
        let today = now.date();
        if state
            .attendance
            .all()
            .iter()
            .any(|r| r.employee_id == employee_id && r.date == today)
        {
            return Err(HrisError::AlreadyCheckedIn {
                employee_id: employee_id.to_string(),
            });
        }

        let employee_name = state
            .employees
            .get(employee_id)
            .map(|e| e.full_name())
            .unwrap_or_else(|| user.name.clone());

        let check_in = now.time();
        let record = AttendanceRecord {
            id: prefixed_id("ATT"),
            employee_id: employee_id.to_string(),
            employee_name,
            date: today,
            check_in,
            check_out: None,
            status: attendance_status(check_in, self.settings.late_after),
            total_hours: None,
        };
        state.attendance.prepend(record.clone());

        info!(employee_id, status = ?record.status, time = %check_in, "checked in");
        Ok(record)
    }

    /// Closes today's open record and derives the hours worked.
    pub async fn check_out(&self, user: &User) -> HrisResult<AttendanceRecord> {
        let employee_id = own_employee_id(user)?;
        let mut state = self.write().await;

        let now = self.clock.now();
        let today = now.date();
        let open = state
            .attendance
            .all()
            .iter()
            .find(|r| r.employee_id == employee_id && r.date == today && r.is_open())
            .cloned()
            .ok_or_else(|| HrisError::NotCheckedIn {
                employee_id: employee_id.to_string(),
            })?;

        let check_out = now.time();
        let total_hours = calculate_total_hours(open.check_in, check_out)?;

        let record = state
            .attendance
            .modify(&open.id, |record| {
                record.check_out = Some(check_out);
                record.total_hours = Some(total_hours);
            })?
            .clone();

        info!(employee_id, %total_hours, "checked out");
        Ok(record)
    }
}
