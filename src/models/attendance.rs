//! Attendance record model.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Attendance outcome for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Checked in on time.
    Present,
    /// Did not attend.
    Absent,
    /// Checked in after the late threshold.
    Late,
    /// Worked half a day.
    HalfDay,
}

impl AttendanceStatus {
    /// Lower-case name used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::HalfDay => "half_day",
        }
    }
}

/// A single day's attendance for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// Display name of the employee at check-in time.
    pub employee_name: String,
    /// The attendance date.
    pub date: NaiveDate,
    /// Clock time of check-in.
    pub check_in: NaiveTime,
    /// Clock time of check-out, if the employee has left.
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
    /// Attendance status.
    pub status: AttendanceStatus,
    /// Hours between check-in and check-out, set at check-out.
    #[serde(default)]
    pub total_hours: Option<Decimal>,
}

impl AttendanceRecord {
    /// Returns true while the record has no check-out time.
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }
}

impl crate::store::Record for AttendanceRecord {
    const ENTITY: &'static str = "Attendance record";

    fn id(&self) -> &str {
        &self.id
    }
}
