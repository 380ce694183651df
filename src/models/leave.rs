//! Leave request and leave balance models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Annual (vacation) leave.
    Annual,
    /// Sick leave.
    Sick,
    /// Casual leave.
    Casual,
    /// Maternity leave. Not tracked against a balance.
    Maternity,
}

impl LeaveType {
    /// Lower-case name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Casual => "casual",
            LeaveType::Maternity => "maternity",
        }
    }
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

impl LeaveStatus {
    /// Lower-case name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }
}

/// A request for time off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The requesting employee.
    pub employee_id: String,
    /// Display name of the requesting employee.
    pub employee_name: String,
    /// The kind of leave.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason.
    pub reason: String,
    /// Approval state.
    pub status: LeaveStatus,
    /// The date the request was submitted.
    pub applied_on: NaiveDate,
}

/// Payload for submitting a leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLeaveRequest {
    /// The kind of leave.
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason.
    pub reason: String,
}

/// Remaining leave days per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Annual leave days.
    pub annual: u32,
    /// Sick leave days.
    pub sick: u32,
    /// Casual leave days.
    pub casual: u32,
}

impl LeaveBalance {
    /// Returns the bucket tracked for a leave type, if any.
    pub fn bucket(&self, leave_type: LeaveType) -> Option<u32> {
        match leave_type {
            LeaveType::Annual => Some(self.annual),
            LeaveType::Sick => Some(self.sick),
            LeaveType::Casual => Some(self.casual),
            LeaveType::Maternity => None,
        }
    }

    /// Mutable access to the bucket tracked for a leave type, if any.
    pub fn bucket_mut(&mut self, leave_type: LeaveType) -> Option<&mut u32> {
        match leave_type {
            LeaveType::Annual => Some(&mut self.annual),
            LeaveType::Sick => Some(&mut self.sick),
            LeaveType::Casual => Some(&mut self.casual),
            LeaveType::Maternity => None,
        }
    }

    /// Sum of all buckets.
    pub fn total(&self) -> u32 {
        self.annual + self.sick + self.casual
    }
}

impl crate::store::Record for LeaveRequest {
    const ENTITY: &'static str = "Leave request";

    fn id(&self) -> &str {
        &self.id
    }
}
