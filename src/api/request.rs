//! Request types for the HRIS API.
//!
//! Record payloads reuse the model types directly
//! ([`NewEmployee`](crate::models::NewEmployee),
//! [`NewLeaveRequest`](crate::models::NewLeaveRequest), ...); this module
//! holds the bodies and queries that have no model counterpart.

use serde::{Deserialize, Serialize};

use crate::models::{ReportFormat, ReportType};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Body of `POST /auth/reset-password`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// The address to send the reset link to.
    pub email: String,
}

/// Query of `GET /employees`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    /// Case-insensitive match on first name, last name or email.
    #[serde(default)]
    pub search: Option<String>,
}

/// Body of `POST /payroll/run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPayrollRequest {
    /// Month number (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Body of `POST /reports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    /// The data set to report on.
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// The output format.
    pub format: ReportFormat,
}
