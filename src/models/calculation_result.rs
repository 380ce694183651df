//! Payroll calculation result models.
//!
//! This module contains the [`PayrollCalculation`] type and its audit
//! structures that capture every output of a net salary calculation,
//! including the applied deduction lines, totals and an audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DeductionLine;

/// One line of a payroll audit trace: gross pay, a deduction, or the net.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// Position in the trace, starting at 1.
    pub step_number: u32,
    /// Machine-readable rule key, e.g. `deduction_percentage`.
    pub rule_id: String,
    /// Display name of the rule.
    pub rule_name: String,
    /// Figures the rule read.
    pub input: serde_json::Value,
    /// Figures the rule produced.
    pub output: serde_json::Value,
    /// The arithmetic in words, e.g. "EPF: 8% of $5000 = $400.00".
    pub reasoning: String,
}

/// Something an administrator should look at before paying out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// Stable code such as `NET_SALARY_FLOORED`.
    pub code: String,
    /// Explanation shown alongside the result.
    pub message: String,
    /// "medium" or "high".
    pub severity: String,
}

/// How a net salary was reached.
///
/// # Example
///
/// ```
/// use hris_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.warnings.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// Steps in evaluation order.
    pub steps: Vec<AuditStep>,
    /// Warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
    /// Wall time spent calculating, in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns true if a warning with the given code was recorded.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// The complete result of a net salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// Random id of this calculation.
    pub calculation_id: Uuid,
    /// UTC time the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// The employee the calculation is for, if any.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly allowances.
    pub allowances: Decimal,
    /// Basic salary plus allowances.
    pub gross_pay: Decimal,
    /// Applied deductions in definition order.
    pub deduction_lines: Vec<DeductionLine>,
    /// Sum of the applied deduction amounts.
    pub total_deductions: Decimal,
    /// Gross pay minus total deductions, floored at zero.
    pub net_salary: Decimal,
    /// Step-by-step record of the arithmetic.
    pub audit_trace: AuditTrace,
}
