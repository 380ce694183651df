//! Payroll record models.
//!
//! This module contains the [`PayrollRecord`] stored per employee and month,
//! and the [`DeductionLine`] breakdown attached to generated records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeductionKind;

/// Lifecycle state of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Generated but not yet confirmed.
    Draft,
    /// Confirmed and ready for payment.
    Processed,
    /// Paid out.
    Paid,
}

impl PayrollStatus {
    /// Lower-case name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollStatus::Draft => "draft",
            PayrollStatus::Processed => "processed",
            PayrollStatus::Paid => "paid",
        }
    }
}

/// A single applied deduction within a payroll record.
///
/// # Example
///
/// ```
/// use hris_engine::models::{DeductionKind, DeductionLine};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = DeductionLine {
///     deduction_id: "epf-default".to_string(),
///     name: "EPF".to_string(),
///     kind: DeductionKind::Percentage,
///     value: Decimal::from(8),
///     amount: Decimal::from_str("400.00").unwrap(),
/// };
/// assert_eq!(line.amount, Decimal::from(400));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The id of the deduction definition.
    pub deduction_id: String,
    /// The deduction name at the time of calculation.
    pub name: String,
    /// Percentage or fixed amount.
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    /// The configured value.
    pub value: Decimal,
    /// The amount subtracted from gross pay.
    pub amount: Decimal,
}

/// Payroll for one employee and one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee being paid.
    pub employee_id: String,
    /// Display name of the employee.
    pub employee_name: String,
    /// Month number (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly allowances.
    pub allowances: Decimal,
    /// Total deductions.
    pub deductions: Decimal,
    /// Basic salary + allowances - deductions.
    pub net_salary: Decimal,
    /// Lifecycle state.
    pub status: PayrollStatus,
    /// The date the record was paid.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// The deductions that make up `deductions`.
    #[serde(default)]
    pub deduction_lines: Vec<DeductionLine>,
}

impl PayrollRecord {
    /// Returns true if the record covers the given month and year.
    pub fn is_for_period(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }

    /// Human-readable period, e.g. "October 2023".
    pub fn period_label(&self) -> String {
        period_label(self.month, self.year)
    }
}

/// Formats a month/year pair as "October 2023".
///
/// Out-of-range months fall back to the numeric form "13/2023".
pub fn period_label(month: u32, year: i32) -> String {
    match u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
    {
        Some(m) => format!("{} {}", m.name(), year),
        None => format!("{}/{}", month, year),
    }
}

impl crate::store::Record for PayrollRecord {
    const ENTITY: &'static str = "Payroll record";

    fn id(&self) -> &str {
        &self.id
    }
}
