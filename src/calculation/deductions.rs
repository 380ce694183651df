//! Deduction amount calculation.
//!
//! This module turns a single [`DeductionType`] definition into the amount
//! subtracted from an employee's pay.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DeductionKind, DeductionLine, DeductionType};

use super::round_currency;

/// The result of calculating one deduction, including the line and audit step.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The applied deduction line.
    pub line: DeductionLine,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the amount of a deduction for the given basic salary.
///
/// A percentage deduction is `basic_salary * value / 100`; a fixed deduction
/// is `value`. Amounts are rounded to 2 decimal places.
///
/// # Arguments
///
/// * `deduction` - The deduction definition
/// * `basic_salary` - The monthly basic salary percentages apply to
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use hris_engine::calculation::calculate_deduction;
/// use hris_engine::models::{DeductionKind, DeductionType};
/// use rust_decimal::Decimal;
///
/// let epf = DeductionType {
///     id: "epf-default".to_string(),
///     name: "EPF".to_string(),
///     kind: DeductionKind::Percentage,
///     value: Decimal::from(8),
///     is_default: true,
///     is_active: true,
/// };
///
/// let result = calculate_deduction(&epf, Decimal::from(5000), 1);
/// assert_eq!(result.line.amount, Decimal::from(400));
/// ```
pub fn calculate_deduction(
    deduction: &DeductionType,
    basic_salary: Decimal,
    step_number: u32,
) -> DeductionResult {
    let (amount, rule_id, rule_name, reasoning) = match deduction.kind {
        DeductionKind::Percentage => {
            let amount = round_currency(basic_salary * deduction.value / Decimal::ONE_HUNDRED);
            (
                amount,
                "deduction_percentage",
                "Percentage Deduction",
                format!(
                    "{}: {}% of ${} = ${}",
                    deduction.name,
                    deduction.value.normalize(),
                    basic_salary.normalize(),
                    amount
                ),
            )
        }
        DeductionKind::Fixed => {
            let amount = round_currency(deduction.value);
            (
                amount,
                "deduction_fixed",
                "Fixed Deduction",
                format!("{}: fixed amount ${}", deduction.name, amount),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "deduction_id": deduction.id,
            "type": deduction.kind,
            "value": deduction.value.normalize().to_string(),
            "basic_salary": basic_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.to_string()
        }),
        reasoning,
    };

    DeductionResult {
        line: DeductionLine {
            deduction_id: deduction.id.clone(),
            name: deduction.name.clone(),
            kind: deduction.kind,
            value: deduction.value,
            amount,
        },
        audit_step,
    }
}
