//! Net salary calculation.
//!
//! `net_salary = basic_salary + allowances - sum(deduction amounts)`, with
//! inactive deductions excluded and the result floored at zero.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HrisError, HrisResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DeductionKind, DeductionType, PayrollCalculation,
};

use super::calculate_deduction;

/// Warning code recorded when deductions exceed gross pay.
pub const NET_SALARY_FLOORED: &str = "NET_SALARY_FLOORED";

/// Warning code recorded when two active deductions share a name.
pub const DUPLICATE_DEDUCTION_NAME: &str = "DUPLICATE_DEDUCTION_NAME";

/// Pay figures for one employee and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The employee being calculated, if any.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly allowances.
    #[serde(default)]
    pub allowances: Decimal,
}

/// Rejects negative amounts and active percentage deductions above 100%.
fn validate_input(input: &PayrollInput, deductions: &[DeductionType]) -> HrisResult<()> {
    if input.basic_salary < Decimal::ZERO {
        return Err(HrisError::InvalidPayrollInput {
            message: format!("basic salary cannot be negative ({})", input.basic_salary),
        });
    }
    if input.allowances < Decimal::ZERO {
        return Err(HrisError::InvalidPayrollInput {
            message: format!("allowances cannot be negative ({})", input.allowances),
        });
    }
    if let Some(negative) = deductions.iter().find(|d| d.value < Decimal::ZERO) {
        return Err(HrisError::InvalidPayrollInput {
            message: format!("deduction '{}' has a negative value", negative.name),
        });
    }

    let cumulative_percentage: Decimal = deductions
        .iter()
        .filter(|d| d.is_active && d.kind == DeductionKind::Percentage)
        .map(|d| d.value)
        .sum();
    if cumulative_percentage > Decimal::ONE_HUNDRED {
        return Err(HrisError::InvalidPayrollInput {
            message: format!(
                "active percentage deductions total {}%, above 100%",
                cumulative_percentage.normalize()
            ),
        });
    }

    Ok(())
}

/// Calculates net salary from pay figures and deduction definitions.
///
/// # Arguments
///
/// * `input` - Basic salary and allowances
/// * `deductions` - Deduction definitions; inactive ones are skipped
///
/// # Returns
///
/// Returns a [`PayrollCalculation`] with the applied deduction lines, totals
/// and an audit trace, or `InvalidPayrollInput` for malformed input.
///
/// # Examples
///
/// ```
/// use hris_engine::calculation::{calculate_net_salary, PayrollInput};
/// use hris_engine::models::{DeductionKind, DeductionType};
/// use rust_decimal::Decimal;
///
/// let deductions = vec![
///     DeductionType {
///         id: "epf".to_string(),
///         name: "EPF".to_string(),
///         kind: DeductionKind::Percentage,
///         value: Decimal::from(8),
///         is_default: true,
///         is_active: true,
///     },
///     DeductionType {
///         id: "loan".to_string(),
///         name: "Loan".to_string(),
///         kind: DeductionKind::Fixed,
///         value: Decimal::from(200),
///         is_default: false,
///         is_active: true,
///     },
/// ];
/// let input = PayrollInput {
///     employee_id: None,
///     basic_salary: Decimal::from(5000),
///     allowances: Decimal::from(500),
/// };
///
/// let result = calculate_net_salary(&input, &deductions).unwrap();
/// assert_eq!(result.net_salary, Decimal::from(4900));
/// ```
pub fn calculate_net_salary(
    input: &PayrollInput,
    deductions: &[DeductionType],
) -> HrisResult<PayrollCalculation> {
    let start_time = Instant::now();
    validate_input(input, deductions)?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let gross_pay = input.basic_salary + input.allowances;
    steps.push(AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "basic_salary": input.basic_salary.normalize().to_string(),
            "allowances": input.allowances.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string()
        }),
        reasoning: format!(
            "${} basic + ${} allowances = ${}",
            input.basic_salary.normalize(),
            input.allowances.normalize(),
            gross_pay.normalize()
        ),
    });
    step_number += 1;

    let mut deduction_lines = Vec::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    for deduction in deductions {
        if !deduction.is_active {
            steps.push(AuditStep {
                step_number,
                rule_id: "deduction_excluded".to_string(),
                rule_name: "Inactive Deduction".to_string(),
                input: serde_json::json!({
                    "deduction_id": deduction.id,
                    "is_active": false
                }),
                output: serde_json::json!({ "amount": "0" }),
                reasoning: format!("{} is inactive - not applied", deduction.name),
            });
            step_number += 1;
            continue;
        }

        if !seen_names.insert(deduction.name.trim().to_lowercase()) {
            warnings.push(AuditWarning {
                code: DUPLICATE_DEDUCTION_NAME.to_string(),
                message: format!(
                    "More than one active deduction is named '{}'; each is applied",
                    deduction.name
                ),
                severity: "medium".to_string(),
            });
        }

        let result = calculate_deduction(deduction, input.basic_salary, step_number);
        steps.push(result.audit_step);
        deduction_lines.push(result.line);
        step_number += 1;
    }

    let total_deductions: Decimal = deduction_lines.iter().map(|l| l.amount).sum();
    let uncapped = gross_pay - total_deductions;
    let net_salary = if uncapped < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: NET_SALARY_FLOORED.to_string(),
            message: format!(
                "Deductions ${} exceed gross pay ${}; net salary set to zero",
                total_deductions, gross_pay
            ),
            severity: "high".to_string(),
        });
        Decimal::ZERO
    } else {
        uncapped
    };

    steps.push(AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_salary": net_salary.normalize().to_string(),
            "floored": uncapped < Decimal::ZERO
        }),
        reasoning: format!(
            "${} gross - ${} deductions = ${}",
            gross_pay.normalize(),
            total_deductions.normalize(),
            net_salary.normalize()
        ),
    });

    Ok(PayrollCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        employee_id: input.employee_id.clone(),
        basic_salary: input.basic_salary,
        allowances: input.allowances,
        gross_pay,
        deduction_lines,
        total_deductions,
        net_salary,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn deduction(id: &str, name: &str, kind: DeductionKind, value: &str) -> DeductionType {
        DeductionType {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            value: dec(value),
            is_default: false,
            is_active: true,
        }
    }

    fn input(basic: &str, allowances: &str) -> PayrollInput {
        PayrollInput {
            employee_id: Some("EMP001".to_string()),
            basic_salary: dec(basic),
            allowances: dec(allowances),
        }
    }

    #[test]
    fn test_percentage_and_fixed_deductions() {
        let deductions = vec![
            deduction("epf", "EPF", DeductionKind::Percentage, "8"),
            deduction("loan", "Loan", DeductionKind::Fixed, "200"),
        ];

        let result = calculate_net_salary(&input("5000", "500"), &deductions).unwrap();

        assert_eq!(result.gross_pay, dec("5500"));
        assert_eq!(result.total_deductions, dec("600"));
        assert_eq!(result.net_salary, dec("4900"));
        assert_eq!(result.deduction_lines.len(), 2);
        assert_eq!(result.employee_id.as_deref(), Some("EMP001"));
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_no_deductions_net_equals_gross() {
        let result = calculate_net_salary(&input("3000", "250"), &[]).unwrap();
        assert_eq!(result.net_salary, dec("3250"));
        assert_eq!(result.total_deductions, Decimal::ZERO);
    }

    #[test]
    fn test_inactive_deductions_are_excluded() {
        let mut etf = deduction("etf", "ETF", DeductionKind::Percentage, "3");
        etf.is_active = false;
        let deductions = vec![deduction("epf", "EPF", DeductionKind::Percentage, "8"), etf];

        let result = calculate_net_salary(&input("5000", "0"), &deductions).unwrap();

        assert_eq!(result.net_salary, dec("4600"));
        assert_eq!(result.deduction_lines.len(), 1);
        assert!(
            result
                .audit_trace
                .steps
                .iter()
                .any(|s| s.rule_id == "deduction_excluded")
        );
    }

    #[test]
    fn test_duplicate_names_are_each_applied_with_warning() {
        let deductions = vec![
            deduction("a", "Loan", DeductionKind::Fixed, "100"),
            deduction("b", "loan", DeductionKind::Fixed, "50"),
        ];

        let result = calculate_net_salary(&input("1000", "0"), &deductions).unwrap();

        assert_eq!(result.net_salary, dec("850"));
        assert!(result.audit_trace.has_warning(DUPLICATE_DEDUCTION_NAME));
    }

    #[test]
    fn test_net_salary_floored_at_zero() {
        let deductions = vec![deduction("big", "Advance", DeductionKind::Fixed, "2000")];

        let result = calculate_net_salary(&input("1000", "100"), &deductions).unwrap();

        assert_eq!(result.net_salary, Decimal::ZERO);
        assert_eq!(result.total_deductions, dec("2000"));
        assert!(result.audit_trace.has_warning(NET_SALARY_FLOORED));
    }

    #[test]
    fn test_negative_basic_salary_is_rejected() {
        let result = calculate_net_salary(&input("-1", "0"), &[]);
        assert!(matches!(result, Err(HrisError::InvalidPayrollInput { .. })));
    }

    #[test]
    fn test_negative_allowances_are_rejected() {
        let result = calculate_net_salary(&input("1000", "-5"), &[]);
        assert!(matches!(result, Err(HrisError::InvalidPayrollInput { .. })));
    }

    #[test]
    fn test_cumulative_percentage_above_100_is_rejected() {
        let deductions = vec![
            deduction("a", "A", DeductionKind::Percentage, "60"),
            deduction("b", "B", DeductionKind::Percentage, "41"),
        ];

        match calculate_net_salary(&input("1000", "0"), &deductions) {
            Err(HrisError::InvalidPayrollInput { message }) => {
                assert!(message.contains("101%"), "unexpected message: {}", message);
            }
            other => panic!("Expected InvalidPayrollInput, got {:?}", other),
        }
    }

    #[test]
    fn test_inactive_percentages_do_not_count_towards_cap() {
        let mut inactive = deduction("b", "B", DeductionKind::Percentage, "90");
        inactive.is_active = false;
        let deductions = vec![deduction("a", "A", DeductionKind::Percentage, "60"), inactive];

        assert!(calculate_net_salary(&input("1000", "0"), &deductions).is_ok());
    }

    #[test]
    fn test_audit_steps_are_sequential() {
        let deductions = vec![
            deduction("epf", "EPF", DeductionKind::Percentage, "8"),
            deduction("etf", "ETF", DeductionKind::Percentage, "3"),
        ];

        let result = calculate_net_salary(&input("5000", "0"), &deductions).unwrap();

        let numbers: Vec<u32> = result.audit_trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(result.audit_trace.steps[0].rule_id, "gross_pay");
        assert_eq!(result.audit_trace.steps[3].rule_id, "net_salary");
    }
}
