//! Input validation rules shared by the stores and the service layer.

use rust_decimal::Decimal;

use crate::error::{HrisError, HrisResult};
use crate::models::{DeductionKind, DeductionType, Employee, NewLeaveRequest};

/// Returns true if the value is present and not blank.
pub fn is_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Checks for `local@domain` with no whitespace, a single `@`, and a
/// domain holding at least one `.` with text on both sides.
///
/// # Examples
///
/// ```
/// use hris_engine::validation::is_valid_email;
///
/// assert!(is_valid_email("admin@company.com"));
/// assert!(is_valid_email("a@b.c."));
/// assert!(!is_valid_email("admin@company"));
/// assert!(!is_valid_email("ad min@company.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// At least 8 characters with one uppercase letter and one digit.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Optional leading `+`, then at least 10 digits, whitespace or dashes.
pub fn is_valid_phone(phone: &str) -> bool {
    let body = phone.strip_prefix('+').unwrap_or(phone);
    body.chars().count() >= 10
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '-')
}

/// Validates the fields of an employee record.
pub fn validate_employee(employee: &Employee) -> HrisResult<()> {
    for (field, value) in [
        ("id", &employee.id),
        ("first_name", &employee.first_name),
        ("last_name", &employee.last_name),
        ("position", &employee.position),
        ("department", &employee.department),
    ] {
        if !is_required(value) {
            return Err(HrisError::validation(field, "is required"));
        }
    }
    if !is_valid_email(&employee.email) {
        return Err(HrisError::validation("email", "must be a valid email address"));
    }
    if !is_valid_phone(&employee.phone) {
        return Err(HrisError::validation(
            "phone",
            "must contain at least 10 digits, spaces or dashes",
        ));
    }
    if let Some(compensation) = &employee.compensation {
        if compensation.basic_salary < Decimal::ZERO {
            return Err(HrisError::validation("basic_salary", "cannot be negative"));
        }
        if compensation.allowances < Decimal::ZERO {
            return Err(HrisError::validation("allowances", "cannot be negative"));
        }
    }
    Ok(())
}

/// Validates a deduction definition.
pub fn validate_deduction(deduction: &DeductionType) -> HrisResult<()> {
    if !is_required(&deduction.name) {
        return Err(HrisError::validation("name", "is required"));
    }
    if deduction.value < Decimal::ZERO {
        return Err(HrisError::validation("value", "cannot be negative"));
    }
    if deduction.kind == DeductionKind::Percentage && deduction.value > Decimal::ONE_HUNDRED {
        return Err(HrisError::validation("value", "percentage cannot exceed 100"));
    }
    Ok(())
}

/// Validates a whole deduction list: every entry on its own, then the
/// combined rate of the active percentage deductions.
pub fn validate_deduction_list(deductions: &[DeductionType]) -> HrisResult<()> {
    for deduction in deductions {
        validate_deduction(deduction)?;
    }
    let total: Decimal = deductions
        .iter()
        .filter(|d| d.is_active && d.kind == DeductionKind::Percentage)
        .map(|d| d.value)
        .sum();
    if total > Decimal::ONE_HUNDRED {
        return Err(HrisError::validation(
            "value",
            format!("active percentage deductions would total {}%, above 100%", total),
        ));
    }
    Ok(())
}

/// Validates a leave request before submission.
pub fn validate_leave_request(request: &NewLeaveRequest) -> HrisResult<()> {
    if request.end_date < request.start_date {
        return Err(HrisError::validation(
            "end_date",
            "cannot be before the start date",
        ));
    }
    if !is_required(&request.reason) {
        return Err(HrisError::validation("reason", "is required"));
    }
    Ok(())
}
