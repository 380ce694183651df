//! Payroll generation and lifecycle.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::access::{require_admin, visible_records};
use crate::calculation::{PayrollInput, calculate_net_salary};
use crate::error::{HrisError, HrisResult};
use crate::models::{PayrollCalculation, PayrollRecord, PayrollStatus, User, period_label};

use super::{HrService, notify, prefixed_id};

/// An employee left out of a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEmployee {
    /// The employee id.
    pub employee_id: String,
    /// The employee's full name.
    pub employee_name: String,
    /// Why no record was generated.
    pub reason: String,
}

/// The outcome of [`HrService::run_payroll`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRun {
    /// The period, e.g. "October 2023".
    pub period: String,
    /// Draft records created by this run.
    pub generated: Vec<PayrollRecord>,
    /// Employees that were not paid by this run.
    pub skipped: Vec<SkippedEmployee>,
}

impl HrService {
    /// Payroll records visible to `user`.
    pub async fn payroll_records(&self, user: &User) -> HrisResult<Vec<PayrollRecord>> {
        let state = self.read().await;
        Ok(visible_records(state.payroll.all(), user))
    }

    /// Generates draft payroll for a month (admin only).
    ///
    /// Every active employee with compensation and no record for the period
    /// gets a `Draft` record computed from the active deductions. Everyone
    /// else is listed in [`PayrollRun::skipped`].
    pub async fn run_payroll(&self, user: &User, month: u32, year: i32) -> HrisResult<PayrollRun> {
        require_admin(user, "run payroll")?;
        if !(1..=12).contains(&month) {
            return Err(HrisError::validation("month", "must be between 1 and 12"));
        }
        let mut state = self.write().await;

        let deductions = state.deductions.all().to_vec();
        let mut generated = Vec::new();
        let mut skipped = Vec::new();

        for employee in state.employees.all() {
            let skip = |reason: &str| SkippedEmployee {
                employee_id: employee.id.clone(),
                employee_name: employee.full_name(),
                reason: reason.to_string(),
            };

            if !employee.is_active() {
                skipped.push(skip("not active"));
                continue;
            }
            let Some(compensation) = &employee.compensation else {
                skipped.push(skip("no compensation on record"));
                continue;
            };
            if state
                .payroll
                .all()
                .iter()
                .any(|r| r.employee_id == employee.id && r.is_for_period(month, year))
            {
                skipped.push(skip("payroll already exists for the period"));
                continue;
            }

            let input = PayrollInput {
                employee_id: Some(employee.id.clone()),
                basic_salary: compensation.basic_salary,
                allowances: compensation.allowances,
            };
            let calculation = calculate_net_salary(&input, &deductions)?;
            for warning in &calculation.audit_trace.warnings {
                warn!(employee_id = %employee.id, code = %warning.code, "{}", warning.message);
            }

            generated.push(PayrollRecord {
                id: prefixed_id("PAY"),
                employee_id: employee.id.clone(),
                employee_name: employee.full_name(),
                month,
                year,
                basic_salary: calculation.basic_salary,
                allowances: calculation.allowances,
                deductions: calculation.total_deductions,
                net_salary: calculation.net_salary,
                status: PayrollStatus::Draft,
                payment_date: None,
                deduction_lines: calculation.deduction_lines,
            });
        }

        for record in &generated {
            state.payroll.add(record.clone());
        }

        let period = period_label(month, year);
        notify(&mut state, format!("Payroll generated for {}", period));
        info!(
            period = %period,
            generated = generated.len(),
            skipped = skipped.len(),
            "payroll run complete"
        );

        Ok(PayrollRun {
            period,
            generated,
            skipped,
        })
    }

    /// Confirms a draft record (admin only).
    pub async fn process_payroll(&self, user: &User, id: &str) -> HrisResult<PayrollRecord> {
        require_admin(user, "process payroll")?;
        let mut state = self.write().await;

        let current = state.payroll.find(id)?.status;
        if current != PayrollStatus::Draft {
            return Err(HrisError::InvalidStatusTransition {
                id: id.to_string(),
                from: current.as_str().to_string(),
                to: PayrollStatus::Processed.as_str().to_string(),
            });
        }

        let record = state
            .payroll
            .modify(id, |record| record.status = PayrollStatus::Processed)?
            .clone();
        info!(payroll_id = %id, "payroll processed");
        Ok(record)
    }

    /// Marks a record paid today (admin only).
    ///
    /// Records that are already paid get a fresh payment date.
    pub async fn mark_as_paid(&self, user: &User, id: &str) -> HrisResult<PayrollRecord> {
        require_admin(user, "mark payroll paid")?;
        let mut state = self.write().await;

        let today = self.clock.today();
        let record = state
            .payroll
            .modify(id, |record| {
                record.status = PayrollStatus::Paid;
                record.payment_date = Some(today);
            })?
            .clone();

        info!(payroll_id = %id, payment_date = %today, net_salary = %record.net_salary, "payroll paid");
        Ok(record)
    }

    /// Computes net salary against the current deductions without storing
    /// anything (admin only).
    pub async fn preview_payroll(
        &self,
        user: &User,
        input: PayrollInput,
    ) -> HrisResult<PayrollCalculation> {
        require_admin(user, "preview payroll")?;
        let state = self.read().await;
        calculate_net_salary(&input, state.deductions.all())
    }
}
