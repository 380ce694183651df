//! Employee directory operations.

use tracing::info;

use crate::access::require_admin;
use crate::error::{HrisError, HrisResult};
use crate::models::{Employee, EmployeePatch, NewEmployee, User};
use crate::store::{Patch, RecordStore};
use crate::validation::validate_employee;

use super::HrService;

/// The next `EMPnnn` id after the highest numeric suffix in the store.
fn next_employee_id(employees: &RecordStore<Employee>) -> HrisResult<String> {
    let highest = employees
        .all()
        .iter()
        .filter_map(|e| e.id.strip_prefix("EMP"))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    let next = highest
        .checked_add(1)
        .ok_or_else(|| HrisError::validation("id", "no employee id left to generate; supply one"))?;
    Ok(format!("EMP{:03}", next))
}

impl HrService {
    /// Lists employees, optionally filtered by a search query (admin only).
    pub async fn list_employees(
        &self,
        user: &User,
        search: Option<&str>,
    ) -> HrisResult<Vec<Employee>> {
        require_admin(user, "list employees")?;
        let state = self.read().await;
        Ok(state
            .employees
            .all()
            .iter()
            .filter(|e| search.is_none_or(|q| e.matches_search(q)))
            .cloned()
            .collect())
    }

    /// Returns an employee. Employees may only read their own record.
    pub async fn get_employee(&self, user: &User, id: &str) -> HrisResult<Employee> {
        if !user.is_admin() && user.employee_id.as_deref() != Some(id) {
            return Err(HrisError::forbidden("view another employee"));
        }
        let state = self.read().await;
        state.employees.find(id).cloned()
    }

    /// Creates an employee (admin only).
    ///
    /// Generates the next `EMPnnn` id when none is supplied and rejects
    /// duplicate ids.
    pub async fn create_employee(&self, user: &User, new: NewEmployee) -> HrisResult<Employee> {
        require_admin(user, "create employee")?;
        let mut state = self.write().await;

        let id = match new.id.clone().filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => next_employee_id(&state.employees)?,
        };
        if state.employees.contains(&id) {
            return Err(HrisError::validation("id", format!("'{}' is already in use", id)));
        }

        let employee = new.into_employee(id);
        validate_employee(&employee)?;
        state.employees.add(employee.clone());

        info!(employee_id = %employee.id, "employee created");
        Ok(employee)
    }

    /// Shallow-merges `patch` into an employee (admin only).
    pub async fn update_employee(
        &self,
        user: &User,
        id: &str,
        patch: EmployeePatch,
    ) -> HrisResult<Employee> {
        require_admin(user, "update employee")?;
        let mut state = self.write().await;

        let mut candidate = state.employees.find(id)?.clone();
        patch.apply(&mut candidate);
        validate_employee(&candidate)?;

        let updated = state
            .employees
            .modify(id, |employee| *employee = candidate)?
            .clone();
        info!(employee_id = %id, "employee updated");
        Ok(updated)
    }
}
