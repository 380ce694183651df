//! Leave requests and balances.

use tracing::info;

use crate::access::{own_employee_id, require_admin, visible_records};
use crate::calculation::{deduct_leave, leave_days};
use crate::error::{HrisError, HrisResult};
use crate::models::{LeaveBalance, LeaveRequest, LeaveStatus, NewLeaveRequest, User};
use crate::validation::validate_leave_request;

use super::{HrService, HrState, notify, prefixed_id};

/// Fails unless the request is still pending.
fn ensure_pending(request: &LeaveRequest, to: LeaveStatus) -> HrisResult<()> {
    if request.status == LeaveStatus::Pending {
        Ok(())
    } else {
        Err(HrisError::InvalidStatusTransition {
            id: request.id.clone(),
            from: request.status.as_str().to_string(),
            to: to.as_str().to_string(),
        })
    }
}

fn set_status(state: &mut HrState, id: &str, status: LeaveStatus) -> HrisResult<LeaveRequest> {
    Ok(state
        .leave_requests
        .modify(id, |request| request.status = status)?
        .clone())
}

impl HrService {
    /// Leave requests visible to `user`, most recent first.
    pub async fn leave_requests(&self, user: &User) -> HrisResult<Vec<LeaveRequest>> {
        let state = self.read().await;
        Ok(visible_records(state.leave_requests.all(), user))
    }

    /// The remaining leave days of the user's employee.
    pub async fn leave_balance(&self, user: &User) -> HrisResult<LeaveBalance> {
        let employee_id = own_employee_id(user)?;
        let state = self.read().await;
        Ok(state.leave_balances.get(employee_id))
    }

    /// Submits a leave request for the user's employee.
    ///
    /// The request is stored as `Pending`, dated today, at the front of
    /// the list.
    pub async fn apply_leave(&self, user: &User, new: NewLeaveRequest) -> HrisResult<LeaveRequest> {
        let employee_id = own_employee_id(user)?;
        validate_leave_request(&new)?;
        let mut state = self.write().await;

        let employee_name = state
            .employees
            .get(employee_id)
            .map(|e| e.full_name())
            .unwrap_or_else(|| user.name.clone());

        let request = LeaveRequest {
            id: prefixed_id("LR"),
            employee_id: employee_id.to_string(),
            employee_name,
            leave_type: new.leave_type,
            start_date: new.start_date,
            end_date: new.end_date,
            reason: new.reason,
            status: LeaveStatus::Pending,
            applied_on: self.clock.today(),
        };
        state.leave_requests.prepend(request.clone());
        notify(
            &mut state,
            format!("New leave request from {}", request.employee_name),
        );

        info!(
            request_id = %request.id,
            employee_id,
            leave_type = request.leave_type.as_str(),
            "leave requested"
        );
        Ok(request)
    }

    /// Approves a pending request and takes its days from the balance
    /// (admin only).
    pub async fn approve_leave(&self, user: &User, id: &str) -> HrisResult<LeaveRequest> {
        require_admin(user, "approve leave")?;
        let mut state = self.write().await;

        let request = state.leave_requests.find(id)?.clone();
        ensure_pending(&request, LeaveStatus::Approved)?;

        let days = leave_days(request.start_date, request.end_date)?;
        let balance = state.leave_balances.get(&request.employee_id);
        let remaining = deduct_leave(balance, request.leave_type, days)?;
        state.leave_balances.set(&request.employee_id, remaining);

        let approved = set_status(&mut state, id, LeaveStatus::Approved)?;
        info!(request_id = %id, days, employee_id = %request.employee_id, "leave approved");
        Ok(approved)
    }

    /// Rejects a pending request (admin only).
    pub async fn reject_leave(&self, user: &User, id: &str) -> HrisResult<LeaveRequest> {
        require_admin(user, "reject leave")?;
        let mut state = self.write().await;

        let request = state.leave_requests.find(id)?.clone();
        ensure_pending(&request, LeaveStatus::Rejected)?;

        let rejected = set_status(&mut state, id, LeaveStatus::Rejected)?;
        info!(request_id = %id, "leave rejected");
        Ok(rejected)
    }
}
