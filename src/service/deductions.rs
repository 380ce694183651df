//! Deduction definition management.

use tracing::info;

use crate::access::require_admin;
use crate::error::HrisResult;
use crate::models::{DeductionPatch, DeductionType, NewDeduction, User};
use crate::store::RemoveOutcome;

use super::HrService;

impl HrService {
    /// Every deduction definition.
    pub async fn deductions(&self) -> HrisResult<Vec<DeductionType>> {
        let state = self.read().await;
        Ok(state.deductions.all().to_vec())
    }

    /// Adds a deduction definition (admin only).
    pub async fn add_deduction(&self, user: &User, new: NewDeduction) -> HrisResult<DeductionType> {
        require_admin(user, "add deduction")?;
        let mut state = self.write().await;
        let deduction = state.deductions.add(new)?;
        info!(deduction_id = %deduction.id, name = %deduction.name, "deduction added");
        Ok(deduction)
    }

    /// Shallow-merges `patch` into a deduction definition (admin only).
    pub async fn update_deduction(
        &self,
        user: &User,
        id: &str,
        patch: DeductionPatch,
    ) -> HrisResult<DeductionType> {
        require_admin(user, "update deduction")?;
        let mut state = self.write().await;
        let deduction = state.deductions.update(id, patch)?;
        info!(deduction_id = %id, is_active = deduction.is_active, "deduction updated");
        Ok(deduction)
    }

    /// Removes a non-default deduction (admin only).
    pub async fn remove_deduction(&self, user: &User, id: &str) -> HrisResult<RemoveOutcome> {
        require_admin(user, "remove deduction")?;
        let mut state = self.write().await;
        let outcome = state.deductions.remove(id)?;
        info!(deduction_id = %id, outcome = ?outcome, "deduction removal");
        Ok(outcome)
    }
}
