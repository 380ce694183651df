//! In-memory record stores.
//!
//! Every entity lives in a [`RecordStore`], an ordered collection keyed by
//! record id. Updates are shallow merges expressed as typed [`Patch`] values.
//! The deduction list additionally persists to disk through
//! [`DeductionStore`], and leave balances are tracked per employee in
//! [`LeaveBalances`].

mod deduction_store;
mod leave_balances;
mod record_store;

pub use deduction_store::{
    DEDUCTION_SCHEMA_VERSION, DeductionStore, PersistedDeductions, RemoveOutcome,
    migrate_deductions,
};
pub use leave_balances::LeaveBalances;
pub use record_store::RecordStore;

/// A record addressable by a string id.
pub trait Record {
    /// Entity name used in not-found errors.
    const ENTITY: &'static str;

    /// The record's unique id.
    fn id(&self) -> &str;
}

/// A partial update that can be merged into a record.
pub trait Patch<T> {
    /// Overwrites the fields of `target` that are present in the patch.
    fn apply(self, target: &mut T);
}
