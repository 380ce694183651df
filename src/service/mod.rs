//! The HRIS service layer.
//!
//! [`HrService`] owns every record store behind a single
//! `tokio::sync::RwLock`. Each operation awaits the configured artificial
//! latency, takes the lock once, and runs to completion against a
//! consistent snapshot. Operations are authorised against the acting
//! [`User`](crate::models::User).
//!
//! # Example
//!
//! ```no_run
//! use hris_engine::config::ConfigLoader;
//! use hris_engine::service::HrService;
//!
//! # async fn run() -> hris_engine::error::HrisResult<()> {
//! let config = ConfigLoader::load("./config/hris")?.into_config();
//! let service = HrService::from_config(&config)?;
//!
//! let session = service.login("admin@company.com", "Admin123").await?;
//! let employees = service.list_employees(&session.user, None).await?;
//! println!("{} employees", employees.len());
//! # Ok(())
//! # }
//! ```

mod attendance;
mod auth;
mod dashboard;
mod deductions;
mod employees;
mod leave;
mod notifications;
mod payroll;
mod reports;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::config::{Account, HrisConfig, ServiceSettings};
use crate::error::HrisResult;
use crate::models::{
    AttendanceRecord, Employee, LeaveRequest, Notification, PayrollRecord, ReportConfig, Session,
};
use crate::store::{DeductionStore, LeaveBalances, RecordStore};

pub use dashboard::DashboardStats;
pub use payroll::{PayrollRun, SkippedEmployee};

/// Everything guarded by the service lock.
#[derive(Debug)]
struct HrState {
    employees: RecordStore<Employee>,
    attendance: RecordStore<AttendanceRecord>,
    leave_requests: RecordStore<LeaveRequest>,
    leave_balances: LeaveBalances,
    payroll: RecordStore<PayrollRecord>,
    deductions: DeductionStore,
    reports: RecordStore<ReportConfig>,
    notifications: RecordStore<Notification>,
    sessions: HashMap<String, Session>,
}

/// The HR service: one async operation per use-case.
pub struct HrService {
    state: RwLock<HrState>,
    accounts: Vec<Account>,
    settings: ServiceSettings,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for HrService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HrService")
            .field("accounts", &self.accounts.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl HrService {
    /// Builds a service seeded from configuration.
    ///
    /// When a deduction store path is configured the deduction list is
    /// loaded from (and migrated on) disk, with the seed deductions as the
    /// fallback for a missing file.
    pub fn from_config(config: &HrisConfig) -> HrisResult<Self> {
        let seed = config.seed();
        let settings = config.app().service.clone();

        let deductions = match &settings.deduction_store {
            Some(path) => DeductionStore::open(path, seed.deductions.clone())?,
            None => DeductionStore::in_memory(seed.deductions.clone()),
        };

        let state = HrState {
            employees: RecordStore::new(seed.employees.clone()),
            attendance: RecordStore::new(seed.attendance.clone()),
            leave_requests: RecordStore::new(seed.leave_requests.clone()),
            leave_balances: LeaveBalances::new(config.app().leave.default_balance),
            payroll: RecordStore::new(seed.payroll.clone()),
            deductions,
            reports: RecordStore::new(seed.reports.clone()),
            notifications: RecordStore::new(seed.notifications.clone()),
            sessions: HashMap::new(),
        };

        tracing::info!(
            employees = state.employees.len(),
            deductions = state.deductions.all().len(),
            latency_ms = settings.latency_ms,
            "HR service initialised"
        );

        Ok(Self {
            state: RwLock::new(state),
            accounts: config.accounts().to_vec(),
            settings,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replaces the clock used for dates and times.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    async fn simulate_latency(&self) {
        if self.settings.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.settings.latency_ms)).await;
        }
    }

    async fn read(&self) -> RwLockReadGuard<'_, HrState> {
        self.simulate_latency().await;
        self.state.read().await
    }

    async fn write(&self) -> RwLockWriteGuard<'_, HrState> {
        self.simulate_latency().await;
        self.state.write().await
    }
}

/// A short random id.
fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(9);
    id
}

/// A random id with an uppercase entity prefix, e.g. `LR-1a2b3c4d5`.
fn prefixed_id(prefix: &str) -> String {
    format!("{}-{}", prefix, short_id())
}

/// Adds a notification to the front of the list.
fn notify(state: &mut HrState, message: String) {
    tracing::debug!(%message, "notification");
    state.notifications.prepend(Notification {
        id: short_id(),
        message,
        read: false,
    });
}
