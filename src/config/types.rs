//! Configuration types for the HRIS engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files in a configuration directory.

use std::path::PathBuf;

use chrono::NaiveTime;
use serde::Deserialize;

use crate::models::{
    AttendanceRecord, DeductionType, Employee, LeaveBalance, LeaveRequest, Notification,
    PayrollRecord, ReportConfig, User,
};

/// Branding shown by clients.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    /// The product name.
    pub name: String,
    /// The company operating the system.
    pub company: String,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// Service layer behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    /// Artificial delay awaited before each service operation.
    #[serde(default)]
    pub latency_ms: u64,
    /// Check-ins after this time are marked late.
    #[serde(default = "default_late_after")]
    pub late_after: NaiveTime,
    /// JSON file the deduction list is persisted to. Relative paths are
    /// resolved against the configuration directory.
    #[serde(default)]
    pub deduction_store: Option<PathBuf>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            late_after: default_late_after(),
            deduction_store: None,
        }
    }
}

fn default_late_after() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).unwrap_or(NaiveTime::MIN)
}

/// Leave settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveSettings {
    /// Balance assigned to employees with no recorded balance.
    #[serde(default = "default_leave_balance")]
    pub default_balance: LeaveBalance,
}

impl Default for LeaveSettings {
    fn default() -> Self {
        Self {
            default_balance: default_leave_balance(),
        }
    }
}

fn default_leave_balance() -> LeaveBalance {
    LeaveBalance {
        annual: 14,
        sick: 7,
        casual: 7,
    }
}

/// Application settings from app.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Branding.
    pub application: ApplicationSettings,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Service layer settings.
    #[serde(default)]
    pub service: ServiceSettings,
    /// Leave settings.
    #[serde(default)]
    pub leave: LeaveSettings,
}

/// A login account: credentials plus the user they authenticate as.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// The user profile returned on login.
    pub user: User,
}

/// Accounts configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsConfig {
    /// All login accounts.
    pub accounts: Vec<Account>,
}

/// Initial records loaded from seed.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Employee directory.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Attendance history.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Leave requests, most recent first.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Payroll records.
    #[serde(default)]
    pub payroll: Vec<PayrollRecord>,
    /// Deduction definitions used when no persisted list exists.
    #[serde(default)]
    pub deductions: Vec<DeductionType>,
    /// Recent reports, most recent first.
    #[serde(default)]
    pub reports: Vec<ReportConfig>,
    /// Notifications, newest first.
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct HrisConfig {
    app: AppConfig,
    accounts: Vec<Account>,
    seed: SeedData,
}

impl HrisConfig {
    /// Creates a new configuration from its parts.
    pub fn new(app: AppConfig, accounts: Vec<Account>, seed: SeedData) -> Self {
        Self {
            app,
            accounts,
            seed,
        }
    }

    /// Returns the application settings.
    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Returns the login accounts.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Returns the seed records.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }
}
