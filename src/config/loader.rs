//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the HRIS
//! configuration from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HrisError, HrisResult};

use super::types::{Account, AccountsConfig, AppConfig, HrisConfig, SeedData};

/// Loads and provides access to the HRIS configuration.
///
/// # Directory Structure
///
/// ```text
/// config/hris/
/// ├── app.yaml       # Branding, server, service and leave settings
/// ├── accounts.yaml  # Login accounts
/// └── seed.yaml      # Initial records
/// ```
///
/// # Example
///
/// ```no_run
/// use hris_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hris").unwrap();
/// println!("Loaded {}", loader.app().application.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HrisConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - app.yaml or accounts.yaml is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    ///
    /// A missing seed.yaml yields empty stores.
    pub fn load<P: AsRef<Path>>(path: P) -> HrisResult<Self> {
        let path = path.as_ref();

        let mut app = Self::load_yaml::<AppConfig>(&path.join("app.yaml"))?;
        if let Some(store) = app.service.deduction_store.take() {
            app.service.deduction_store = Some(Self::resolve(path, store));
        }

        let accounts = Self::load_yaml::<AccountsConfig>(&path.join("accounts.yaml"))?;

        let seed_path = path.join("seed.yaml");
        let seed = if seed_path.exists() {
            Self::load_yaml::<SeedData>(&seed_path)?
        } else {
            SeedData::default()
        };

        tracing::debug!(
            path = %path.display(),
            accounts = accounts.accounts.len(),
            employees = seed.employees.len(),
            "configuration loaded"
        );

        Ok(Self {
            config: HrisConfig::new(app, accounts.accounts, seed),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> HrisResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| HrisError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| HrisError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn resolve(base: &Path, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            base.join(path)
        }
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &HrisConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> HrisConfig {
        self.config
    }

    /// Returns the application settings.
    pub fn app(&self) -> &AppConfig {
        self.config.app()
    }

    /// Returns the login accounts.
    pub fn accounts(&self) -> &[Account] {
        self.config.accounts()
    }

    /// Returns the seed records.
    pub fn seed(&self) -> &SeedData {
        self.config.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeductionKind, PayrollStatus, Role};
    use chrono::NaiveTime;
    use rust_decimal::Decimal;

    fn config_path() -> &'static str {
        "./config/hris"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.app().application.name, "HRIS Cristal");
        assert_eq!(loader.app().application.company, "Cristal Corp");
    }

    #[test]
    fn test_service_settings_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let service = &loader.app().service;

        assert_eq!(service.latency_ms, 0);
        assert_eq!(service.late_after, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert!(service.deduction_store.is_none());
        assert_eq!(loader.app().leave.default_balance.total(), 28);
    }

    #[test]
    fn test_accounts_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let accounts = loader.accounts();

        assert_eq!(accounts.len(), 2);
        let admin = accounts
            .iter()
            .find(|a| a.email == "admin@company.com")
            .unwrap();
        assert_eq!(admin.user.role, Role::Admin);
        assert_eq!(admin.user.name, "Admin User");

        let employee = accounts
            .iter()
            .find(|a| a.email == "employee@company.com")
            .unwrap();
        assert_eq!(employee.user.employee_id.as_deref(), Some("EMP001"));
    }

    #[test]
    fn test_seed_records_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let seed = loader.seed();

        assert_eq!(seed.employees.len(), 2);
        assert_eq!(seed.attendance.len(), 2);
        assert_eq!(seed.leave_requests.len(), 1);
        assert_eq!(seed.reports.len(), 2);
        assert_eq!(seed.notifications.len(), 2);

        let payroll = &seed.payroll[0];
        assert_eq!(payroll.id, "PAY001");
        assert_eq!(payroll.status, PayrollStatus::Paid);
        assert_eq!(payroll.net_salary, Decimal::from(5300));

        assert_eq!(seed.deductions.len(), 2);
        assert!(seed.deductions.iter().all(|d| d.is_default));
        assert_eq!(seed.deductions[0].kind, DeductionKind::Percentage);
        assert_eq!(seed.deductions[0].value, Decimal::from(8));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(HrisError::ConfigNotFound { path }) => {
                assert!(path.contains("app.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_relative_store_path_resolves_against_config_dir() {
        let resolved = ConfigLoader::resolve(Path::new("/etc/hris"), PathBuf::from("data/d.json"));
        assert_eq!(resolved, PathBuf::from("/etc/hris/data/d.json"));

        let absolute = ConfigLoader::resolve(Path::new("/etc/hris"), PathBuf::from("/var/d.json"));
        assert_eq!(absolute, PathBuf::from("/var/d.json"));
    }
}
