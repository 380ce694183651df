//! Employee model and related types.
//!
//! This module defines the Employee record, its employment status, and the
//! creation/patch payloads used by the employee store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and working.
    Active,
    /// No longer employed or suspended.
    Inactive,
    /// Employed but currently on leave.
    OnLeave,
}

impl EmployeeStatus {
    /// Lower-case name used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::OnLeave => "on_leave",
        }
    }
}

/// Monthly pay figures used when generating payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compensation {
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly allowances paid on top of the basic salary.
    #[serde(default)]
    pub allowances: Decimal,
}

/// Represents an employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee (e.g., "EMP001").
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email address.
    pub email: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Employment status.
    pub status: EmployeeStatus,
    /// The date the employee joined.
    pub join_date: NaiveDate,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Pay figures; employees without them are skipped by payroll runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compensation: Option<Compensation>,
}

impl Employee {
    /// Returns "First Last".
    ///
    /// # Examples
    ///
    /// ```
    /// use hris_engine::models::{Employee, EmployeeStatus};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "EMP001".to_string(),
    ///     first_name: "John".to_string(),
    ///     last_name: "Doe".to_string(),
    ///     email: "john.doe@company.com".to_string(),
    ///     position: "Software Engineer".to_string(),
    ///     department: "Engineering".to_string(),
    ///     status: EmployeeStatus::Active,
    ///     join_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
    ///     phone: "+1234567890".to_string(),
    ///     address: "123 Tech St".to_string(),
    ///     compensation: None,
    /// };
    /// assert_eq!(employee.full_name(), "John Doe");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the employee is active.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Case-insensitive substring match on first name, last name or email.
    ///
    /// An empty query matches every employee.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.first_name.to_lowercase().contains(&query)
            || self.last_name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }
}

fn default_status() -> EmployeeStatus {
    EmployeeStatus::Active
}

/// Payload for creating an employee.
///
/// When `id` is omitted the store assigns the next `EMPnnn` id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Optional explicit id.
    #[serde(default)]
    pub id: Option<String>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email address.
    pub email: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Employment status (defaults to active).
    #[serde(default = "default_status")]
    pub status: EmployeeStatus,
    /// The date the employee joined.
    pub join_date: NaiveDate,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Optional pay figures.
    #[serde(default)]
    pub compensation: Option<Compensation>,
}

impl NewEmployee {
    /// Builds the employee record with the given id.
    pub fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            position: self.position,
            department: self.department,
            status: self.status,
            join_date: self.join_date,
            phone: self.phone,
            address: self.address,
            compensation: self.compensation,
        }
    }
}

/// Partial update for an employee. Only present fields are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
    /// New given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// New email address.
    #[serde(default)]
    pub email: Option<String>,
    /// New job title.
    #[serde(default)]
    pub position: Option<String>,
    /// New department.
    #[serde(default)]
    pub department: Option<String>,
    /// New status.
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    /// New join date.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    /// New phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// New address.
    #[serde(default)]
    pub address: Option<String>,
    /// New pay figures.
    #[serde(default)]
    pub compensation: Option<Compensation>,
}

impl crate::store::Record for Employee {
    const ENTITY: &'static str = "Employee";

    fn id(&self) -> &str {
        &self.id
    }
}

impl crate::store::Patch<Employee> for EmployeePatch {
    fn apply(self, employee: &mut Employee) {
        if let Some(v) = self.first_name {
            employee.first_name = v;
        }
        if let Some(v) = self.last_name {
            employee.last_name = v;
        }
        if let Some(v) = self.email {
            employee.email = v;
        }
        if let Some(v) = self.position {
            employee.position = v;
        }
        if let Some(v) = self.department {
            employee.department = v;
        }
        if let Some(v) = self.status {
            employee.status = v;
        }
        if let Some(v) = self.join_date {
            employee.join_date = v;
        }
        if let Some(v) = self.phone {
            employee.phone = v;
        }
        if let Some(v) = self.address {
            employee.address = v;
        }
        if let Some(v) = self.compensation {
            employee.compensation = Some(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Patch;

    fn create_test_employee() -> Employee {
        Employee {
            id: "EMP001".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@company.com".to_string(),
            position: "Software Engineer".to_string(),
            department: "Engineering".to_string(),
            status: EmployeeStatus::Active,
            join_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            phone: "+1234567890".to_string(),
            address: "123 Tech St, Silicon Valley, CA".to_string(),
            compensation: None,
        }
    }

    #[test]
    fn test_deserialize_employee_without_compensation() {
        let json = r#"{
            "id": "EMP002",
            "first_name": "Jane",
            "last_name": "Smith",
            "email": "jane.smith@company.com",
            "position": "HR Manager",
            "department": "Human Resources",
            "status": "on_leave",
            "join_date": "2022-11-01",
            "phone": "+0987654321",
            "address": "456 Corp Ave, New York, NY"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.status, EmployeeStatus::OnLeave);
        assert_eq!(employee.join_date, NaiveDate::from_ymd_opt(2022, 11, 1).unwrap());
        assert!(employee.compensation.is_none());
    }

    #[test]
    fn test_search_matches_names_and_email_case_insensitively() {
        let employee = create_test_employee();
        assert!(employee.matches_search("JOHN"));
        assert!(employee.matches_search("doe"));
        assert!(employee.matches_search("@company"));
        assert!(employee.matches_search(""));
        assert!(!employee.matches_search("engineering"));
    }

    #[test]
    fn test_patch_only_changes_present_fields() {
        let mut employee = create_test_employee();
        let patch = EmployeePatch {
            position: Some("Staff Engineer".to_string()),
            status: Some(EmployeeStatus::OnLeave),
            ..Default::default()
        };

        patch.apply(&mut employee);

        assert_eq!(employee.position, "Staff Engineer");
        assert_eq!(employee.status, EmployeeStatus::OnLeave);
        assert_eq!(employee.first_name, "John");
        assert_eq!(employee.email, "john.doe@company.com");
    }

    #[test]
    fn test_new_employee_defaults_to_active() {
        let json = r#"{
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@company.com",
            "position": "Analyst",
            "department": "Research",
            "join_date": "2024-03-01",
            "phone": "+44 20 7946 0000"
        }"#;

        let new_employee: NewEmployee = serde_json::from_str(json).unwrap();
        assert!(new_employee.id.is_none());
        assert_eq!(new_employee.status, EmployeeStatus::Active);

        let employee = new_employee.into_employee("EMP003".to_string());
        assert_eq!(employee.full_name(), "Ada Lovelace");
        assert!(employee.is_active());
    }
}
