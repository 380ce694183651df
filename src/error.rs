//! Error types for the HRIS engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the stores, the payroll
//! calculations and the service layer.

use thiserror::Error;

/// The main error type for the HRIS engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use hris_engine::error::HrisError;
///
/// let error = HrisError::InvalidCredentials;
/// assert_eq!(error.to_string(), "Invalid credentials");
/// ```
#[derive(Debug, Error)]
pub enum HrisError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The email/password pair did not match any account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No valid session token was supplied.
    #[error("Authentication required")]
    Unauthenticated,

    /// The acting user's role does not allow the operation.
    #[error("Permission denied: {action}")]
    Forbidden {
        /// The operation that was refused.
        action: String,
    },

    /// A record with the given id does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record (e.g. "Employee").
        entity: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// A field failed validation.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A record cannot move from its current status to the requested one.
    #[error("Cannot move '{id}' from {from} to {to}")]
    InvalidStatusTransition {
        /// The id of the record.
        id: String,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },

    /// Approving a leave request would overdraw the employee's balance.
    #[error("Insufficient {leave_type} leave: requested {requested} days, {available} available")]
    InsufficientLeaveBalance {
        /// The leave bucket.
        leave_type: String,
        /// Days requested.
        requested: u32,
        /// Days remaining in the bucket.
        available: u32,
    },

    /// The user is not linked to an employee record.
    #[error("User '{user_id}' has no employee record")]
    NoEmployeeRecord {
        /// The id of the user.
        user_id: String,
    },

    /// The employee already has an attendance record for today.
    #[error("Employee '{employee_id}' is already checked in")]
    AlreadyCheckedIn {
        /// The employee id.
        employee_id: String,
    },

    /// The employee has no open attendance record for today.
    #[error("Employee '{employee_id}' is not checked in")]
    NotCheckedIn {
        /// The employee id.
        employee_id: String,
    },

    /// Payroll input was malformed (negative amounts, deductions above 100%).
    #[error("Invalid payroll input: {message}")]
    InvalidPayrollInput {
        /// A description of the problem.
        message: String,
    },

    /// Reading or writing persisted state failed.
    #[error("Persistence error at '{path}': {message}")]
    Persistence {
        /// The file involved.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The report format cannot be rendered by this engine.
    #[error("Unsupported report format: {format}")]
    UnsupportedFormat {
        /// The requested format.
        format: String,
    },

    /// Rendering an export failed.
    #[error("Export failed: {message}")]
    Export {
        /// A description of the failure.
        message: String,
    },
}

impl HrisError {
    /// Shorthand for a [`HrisError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Shorthand for a [`HrisError::Validation`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`HrisError::Forbidden`].
    pub fn forbidden(action: impl Into<String>) -> Self {
        Self::Forbidden {
            action: action.into(),
        }
    }
}

/// A type alias for Results that return HrisError.
pub type HrisResult<T> = Result<T, HrisError>;
