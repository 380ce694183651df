//! Users, roles and sessions.

use serde::{Deserialize, Serialize};

/// The sole authorization axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every record and admin operation.
    Admin,
    /// Access to the user's own records.
    Employee,
}

/// A logged-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role.
    pub role: Role,
    /// Avatar image path.
    #[serde(default)]
    pub avatar: Option<String>,
    /// The employee record this login belongs to, if any.
    #[serde(default)]
    pub employee_id: Option<String>,
}

impl User {
    /// Returns true for administrators.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated user.
    pub user: User,
    /// Bearer token identifying the session.
    pub token: String,
}
