//! Login, logout and session lookup.

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{HrisError, HrisResult};
use crate::models::Session;
use crate::validation::is_valid_email;

use super::HrService;

impl HrService {
    /// Authenticates against the configured accounts and opens a session.
    ///
    /// Any mismatch fails with exactly "Invalid credentials".
    pub async fn login(&self, email: &str, password: &str) -> HrisResult<Session> {
        let mut state = self.write().await;

        let account = self
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .ok_or_else(|| {
                warn!(email, "login rejected");
                HrisError::InvalidCredentials
            })?;

        let session = Session {
            user: account.user.clone(),
            token: Uuid::new_v4().to_string(),
        };
        state.sessions.insert(session.token.clone(), session.clone());

        info!(user_id = %session.user.id, role = ?session.user.role, "login");
        Ok(session)
    }

    /// Closes a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> HrisResult<()> {
        let mut state = self.write().await;
        if let Some(session) = state.sessions.remove(token) {
            info!(user_id = %session.user.id, "logout");
        }
        Ok(())
    }

    /// Starts a password reset for `email`.
    pub async fn reset_password(&self, email: &str) -> HrisResult<String> {
        self.simulate_latency().await;
        if !is_valid_email(email) {
            return Err(HrisError::validation("email", "must be a valid email address"));
        }
        info!(email, "password reset requested");
        Ok(format!("Reset link sent to {}", email))
    }

    /// Resolves a bearer token to its session.
    pub async fn authenticate(&self, token: &str) -> HrisResult<Session> {
        let state = self.state.read().await;
        state
            .sessions
            .get(token)
            .cloned()
            .ok_or(HrisError::Unauthenticated)
    }
}
