//! Notification feed.

use crate::error::HrisResult;
use crate::models::{Notification, User};

use super::HrService;

impl HrService {
    /// All notifications, newest first.
    pub async fn notifications(&self, _user: &User) -> HrisResult<Vec<Notification>> {
        let state = self.read().await;
        Ok(state.notifications.all().to_vec())
    }

    /// Marks a notification as read.
    pub async fn mark_notification_read(&self, _user: &User, id: &str) -> HrisResult<Notification> {
        let mut state = self.write().await;
        let notification = state
            .notifications
            .modify(id, |n| n.read = true)?
            .clone();
        tracing::debug!(notification_id = %id, "notification read");
        Ok(notification)
    }
}
