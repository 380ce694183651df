//! In-app notifications.

use serde::{Deserialize, Serialize};

/// A notification shown to administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier for the notification.
    pub id: String,
    /// Message text.
    pub message: String,
    /// Whether the notification has been read.
    #[serde(default)]
    pub read: bool,
}

impl crate::store::Record for Notification {
    const ENTITY: &'static str = "Notification";

    fn id(&self) -> &str {
        &self.id
    }
}
