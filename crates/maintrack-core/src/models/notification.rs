//! Notification model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::NotificationKind;

/// An entry in the notification feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    /// Work order the notification is about
    pub work_order_id: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub read: bool,
}

/// Field values for a notification about to be inserted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub work_order_id: String,
}
