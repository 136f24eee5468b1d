//! Enumerations for work order status, priority and notification kind.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a work order.
///
/// Orders start out `Pending` and move to `Completed` exactly once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkOrderStatus {
    /// Work has been requested but not finished
    #[default]
    Pending,

    /// The order was closed with completion details
    Completed,
}

impl FromStr for WorkOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(WorkOrderStatus::Pending),
            "completed" => Ok(WorkOrderStatus::Completed),
            _ => Err(format!("Invalid work order status: {s}")),
        }
    }
}

impl WorkOrderStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "pending",
            WorkOrderStatus::Completed => "completed",
        }
    }

    /// Status with an icon for list and detail views.
    ///
    /// ```rust
    /// use maintrack_core::models::WorkOrderStatus;
    ///
    /// assert_eq!(WorkOrderStatus::Pending.with_icon(), "○ Pending");
    /// assert_eq!(WorkOrderStatus::Completed.with_icon(), "✓ Completed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "○ Pending",
            WorkOrderStatus::Completed => "✓ Completed",
        }
    }
}

/// Urgency of a work order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

impl Priority {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Category of a notification entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A work order was raised
    New,
    /// Reminder about an order that is still open
    Pending,
    /// A work order was closed
    Completed,
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(NotificationKind::New),
            "pending" => Ok(NotificationKind::Pending),
            "completed" => Ok(NotificationKind::Completed),
            _ => Err(format!("Invalid notification type: {s}")),
        }
    }
}

impl NotificationKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::New => "new",
            NotificationKind::Pending => "pending",
            NotificationKind::Completed => "completed",
        }
    }
}
