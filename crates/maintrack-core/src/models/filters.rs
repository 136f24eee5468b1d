//! Filter types for narrowing work order listings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Priority, WorkOrderStatus};

/// Creation-date window relative to "now".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    /// No date restriction
    #[default]
    All,
    /// Created on the current local calendar day
    Today,
    /// Created since the start of the current week (Sunday)
    #[serde(rename = "week")]
    ThisWeek,
    /// Created since the first day of the current month
    #[serde(rename = "month")]
    ThisMonth,
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "week" | "this-week" => Ok(DateRange::ThisWeek),
            "month" | "this-month" => Ok(DateRange::ThisMonth),
            _ => Err(format!("Invalid date range: {s}")),
        }
    }
}

/// Filter options for the work order list.
///
/// `None` on any criterion means "all". The default filter keeps every
/// order.
///
/// # Examples
///
/// ```rust
/// use maintrack_core::models::{DateRange, Priority, WorkOrderFilter, WorkOrderStatus};
///
/// let filter = WorkOrderFilter {
///     status: Some(WorkOrderStatus::Pending),
///     priority: Some(Priority::High),
///     ..Default::default()
/// };
/// assert_eq!(filter.date_range, DateRange::All);
/// assert!(filter.machine_id.is_none());
/// assert!(!filter.is_unrestricted());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkOrderFilter {
    /// Creation-date window
    #[serde(default)]
    pub date_range: DateRange,

    /// Keep only orders with this status
    pub status: Option<WorkOrderStatus>,

    /// Keep only orders with this priority
    pub priority: Option<Priority>,

    /// Keep only orders for this machine ID
    pub machine_id: Option<String>,

    /// Case-insensitive substring matched against description, machine name
    /// and assigned technician
    #[serde(default)]
    pub search: String,
}

impl WorkOrderFilter {
    /// True when the filter keeps every order.
    pub fn is_unrestricted(&self) -> bool {
        self.date_range == DateRange::All
            && self.status.is_none()
            && self.priority.is_none()
            && self.machine_id.is_none()
            && self.search.is_empty()
    }
}
