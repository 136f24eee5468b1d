//! Aggregated dashboard types.

use serde::{Deserialize, Serialize};

use super::WorkOrder;

/// Headline counters shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    /// Number of registered machines
    pub total_machines: u64,
    /// Number of pending work orders
    pub active_work_orders: u32,
    /// Number of completed work orders
    pub completed_work_orders: u32,
}

/// Created/completed counts for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyBucket {
    /// Abbreviated month name, e.g. "Feb"
    pub month: String,
    /// Month number (1-12) the bucket covers
    pub month_number: i8,
    /// Orders created in a month with this name
    pub created: u32,
    /// Orders completed in a month with this name
    pub completed: u32,
}

/// Six consecutive monthly buckets, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlySeries(pub Vec<MonthlyBucket>);

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonthlyBucket> {
        self.0.iter()
    }

    /// The bucket for the current month.
    pub fn latest(&self) -> Option<&MonthlyBucket> {
        self.0.last()
    }
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub monthly: MonthlySeries,
    /// The most recently created orders, newest first
    pub recent: Vec<WorkOrder>,
}
