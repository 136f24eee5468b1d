//! Dashboard counters.

use jiff::Zoned;

use super::{count_u32, monthly_series};
use crate::models::{DashboardSnapshot, DashboardStats, WorkOrder, WorkOrderStatus};

/// Number of orders listed under "Recent Work Orders".
pub const RECENT_LIMIT: usize = 5;

/// Headline counters: machine total plus pending and completed order counts.
pub fn dashboard_stats(total_machines: u64, orders: &[WorkOrder]) -> DashboardStats {
    let count = |status: WorkOrderStatus| count_u32(orders.iter().filter(|order| order.status == status).count());

    DashboardStats {
        total_machines,
        active_work_orders: count(WorkOrderStatus::Pending),
        completed_work_orders: count(WorkOrderStatus::Completed),
    }
}

/// The first `n` orders. Input is expected newest first, as the store lists
/// them.
pub fn recent_work_orders(orders: &[WorkOrder], n: usize) -> Vec<WorkOrder> {
    orders.iter().take(n).cloned().collect()
}

/// Everything the dashboard renders, derived from one fetch.
pub fn dashboard_snapshot(total_machines: u64, orders: &[WorkOrder], now: &Zoned) -> DashboardSnapshot {
    DashboardSnapshot {
        stats: dashboard_stats(total_machines, orders),
        monthly: monthly_series(orders, now),
        recent: recent_work_orders(orders, RECENT_LIMIT),
    }
}
