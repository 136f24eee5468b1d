//! Filter and aggregation engine.
//!
//! Pure functions over fetched rows. Nothing here touches the store or
//! mutates its input, and every result is determined by the rows plus a
//! reference instant `now`. The time zone of `now` defines the local calendar
//! used for "today", week and month boundaries.
//!
//! - [`filter_work_orders`]: date range, status, priority, machine and search
//! - [`search_machines`]: machine catalog search
//! - [`monthly_series`]: six-month chart data
//! - [`dashboard_stats`], [`recent_work_orders`], [`dashboard_snapshot`]

pub mod date_range;
pub mod filter;
pub mod monthly;
pub mod stats;

#[cfg(test)]
mod tests;

pub use date_range::{start_of_month, start_of_week};
pub use filter::{filter_work_orders, search_machines};
pub use monthly::monthly_series;
pub use stats::{dashboard_snapshot, dashboard_stats, recent_work_orders, RECENT_LIMIT};

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
