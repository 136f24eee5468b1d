//! Six-month created/completed series for the dashboard chart.

use jiff::{tz::TimeZone, Span, Timestamp, Zoned};

use super::count_u32;
use crate::models::{MonthlyBucket, MonthlySeries, WorkOrder, WorkOrderStatus};

const MONTHS: i32 = 6;

/// Build the chart series: six consecutive months, oldest first, ending at
/// the month of `now`.
///
/// Buckets are matched by month only. An order created in February of any
/// year counts towards the February bucket.
pub fn monthly_series(orders: &[WorkOrder], now: &Zoned) -> MonthlySeries {
    let tz = now.time_zone();
    let this_month = now.date().first_of_month();

    let buckets = (0..MONTHS)
        .rev()
        .filter_map(|back| this_month.checked_sub(Span::new().months(back)).ok())
        .map(|first| {
            let month = first.month();
            let created = orders
                .iter()
                .filter(|order| local_month(order.created_at, tz) == month)
                .count();
            let completed = orders
                .iter()
                .filter(|order| order.status == WorkOrderStatus::Completed)
                .filter_map(|order| order.actual_completion_date)
                .filter(|&at| local_month(at, tz) == month)
                .count();

            MonthlyBucket {
                month: first.strftime("%b").to_string(),
                month_number: month,
                created: count_u32(created),
                completed: count_u32(completed),
            }
        })
        .collect();

    MonthlySeries(buckets)
}

fn local_month(at: Timestamp, tz: &TimeZone) -> i8 {
    at.to_zoned(tz.clone()).month()
}
