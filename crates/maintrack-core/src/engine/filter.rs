//! Work order and machine list filtering.

use jiff::Zoned;

use crate::models::{Machine, WorkOrder, WorkOrderFilter};

/// Apply `filter` to `orders`, preserving their order.
///
/// The machine name used for search is the joined `machine_name`, falling
/// back to a lookup in `machines` when the join is missing.
///
/// ```rust
/// use maintrack_core::{engine::filter_work_orders, models::WorkOrderFilter};
///
/// let now = jiff::Zoned::now();
/// let kept = filter_work_orders(&[], &[], &WorkOrderFilter::default(), &now);
/// assert!(kept.is_empty());
/// ```
pub fn filter_work_orders(
    orders: &[WorkOrder],
    machines: &[Machine],
    filter: &WorkOrderFilter,
    now: &Zoned,
) -> Vec<WorkOrder> {
    let needle = filter.search.to_lowercase();

    orders
        .iter()
        .filter(|order| filter.date_range.contains(order.created_at, now))
        .filter(|order| filter.status.map_or(true, |status| order.status == status))
        .filter(|order| filter.priority.map_or(true, |priority| order.priority == priority))
        .filter(|order| {
            filter
                .machine_id
                .as_deref()
                .map_or(true, |id| order.machine_id == id)
        })
        .filter(|order| needle.is_empty() || matches_search(order, machines, &needle))
        .cloned()
        .collect()
}

fn matches_search(order: &WorkOrder, machines: &[Machine], needle: &str) -> bool {
    let machine_name = order.machine_name.as_deref().or_else(|| {
        machines
            .iter()
            .find(|machine| machine.id == order.machine_id)
            .map(|machine| machine.name.as_str())
    });

    contains_ci(&order.problem_description, needle)
        || machine_name.is_some_and(|name| contains_ci(name, needle))
        || contains_ci(&order.assigned_technician, needle)
}

/// Machines whose name, location or manufacturer contains `term`, ignoring
/// case. An empty term keeps everything.
pub fn search_machines(machines: &[Machine], term: &str) -> Vec<Machine> {
    let needle = term.to_lowercase();
    machines
        .iter()
        .filter(|machine| {
            needle.is_empty()
                || contains_ci(&machine.name, &needle)
                || contains_ci(&machine.location, &needle)
                || contains_ci(&machine.manufacturer, &needle)
        })
        .cloned()
        .collect()
}

// `needle` must already be lowercase
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
