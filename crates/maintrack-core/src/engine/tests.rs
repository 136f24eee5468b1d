use super::*;
use crate::{
    fixtures::{completed_order, machine, now, pending_order, ts},
    models::{DateRange, Priority, WorkOrder, WorkOrderFilter, WorkOrderStatus},
};

fn february_orders() -> Vec<WorkOrder> {
    let lathe = machine("m-1", "Lathe");
    vec![
        pending_order("wo-3", &lathe, ts("2024-02-20T10:00:00Z")),
        pending_order("wo-2", &lathe, ts("2024-02-01T10:00:00Z")),
        pending_order("wo-1", &lathe, ts("2024-01-15T10:00:00Z")),
    ]
}

fn mixed_orders() -> Vec<WorkOrder> {
    let press = machine("m-1", "Hydraulic Press");
    let belt = machine("m-2", "Conveyor Belt A1");

    let mut urgent = pending_order("wo-1", &press, ts("2024-02-24T09:00:00Z"));
    urgent.priority = Priority::High;
    urgent.problem_description = "Oil LEAK at main cylinder".to_string();
    urgent.assigned_technician = "Robin Ortega".to_string();

    let mut belt_order = pending_order("wo-2", &belt, ts("2024-02-10T09:00:00Z"));
    belt_order.priority = Priority::Low;
    belt_order.assigned_technician = "Alex".to_string();

    let done = completed_order(
        "wo-3",
        &belt,
        ts("2024-01-05T09:00:00Z"),
        ts("2024-01-08T16:00:00Z"),
    );

    vec![urgent, belt_order, done]
}

fn ids(orders: &[WorkOrder]) -> Vec<&str> {
    orders.iter().map(|order| order.id.as_str()).collect()
}

#[test]
fn test_unrestricted_filter_is_identity() {
    let orders = mixed_orders();
    let filter = WorkOrderFilter::default();
    assert!(filter.is_unrestricted());

    let kept = filter_work_orders(&orders, &[], &filter, &now("2024-02-25T12:00:00[UTC]"));
    assert_eq!(kept, orders);
}

#[test]
fn test_status_filter_is_idempotent() {
    let orders = mixed_orders();
    let now = now("2024-02-25T12:00:00[UTC]");

    for status in [WorkOrderStatus::Pending, WorkOrderStatus::Completed] {
        let by_status = WorkOrderFilter {
            status: Some(status),
            ..Default::default()
        };
        let once = filter_work_orders(&orders, &[], &by_status, &now);
        let again = filter_work_orders(&once, &[], &WorkOrderFilter::default(), &now);

        assert_eq!(once, again);
        assert!(once.iter().all(|order| order.status == status));
    }
}

#[test]
fn test_this_month_keeps_february_orders() {
    let orders = february_orders();
    let now = now("2024-02-25T12:00:00[UTC]");
    let filter = WorkOrderFilter {
        date_range: DateRange::ThisMonth,
        ..Default::default()
    };

    let kept = filter_work_orders(&orders, &[], &filter, &now);
    assert_eq!(ids(&kept), vec!["wo-3", "wo-2"]);
}

#[test]
fn test_this_week_depends_only_on_week_start() {
    let mut orders = february_orders();
    let now = now("2024-02-25T12:00:00[UTC]");
    let filter = WorkOrderFilter {
        date_range: DateRange::ThisWeek,
        ..Default::default()
    };

    // 2024-02-25 is a Sunday, so the week has just begun
    assert!(filter_work_orders(&orders, &[], &filter, &now).is_empty());

    orders.insert(
        0,
        pending_order("wo-4", &machine("m-1", "Lathe"), ts("2024-02-25T00:00:00Z")),
    );
    let kept = filter_work_orders(&orders, &[], &filter, &now);
    assert_eq!(ids(&kept), vec!["wo-4"]);
}

#[test]
fn test_today_filter() {
    let mut orders = february_orders();
    orders.push(pending_order(
        "wo-5",
        &machine("m-1", "Lathe"),
        ts("2024-02-25T23:59:59Z"),
    ));
    let filter = WorkOrderFilter {
        date_range: DateRange::Today,
        ..Default::default()
    };

    let kept = filter_work_orders(&orders, &[], &filter, &now("2024-02-25T00:00:01[UTC]"));
    assert_eq!(ids(&kept), vec!["wo-5"]);
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let orders = mixed_orders();
    let now = now("2024-02-25T12:00:00[UTC]");
    let search = |term: &str| {
        let filter = WorkOrderFilter {
            search: term.to_string(),
            ..Default::default()
        };
        filter_work_orders(&orders, &[], &filter, &now)
    };

    // Description
    assert_eq!(ids(&search("oil leak")), vec!["wo-1"]);
    // Machine name, partial
    assert_eq!(ids(&search("CONVEYOR")), vec!["wo-2", "wo-3"]);
    // Technician
    assert_eq!(ids(&search("orte")), vec!["wo-1"]);
    // No field matches
    assert!(search("gearbox").is_empty());
}

#[test]
fn test_search_falls_back_to_machine_lookup() {
    let belt = machine("m-2", "Conveyor Belt A1");
    let mut order = pending_order("wo-1", &belt, ts("2024-02-10T09:00:00Z"));
    order.machine_name = None;
    order.problem_description = "Noisy bearing".to_string();
    let filter = WorkOrderFilter {
        search: "belt".to_string(),
        ..Default::default()
    };
    let now = now("2024-02-25T12:00:00[UTC]");

    assert!(filter_work_orders(std::slice::from_ref(&order), &[], &filter, &now).is_empty());
    assert_eq!(
        filter_work_orders(&[order], &[belt], &filter, &now).len(),
        1
    );
}

#[test]
fn test_compound_filter_ands_criteria() {
    let orders = mixed_orders();
    let filter = WorkOrderFilter {
        status: Some(WorkOrderStatus::Pending),
        priority: Some(Priority::Low),
        machine_id: Some("m-2".to_string()),
        ..Default::default()
    };

    let kept = filter_work_orders(&orders, &[], &filter, &now("2024-02-25T12:00:00[UTC]"));
    assert_eq!(ids(&kept), vec!["wo-2"]);

    let filter = WorkOrderFilter {
        priority: Some(Priority::High),
        machine_id: Some("m-2".to_string()),
        ..Default::default()
    };
    assert!(filter_work_orders(&orders, &[], &filter, &now("2024-02-25T12:00:00[UTC]")).is_empty());
}

#[test]
fn test_filter_does_not_mutate_input() {
    let orders = mixed_orders();
    let before = orders.clone();
    let filter = WorkOrderFilter {
        search: "leak".to_string(),
        ..Default::default()
    };
    let _ = filter_work_orders(&orders, &[], &filter, &now("2024-02-25T12:00:00[UTC]"));
    assert_eq!(orders, before);
}

#[test]
fn test_monthly_series_shape() {
    for reference in [
        "2024-02-25T12:00:00[UTC]",
        "2024-06-01T00:00:00[UTC]",
        "2023-12-31T23:59:59[UTC]",
    ] {
        let now = now(reference);
        let series = monthly_series(&[], &now);

        assert_eq!(series.len(), 6);
        assert_eq!(
            series.latest().map(|bucket| bucket.month_number),
            Some(now.month())
        );
        for pair in series.0.windows(2) {
            assert_eq!(pair[1].month_number, pair[0].month_number % 12 + 1);
        }
    }
}

#[test]
fn test_monthly_series_across_year_boundary() {
    let series = monthly_series(&[], &now("2024-02-25T12:00:00[UTC]"));
    let labels: Vec<&str> = series.iter().map(|bucket| bucket.month.as_str()).collect();
    assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
}

#[test]
fn test_monthly_series_counts() {
    let orders = mixed_orders();
    let series = monthly_series(&orders, &now("2024-02-25T12:00:00[UTC]"));

    let feb = series.latest().expect("current month");
    assert_eq!((feb.created, feb.completed), (2, 0));

    let jan = &series.0[4];
    assert_eq!(jan.month, "Jan");
    assert_eq!((jan.created, jan.completed), (1, 1));
}

#[test]
fn test_monthly_series_ignores_year() {
    let lathe = machine("m-1", "Lathe");
    let orders = vec![
        pending_order("wo-1", &lathe, ts("2024-02-02T09:00:00Z")),
        pending_order("wo-2", &lathe, ts("2023-02-02T09:00:00Z")),
    ];
    let series = monthly_series(&orders, &now("2024-02-25T12:00:00[UTC]"));
    assert_eq!(series.latest().map(|bucket| bucket.created), Some(2));
}

#[test]
fn test_dashboard_stats_and_recent() {
    let orders = mixed_orders();
    let stats = dashboard_stats(4, &orders);

    assert_eq!(stats.total_machines, 4);
    assert_eq!(stats.active_work_orders, 2);
    assert_eq!(stats.completed_work_orders, 1);

    assert_eq!(ids(&recent_work_orders(&orders, 2)), vec!["wo-1", "wo-2"]);
    assert_eq!(recent_work_orders(&orders, RECENT_LIMIT).len(), 3);
}

#[test]
fn test_search_machines() {
    let mut press = machine("m-1", "Hydraulic Press");
    press.location = "Stamping Bay".to_string();
    let mut belt = machine("m-2", "Conveyor Belt A1");
    belt.manufacturer = "Siemens".to_string();
    let machines = vec![press, belt];

    let names = |term: &str| -> Vec<String> {
        search_machines(&machines, term)
            .into_iter()
            .map(|machine| machine.name)
            .collect()
    };

    assert_eq!(names("").len(), 2);
    assert_eq!(names("stamping"), vec!["Hydraulic Press"]);
    assert_eq!(names("SIEM"), vec!["Conveyor Belt A1"]);
    assert_eq!(names("hall"), vec!["Conveyor Belt A1"]);
    assert!(names("robot").is_empty());
}
