//! Record builders shared by the unit tests.

use jiff::{Timestamp, Zoned};

use crate::models::{Completion, Machine, Priority, WorkOrder, WorkOrderStatus};

pub fn ts(s: &str) -> Timestamp {
    s.parse().expect("valid timestamp")
}

pub fn now(s: &str) -> Zoned {
    s.parse().expect("valid zoned datetime")
}

pub fn machine(id: &str, name: &str) -> Machine {
    let created = ts("2024-01-01T08:00:00Z");
    Machine {
        id: id.to_string(),
        name: name.to_string(),
        location: "Hall 1".to_string(),
        manufacturer: "Acme".to_string(),
        specifications: None,
        maintenance_schedule: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn pending_order(id: &str, machine: &Machine, created_at: Timestamp) -> WorkOrder {
    WorkOrder {
        id: id.to_string(),
        machine_id: machine.id.clone(),
        machine_name: Some(machine.name.clone()),
        problem_description: format!("Fault on {}", machine.name),
        priority: Priority::Medium,
        assigned_technician: "Dana".to_string(),
        problem_start_date: created_at,
        expected_completion_date: created_at,
        status: WorkOrderStatus::Pending,
        actual_completion_date: None,
        resolution_details: None,
        parts_replaced: vec![],
        additional_notes: None,
        technician_signature: None,
        maintenance_cost: None,
        created_by: "Sam".to_string(),
        created_at,
        updated_at: created_at,
    }
}

pub fn completed_order(
    id: &str,
    machine: &Machine,
    created_at: Timestamp,
    completed_at: Timestamp,
) -> WorkOrder {
    let mut order = pending_order(id, machine, created_at);
    completion(completed_at).apply_to(&mut order, completed_at);
    order
}

pub fn completion(at: Timestamp) -> Completion {
    Completion {
        actual_completion_date: at,
        resolution_details: "Replaced worn parts".to_string(),
        parts_replaced: vec!["bearing".to_string()],
        additional_notes: None,
        technician_signature: "Dana".to_string(),
        maintenance_cost: Some(80.0),
    }
}
