#![allow(dead_code)]

use std::sync::Arc;

use maintrack_core::{
    controller::RecordingNotifier,
    models::{NewMachine, NewWorkOrder, Priority},
    RecordStore, SqliteStore, StoreBuilder,
};
use tempfile::TempDir;

/// Helper function to create a store on a fresh database file
pub async fn create_test_store() -> (TempDir, Arc<SqliteStore>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, Arc::new(store))
}

pub fn notifier() -> Arc<RecordingNotifier> {
    Arc::new(RecordingNotifier::new())
}

pub fn new_machine(name: &str, location: &str, manufacturer: &str) -> NewMachine {
    NewMachine {
        name: name.to_string(),
        location: location.to_string(),
        manufacturer: manufacturer.to_string(),
        specifications: None,
        maintenance_schedule: None,
    }
}

pub fn new_order(machine_id: &str, description: &str, priority: Priority) -> NewWorkOrder {
    let start = "2024-02-20T08:00:00Z".parse().expect("valid timestamp");
    let expected = "2024-02-22T17:00:00Z".parse().expect("valid timestamp");
    NewWorkOrder {
        machine_id: machine_id.to_string(),
        problem_description: description.to_string(),
        priority,
        assigned_technician: "Dana".to_string(),
        problem_start_date: start,
        expected_completion_date: expected,
        created_by: "Sam".to_string(),
    }
}

/// Seed two machines and three orders, returning the store as a trait object.
pub async fn seeded(store: Arc<SqliteStore>) -> Arc<dyn RecordStore> {
    let machines = store
        .insert_machines(vec![
            new_machine("Conveyor Belt A1", "Line 1", "Acme"),
            new_machine("CNC Mill", "Hall 2", "Haas"),
        ])
        .await
        .expect("Failed to insert machines");

    store
        .insert_work_orders(vec![
            new_order(&machines[0].id, "Belt slipping", Priority::High),
            new_order(&machines[1].id, "Spindle noise", Priority::Medium),
            new_order(&machines[1].id, "Coolant leak", Priority::Low),
        ])
        .await
        .expect("Failed to insert work orders");

    store
}
