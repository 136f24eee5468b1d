//! Behaviour shared by every record store implementation.
//!
//! Each check is written against `&dyn RecordStore` and run once per
//! implementation.

use tempfile::TempDir;

use super::*;
use crate::{
    error::TrackerError,
    fixtures::{completion, ts},
    models::{NotificationKind, Priority, WorkOrderStatus},
};

async fn sqlite_store() -> (TempDir, SqliteStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

fn new_machine(name: &str) -> NewMachine {
    NewMachine {
        name: name.to_string(),
        location: "Hall 1".to_string(),
        manufacturer: "Acme".to_string(),
        specifications: None,
        maintenance_schedule: None,
    }
}

fn new_order(machine_id: &str, description: &str) -> NewWorkOrder {
    NewWorkOrder {
        machine_id: machine_id.to_string(),
        problem_description: description.to_string(),
        priority: Priority::High,
        assigned_technician: "Dana".to_string(),
        problem_start_date: ts("2024-02-20T08:00:00Z"),
        expected_completion_date: ts("2024-02-22T17:00:00Z"),
        created_by: "Sam".to_string(),
    }
}

async fn seed_machine(store: &dyn RecordStore, name: &str) -> Machine {
    store
        .insert_machines(vec![new_machine(name)])
        .await
        .expect("Failed to insert machine")
        .remove(0)
}

async fn seed_order(store: &dyn RecordStore, machine: &Machine, description: &str) -> WorkOrder {
    store
        .insert_work_orders(vec![new_order(&machine.id, description)])
        .await
        .expect("Failed to insert work order")
        .remove(0)
}

macro_rules! for_each_store {
    ($($name:ident => $check:ident),* $(,)?) => {
        $(
            mod $name {
                use super::*;

                #[tokio::test]
                async fn memory() {
                    $check(&MemoryStore::new()).await;
                }

                #[tokio::test]
                async fn sqlite() {
                    let (_temp_dir, store) = sqlite_store().await;
                    $check(&store).await;
                }
            }
        )*
    };
}

for_each_store! {
    machine_crud => check_machine_crud,
    work_orders_join_machine_name => check_work_orders_join_machine_name,
    unknown_machine_is_conflict => check_unknown_machine_is_conflict,
    referenced_machine_cannot_be_deleted => check_referenced_machine_cannot_be_deleted,
    close_is_one_way => check_close_is_one_way,
    missing_records_are_not_found => check_missing_records_are_not_found,
    notifications => check_notifications,
    reset_clears_everything => check_reset_clears_everything,
    writes_publish_change_events => check_writes_publish_change_events,
    order_deletes_reach_notification_watchers => check_order_deletes_reach_notification_watchers,
}

async fn check_machine_crud(store: &dyn RecordStore) {
    let zeta = seed_machine(store, "Zeta Mill").await;
    let alpha = seed_machine(store, "alpha press").await;
    assert_ne!(zeta.id, alpha.id);
    assert_eq!(store.count_machines().await.unwrap(), 2);

    let by_name = store.list_machines(MachineOrder::Name).await.unwrap();
    assert_eq!(by_name[0].name, "alpha press");

    let newest = store.list_machines(MachineOrder::NewestFirst).await.unwrap();
    assert_eq!(newest[0].id, alpha.id);

    let patch = MachinePatch {
        location: Some("Hall 7".to_string()),
        specifications: Some(serde_json::json!({"axes": 5})),
        ..Default::default()
    };
    let updated = store.update_machine(&zeta.id, patch).await.unwrap();
    assert_eq!(updated.location, "Hall 7");
    assert_eq!(updated.name, "Zeta Mill");

    let fetched = store.get_machine(&zeta.id).await.unwrap().expect("machine exists");
    assert_eq!(fetched.specifications, Some(serde_json::json!({"axes": 5})));

    let deleted = store.delete_machine(&alpha.id).await.unwrap();
    assert_eq!(deleted.name, "alpha press");
    assert_eq!(store.count_machines().await.unwrap(), 1);
}

async fn check_work_orders_join_machine_name(store: &dyn RecordStore) {
    let lathe = seed_machine(store, "Lathe").await;
    let first = seed_order(store, &lathe, "Spindle noise").await;
    let second = seed_order(store, &lathe, "Coolant leak").await;

    assert_eq!(first.status, WorkOrderStatus::Pending);
    assert_eq!(first.machine_name.as_deref(), Some("Lathe"));
    assert!(first.actual_completion_date.is_none());

    let orders = store.list_work_orders().await.unwrap();
    assert_eq!(orders.len(), 2);
    // Newest first
    assert_eq!(orders[0].id, second.id);
    assert_eq!(orders[1].id, first.id);

    store
        .update_machine(
            &lathe.id,
            MachinePatch {
                name: Some("CNC Lathe".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let fetched = store.get_work_order(&first.id).await.unwrap().expect("order exists");
    assert_eq!(fetched.machine_name.as_deref(), Some("CNC Lathe"));
}

async fn check_unknown_machine_is_conflict(store: &dyn RecordStore) {
    let lathe = seed_machine(store, "Lathe").await;
    let err = store
        .insert_work_orders(vec![
            new_order(&lathe.id, "Valid"),
            new_order("no-such-machine", "Invalid"),
        ])
        .await
        .unwrap_err();

    assert!(err.is_conflict(), "expected conflict, got {err:?}");
    assert!(store.list_work_orders().await.unwrap().is_empty());
}

async fn check_referenced_machine_cannot_be_deleted(store: &dyn RecordStore) {
    let lathe = seed_machine(store, "Lathe").await;
    seed_order(store, &lathe, "Spindle noise").await;

    let err = store.delete_machine(&lathe.id).await.unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err:?}");

    let err = store.delete_all_machines().await.unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err:?}");

    // Orders first, then machines succeeds
    assert_eq!(store.delete_all_work_orders().await.unwrap(), 1);
    assert_eq!(store.delete_all_machines().await.unwrap(), 1);
}

async fn check_close_is_one_way(store: &dyn RecordStore) {
    let lathe = seed_machine(store, "Lathe").await;
    let order = seed_order(store, &lathe, "Spindle noise").await;
    let closed_at = ts("2024-02-25T09:30:00Z");

    let closed = store
        .close_work_order(&order.id, completion(closed_at))
        .await
        .unwrap();

    assert_eq!(closed.status, WorkOrderStatus::Completed);
    assert_eq!(closed.actual_completion_date, Some(closed_at));
    assert_eq!(closed.resolution_details.as_deref(), Some("Replaced worn parts"));
    assert_eq!(closed.technician_signature.as_deref(), Some("Dana"));
    assert_eq!(closed.parts_replaced, vec!["bearing"]);
    assert_eq!(closed.maintenance_cost, Some(80.0));
    assert_eq!(closed.machine_id, order.machine_id);
    assert_eq!(closed.problem_description, order.problem_description);
    assert_eq!(closed.created_at, order.created_at);

    let err = store
        .close_work_order(&order.id, completion(closed_at))
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err:?}");
}

async fn check_missing_records_are_not_found(store: &dyn RecordStore) {
    assert!(store.get_work_order("missing").await.unwrap().is_none());
    assert!(store.get_machine("missing").await.unwrap().is_none());

    let err = store
        .update_machine("missing", MachinePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { collection: "machines", .. }));

    let err = store
        .close_work_order("missing", completion(ts("2024-02-25T09:30:00Z")))
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { collection: "work_orders", .. }));

    let err = store.delete_work_order("missing").await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { .. }));

    let err = store.mark_notification_read("missing").await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound { collection: "notifications", .. }));
}

async fn check_notifications(store: &dyn RecordStore) {
    let lathe = seed_machine(store, "Lathe").await;
    let order = seed_order(store, &lathe, "Spindle noise").await;

    let created = store
        .insert_notification(NewNotification {
            kind: NotificationKind::New,
            message: "New work order created for Lathe".to_string(),
            work_order_id: order.id.clone(),
        })
        .await
        .unwrap();
    assert!(!created.read);

    let marked = store.mark_notification_read(&created.id).await.unwrap();
    assert!(marked.read);

    let listed = store.list_notifications().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].read);

    // Deleting the order takes its notifications with it
    store.delete_work_order(&order.id).await.unwrap();
    assert!(store.list_notifications().await.unwrap().is_empty());
}

async fn check_reset_clears_everything(store: &dyn RecordStore) {
    let lathe = seed_machine(store, "Lathe").await;
    let order = seed_order(store, &lathe, "Spindle noise").await;
    store
        .insert_notification(NewNotification {
            kind: NotificationKind::Pending,
            message: "Reminder".to_string(),
            work_order_id: order.id,
        })
        .await
        .unwrap();

    store.reset_system().await.unwrap();

    assert_eq!(store.count_machines().await.unwrap(), 0);
    assert!(store.list_work_orders().await.unwrap().is_empty());
    assert!(store.list_notifications().await.unwrap().is_empty());
}

async fn check_writes_publish_change_events(store: &dyn RecordStore) {
    let mut machines = store.subscribe(Collection::Machines);
    let mut orders = store.subscribe(Collection::WorkOrders);

    let lathe = seed_machine(store, "Lathe").await;
    assert_eq!(
        machines.recv().await.unwrap(),
        ChangeEvent {
            collection: Collection::Machines,
            kind: ChangeKind::Insert
        }
    );

    let order = seed_order(store, &lathe, "Spindle noise").await;
    assert_eq!(orders.recv().await.unwrap().kind, ChangeKind::Insert);

    store
        .close_work_order(&order.id, completion(ts("2024-02-25T09:30:00Z")))
        .await
        .unwrap();
    assert_eq!(orders.recv().await.unwrap().kind, ChangeKind::Update);

    // Failed writes publish nothing
    let _ = store.delete_machine(&lathe.id).await;
    assert!(machines.try_recv().is_err());

    store.reset_system().await.unwrap();
    assert_eq!(machines.recv().await.unwrap().kind, ChangeKind::Reset);
    assert_eq!(orders.recv().await.unwrap().kind, ChangeKind::Reset);
}

async fn check_order_deletes_reach_notification_watchers(store: &dyn RecordStore) {
    let lathe = seed_machine(store, "Lathe").await;
    let first = seed_order(store, &lathe, "Spindle noise").await;
    let second = seed_order(store, &lathe, "Coolant leak").await;
    for order in [&first, &second] {
        store
            .insert_notification(NewNotification {
                kind: NotificationKind::New,
                message: format!("New work order created for {}", lathe.name),
                work_order_id: order.id.clone(),
            })
            .await
            .unwrap();
    }

    let mut notifications = store.subscribe(Collection::Notifications);

    store.delete_work_order(&first.id).await.unwrap();
    assert_eq!(store.list_notifications().await.unwrap().len(), 1);
    assert_eq!(
        notifications.try_recv().unwrap(),
        ChangeEvent {
            collection: Collection::Notifications,
            kind: ChangeKind::Delete
        }
    );

    store.delete_all_work_orders().await.unwrap();
    assert!(store.list_notifications().await.unwrap().is_empty());
    assert_eq!(notifications.try_recv().unwrap().kind, ChangeKind::Reset);
    assert!(notifications.try_recv().is_err());
}
