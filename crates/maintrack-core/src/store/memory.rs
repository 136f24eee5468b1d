//! In-memory record store.

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

use super::{ChangeEvent, ChangeFeed, ChangeKind, Collection, RecordStore};
use crate::{
    error::{Result, TrackerError},
    models::{
        Completion, Machine, MachineOrder, MachinePatch, NewMachine, NewNotification,
        NewWorkOrder, Notification, WorkOrder, WorkOrderPatch, WorkOrderStatus,
    },
};

#[derive(Debug, Default)]
struct Tables {
    // Insertion order
    machines: Vec<Machine>,
    work_orders: Vec<WorkOrder>,
    notifications: Vec<Notification>,
}

impl Tables {
    fn machine_name(&self, machine_id: &str) -> Option<String> {
        self.machines
            .iter()
            .find(|machine| machine.id == machine_id)
            .map(|machine| machine.name.clone())
    }

    /// A stored order with the machine name joined in.
    fn joined(&self, order: &WorkOrder) -> WorkOrder {
        WorkOrder {
            machine_name: self.machine_name(&order.machine_id),
            ..order.clone()
        }
    }

    fn work_order_mut(&mut self, id: &str) -> Result<&mut WorkOrder> {
        self.work_orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| not_found("work_orders", id))
    }
}

/// Record store held entirely in memory.
///
/// Enforces the same referential rules as the SQLite schema: work orders must
/// reference an existing machine, referenced machines cannot be deleted, and
/// deleting a work order removes its notifications.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    feed: ChangeFeed,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(collection: &'static str, id: &str) -> TrackerError {
    TrackerError::NotFound {
        collection,
        id: id.to_string(),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_machines(&self, order: MachineOrder) -> Result<Vec<Machine>> {
        let tables = self.tables.lock().await;
        let mut machines = tables.machines.clone();
        match order {
            MachineOrder::Name => {
                machines.sort_by_key(|machine| machine.name.to_lowercase());
            }
            MachineOrder::NewestFirst => machines.reverse(),
        }
        Ok(machines)
    }

    async fn get_machine(&self, id: &str) -> Result<Option<Machine>> {
        let tables = self.tables.lock().await;
        Ok(tables.machines.iter().find(|machine| machine.id == id).cloned())
    }

    async fn count_machines(&self) -> Result<u64> {
        let tables = self.tables.lock().await;
        Ok(tables.machines.len() as u64)
    }

    async fn insert_machines(&self, machines: Vec<NewMachine>) -> Result<Vec<Machine>> {
        let now = Timestamp::now();
        let inserted: Vec<Machine> = machines
            .into_iter()
            .map(|machine| Machine {
                id: Uuid::new_v4().to_string(),
                name: machine.name,
                location: machine.location,
                manufacturer: machine.manufacturer,
                specifications: machine.specifications,
                maintenance_schedule: machine.maintenance_schedule,
                created_at: now,
                updated_at: now,
            })
            .collect();

        self.tables
            .lock()
            .await
            .machines
            .extend(inserted.iter().cloned());
        self.feed.publish(Collection::Machines, ChangeKind::Insert);
        Ok(inserted)
    }

    async fn update_machine(&self, id: &str, patch: MachinePatch) -> Result<Machine> {
        let updated = {
            let mut tables = self.tables.lock().await;
            let machine = tables
                .machines
                .iter_mut()
                .find(|machine| machine.id == id)
                .ok_or_else(|| not_found("machines", id))?;
            patch.apply_to(machine, Timestamp::now());
            machine.clone()
        };
        self.feed.publish(Collection::Machines, ChangeKind::Update);
        Ok(updated)
    }

    async fn delete_machine(&self, id: &str) -> Result<Machine> {
        let removed = {
            let mut tables = self.tables.lock().await;
            let index = tables
                .machines
                .iter()
                .position(|machine| machine.id == id)
                .ok_or_else(|| not_found("machines", id))?;
            if tables.work_orders.iter().any(|order| order.machine_id == id) {
                return Err(TrackerError::conflict(format!(
                    "machine '{id}' is referenced by work orders"
                )));
            }
            tables.machines.remove(index)
        };
        self.feed.publish(Collection::Machines, ChangeKind::Delete);
        Ok(removed)
    }

    async fn delete_all_machines(&self) -> Result<usize> {
        let removed = {
            let mut tables = self.tables.lock().await;
            if !tables.work_orders.is_empty() {
                return Err(TrackerError::conflict(
                    "machines are referenced by work orders",
                ));
            }
            std::mem::take(&mut tables.machines).len()
        };
        self.feed.publish(Collection::Machines, ChangeKind::Reset);
        Ok(removed)
    }

    async fn list_work_orders(&self) -> Result<Vec<WorkOrder>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .work_orders
            .iter()
            .rev()
            .map(|order| tables.joined(order))
            .collect())
    }

    async fn get_work_order(&self, id: &str) -> Result<Option<WorkOrder>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .work_orders
            .iter()
            .find(|order| order.id == id)
            .map(|order| tables.joined(order)))
    }

    async fn insert_work_orders(&self, orders: Vec<NewWorkOrder>) -> Result<Vec<WorkOrder>> {
        let inserted = {
            let mut tables = self.tables.lock().await;
            if let Some(order) = orders
                .iter()
                .find(|order| tables.machine_name(&order.machine_id).is_none())
            {
                return Err(TrackerError::conflict(format!(
                    "machine '{}' does not exist",
                    order.machine_id
                )));
            }

            let now = Timestamp::now();
            let new_orders: Vec<WorkOrder> = orders
                .into_iter()
                .map(|order| WorkOrder {
                    id: Uuid::new_v4().to_string(),
                    machine_id: order.machine_id,
                    machine_name: None,
                    problem_description: order.problem_description,
                    priority: order.priority,
                    assigned_technician: order.assigned_technician,
                    problem_start_date: order.problem_start_date,
                    expected_completion_date: order.expected_completion_date,
                    status: WorkOrderStatus::Pending,
                    actual_completion_date: None,
                    resolution_details: None,
                    parts_replaced: Vec::new(),
                    additional_notes: None,
                    technician_signature: None,
                    maintenance_cost: None,
                    created_by: order.created_by,
                    created_at: now,
                    updated_at: now,
                })
                .collect();

            let joined: Vec<WorkOrder> = new_orders.iter().map(|order| tables.joined(order)).collect();
            tables.work_orders.extend(new_orders);
            joined
        };
        self.feed.publish(Collection::WorkOrders, ChangeKind::Insert);
        Ok(inserted)
    }

    async fn update_work_order(&self, id: &str, patch: WorkOrderPatch) -> Result<WorkOrder> {
        let updated = {
            let mut tables = self.tables.lock().await;
            let order = tables.work_order_mut(id)?;
            patch.apply_to(order, Timestamp::now());
            let order = order.clone();
            tables.joined(&order)
        };
        self.feed.publish(Collection::WorkOrders, ChangeKind::Update);
        Ok(updated)
    }

    async fn close_work_order(&self, id: &str, completion: Completion) -> Result<WorkOrder> {
        let closed = {
            let mut tables = self.tables.lock().await;
            let order = tables.work_order_mut(id)?;
            if !order.is_pending() {
                return Err(TrackerError::conflict(format!(
                    "work order '{id}' is already completed"
                )));
            }
            completion.apply_to(order, Timestamp::now());
            let order = order.clone();
            tables.joined(&order)
        };
        self.feed.publish(Collection::WorkOrders, ChangeKind::Update);
        Ok(closed)
    }

    async fn delete_work_order(&self, id: &str) -> Result<WorkOrder> {
        let removed = {
            let mut tables = self.tables.lock().await;
            let index = tables
                .work_orders
                .iter()
                .position(|order| order.id == id)
                .ok_or_else(|| not_found("work_orders", id))?;
            let order = tables.work_orders.remove(index);
            tables
                .notifications
                .retain(|notification| notification.work_order_id != id);
            tables.joined(&order)
        };
        self.feed.publish(Collection::WorkOrders, ChangeKind::Delete);
        // Its notifications cascade with it
        self.feed.publish(Collection::Notifications, ChangeKind::Delete);
        Ok(removed)
    }

    async fn delete_all_work_orders(&self) -> Result<usize> {
        let removed = {
            let mut tables = self.tables.lock().await;
            tables.notifications.clear();
            std::mem::take(&mut tables.work_orders).len()
        };
        self.feed.publish(Collection::WorkOrders, ChangeKind::Reset);
        self.feed.publish(Collection::Notifications, ChangeKind::Reset);
        Ok(removed)
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        let tables = self.tables.lock().await;
        Ok(tables.notifications.iter().rev().cloned().collect())
    }

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification> {
        let inserted = {
            let mut tables = self.tables.lock().await;
            if !tables
                .work_orders
                .iter()
                .any(|order| order.id == notification.work_order_id)
            {
                return Err(TrackerError::conflict(format!(
                    "work order '{}' does not exist",
                    notification.work_order_id
                )));
            }
            let inserted = Notification {
                id: Uuid::new_v4().to_string(),
                kind: notification.kind,
                message: notification.message,
                work_order_id: notification.work_order_id,
                created_at: Timestamp::now(),
                read: false,
            };
            tables.notifications.push(inserted.clone());
            inserted
        };
        self.feed.publish(Collection::Notifications, ChangeKind::Insert);
        Ok(inserted)
    }

    async fn mark_notification_read(&self, id: &str) -> Result<Notification> {
        let marked = {
            let mut tables = self.tables.lock().await;
            let notification = tables
                .notifications
                .iter_mut()
                .find(|notification| notification.id == id)
                .ok_or_else(|| not_found("notifications", id))?;
            notification.read = true;
            notification.clone()
        };
        self.feed.publish(Collection::Notifications, ChangeKind::Update);
        Ok(marked)
    }

    async fn reset_system(&self) -> Result<()> {
        *self.tables.lock().await = Tables::default();
        for collection in [
            Collection::Notifications,
            Collection::WorkOrders,
            Collection::Machines,
        ] {
            self.feed.publish(collection, ChangeKind::Reset);
        }
        Ok(())
    }

    fn subscribe(&self, collection: Collection) -> broadcast::Receiver<ChangeEvent> {
        self.feed.subscribe(collection)
    }
}
