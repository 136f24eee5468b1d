//! Record store interface and its implementations.
//!
//! Every read and write the application performs goes through
//! [`RecordStore`]. Two implementations are provided:
//!
//! - [`SqliteStore`]: persistent storage on a local SQLite file, with each
//!   call running on tokio's blocking pool
//! - [`MemoryStore`]: the same semantics held in memory, for tests and
//!   embedding
//!
//! # Change notifications
//!
//! Each store owns a [`ChangeFeed`] with one broadcast channel per
//! [`Collection`]. Every successful write publishes a [`ChangeEvent`];
//! subscribers decide for themselves how to react (the views in
//! [`crate::views`] re-fetch everything).
//!
//! ```text
//! controller ──write──▶ RecordStore ──ChangeEvent──▶ view watch task ──▶ refetch
//! ```
//!
//! # Errors
//!
//! Mutations on a missing record fail with [`TrackerError::NotFound`].
//! Referential integrity violations (unknown machine on insert, deleting a
//! referenced machine) fail with [`TrackerError::Conflict`], as does closing
//! an order that is already completed.
//!
//! [`TrackerError::NotFound`]: crate::error::TrackerError::NotFound
//! [`TrackerError::Conflict`]: crate::error::TrackerError::Conflict

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::{
    error::Result,
    models::{
        Completion, Machine, MachineOrder, MachinePatch, NewMachine, NewNotification,
        NewWorkOrder, Notification, WorkOrder, WorkOrderPatch,
    },
};

pub mod builder;
pub mod memory;
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use builder::StoreBuilder;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Buffered events per subscriber before it starts lagging.
const CHANNEL_CAPACITY: usize = 64;

/// A table of records that can be watched for changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Machines,
    WorkOrders,
    Notifications,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Machines => "machines",
            Collection::WorkOrders => "work_orders",
            Collection::Notifications => "notifications",
        }
    }
}

/// What happened to a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
    /// The whole collection was emptied
    Reset,
}

/// Notification that a collection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
}

/// Per-collection broadcast channels owned by a store.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    machines: broadcast::Sender<ChangeEvent>,
    work_orders: broadcast::Sender<ChangeEvent>,
    notifications: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (machines, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (work_orders, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (notifications, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            machines,
            work_orders,
            notifications,
        }
    }

    fn sender(&self, collection: Collection) -> &broadcast::Sender<ChangeEvent> {
        match collection {
            Collection::Machines => &self.machines,
            Collection::WorkOrders => &self.work_orders,
            Collection::Notifications => &self.notifications,
        }
    }

    pub fn subscribe(&self, collection: Collection) -> broadcast::Receiver<ChangeEvent> {
        self.sender(collection).subscribe()
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, collection: Collection, kind: ChangeKind) {
        let event = ChangeEvent { collection, kind };
        match self.sender(collection).send(event) {
            Ok(receivers) => {
                log::debug!("Published {kind:?} on {} to {receivers} subscriber(s)", collection.as_str())
            }
            Err(_) => log::trace!("No subscribers for {}", collection.as_str()),
        }
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Capability set of the record store.
///
/// Object safe, so components hold an `Arc<dyn RecordStore>` and tests can
/// substitute their own implementation.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All machines in the requested order.
    async fn list_machines(&self, order: MachineOrder) -> Result<Vec<Machine>>;

    async fn get_machine(&self, id: &str) -> Result<Option<Machine>>;

    async fn count_machines(&self) -> Result<u64>;

    /// Insert machines, returning them with generated IDs and timestamps.
    async fn insert_machines(&self, machines: Vec<NewMachine>) -> Result<Vec<Machine>>;

    async fn update_machine(&self, id: &str, patch: MachinePatch) -> Result<Machine>;

    /// Delete a machine, returning the removed record.
    async fn delete_machine(&self, id: &str) -> Result<Machine>;

    /// Delete every machine, returning how many were removed.
    async fn delete_all_machines(&self) -> Result<usize>;

    /// All work orders with the machine name joined in, newest first.
    async fn list_work_orders(&self) -> Result<Vec<WorkOrder>>;

    async fn get_work_order(&self, id: &str) -> Result<Option<WorkOrder>>;

    /// Insert pending work orders. All or nothing.
    async fn insert_work_orders(&self, orders: Vec<NewWorkOrder>) -> Result<Vec<WorkOrder>>;

    async fn update_work_order(&self, id: &str, patch: WorkOrderPatch) -> Result<WorkOrder>;

    /// Flip a pending order to completed and write every completion field in
    /// one update.
    async fn close_work_order(&self, id: &str, completion: Completion) -> Result<WorkOrder>;

    async fn delete_work_order(&self, id: &str) -> Result<WorkOrder>;

    async fn delete_all_work_orders(&self) -> Result<usize>;

    /// Notification feed, newest first.
    async fn list_notifications(&self) -> Result<Vec<Notification>>;

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification>;

    async fn mark_notification_read(&self, id: &str) -> Result<Notification>;

    /// Remove all notifications, work orders and machines atomically.
    async fn reset_system(&self) -> Result<()>;

    /// Receive a [`ChangeEvent`] for every write to `collection`.
    fn subscribe(&self, collection: Collection) -> broadcast::Receiver<ChangeEvent>;
}
