//! SQLite-backed record store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{sync::broadcast, task};

use super::{ChangeEvent, ChangeFeed, ChangeKind, Collection, RecordStore};
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{
        Completion, Machine, MachineOrder, MachinePatch, NewMachine, NewNotification,
        NewWorkOrder, Notification, WorkOrder, WorkOrderPatch,
    },
};

/// Record store on a local SQLite file.
///
/// Each call opens its own connection on the blocking pool, so the store is
/// cheap to share and never holds a connection across await points.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
    feed: ChangeFeed,
}

impl SqliteStore {
    /// Creates a store for an already initialized database file. Use
    /// [`super::StoreBuilder`] to create one from scratch.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            feed: ChangeFeed::new(),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| TrackerError::task("Database task failed", e))?
    }
}

fn not_found(collection: &'static str, id: &str) -> TrackerError {
    TrackerError::NotFound {
        collection,
        id: id.to_string(),
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn list_machines(&self, order: MachineOrder) -> Result<Vec<Machine>> {
        self.with_db(move |db| db.list_machines(order)).await
    }

    async fn get_machine(&self, id: &str) -> Result<Option<Machine>> {
        let id = id.to_string();
        self.with_db(move |db| db.get_machine(&id)).await
    }

    async fn count_machines(&self) -> Result<u64> {
        self.with_db(|db| db.count_machines()).await
    }

    async fn insert_machines(&self, machines: Vec<NewMachine>) -> Result<Vec<Machine>> {
        let inserted = self.with_db(move |db| db.insert_machines(&machines)).await?;
        self.feed.publish(Collection::Machines, ChangeKind::Insert);
        Ok(inserted)
    }

    async fn update_machine(&self, id: &str, patch: MachinePatch) -> Result<Machine> {
        let key = id.to_string();
        let machine = self
            .with_db(move |db| db.update_machine(&key, &patch))
            .await?
            .ok_or_else(|| not_found("machines", id))?;
        self.feed.publish(Collection::Machines, ChangeKind::Update);
        Ok(machine)
    }

    async fn delete_machine(&self, id: &str) -> Result<Machine> {
        let key = id.to_string();
        let machine = self
            .with_db(move |db| db.delete_machine(&key))
            .await?
            .ok_or_else(|| not_found("machines", id))?;
        self.feed.publish(Collection::Machines, ChangeKind::Delete);
        Ok(machine)
    }

    async fn delete_all_machines(&self) -> Result<usize> {
        let removed = self.with_db(|db| db.delete_all_machines()).await?;
        self.feed.publish(Collection::Machines, ChangeKind::Reset);
        Ok(removed)
    }

    async fn list_work_orders(&self) -> Result<Vec<WorkOrder>> {
        self.with_db(|db| db.list_work_orders()).await
    }

    async fn get_work_order(&self, id: &str) -> Result<Option<WorkOrder>> {
        let id = id.to_string();
        self.with_db(move |db| db.get_work_order(&id)).await
    }

    async fn insert_work_orders(&self, orders: Vec<NewWorkOrder>) -> Result<Vec<WorkOrder>> {
        let inserted = self.with_db(move |db| db.insert_work_orders(&orders)).await?;
        self.feed.publish(Collection::WorkOrders, ChangeKind::Insert);
        Ok(inserted)
    }

    async fn update_work_order(&self, id: &str, patch: WorkOrderPatch) -> Result<WorkOrder> {
        let key = id.to_string();
        let order = self
            .with_db(move |db| db.update_work_order(&key, &patch))
            .await?
            .ok_or_else(|| not_found("work_orders", id))?;
        self.feed.publish(Collection::WorkOrders, ChangeKind::Update);
        Ok(order)
    }

    async fn close_work_order(&self, id: &str, completion: Completion) -> Result<WorkOrder> {
        let key = id.to_string();
        let order = self
            .with_db(move |db| db.close_work_order(&key, &completion))
            .await?
            .ok_or_else(|| not_found("work_orders", id))?;
        self.feed.publish(Collection::WorkOrders, ChangeKind::Update);
        Ok(order)
    }

    async fn delete_work_order(&self, id: &str) -> Result<WorkOrder> {
        let key = id.to_string();
        let order = self
            .with_db(move |db| db.delete_work_order(&key))
            .await?
            .ok_or_else(|| not_found("work_orders", id))?;
        self.feed.publish(Collection::WorkOrders, ChangeKind::Delete);
        // Its notifications cascade with it
        self.feed.publish(Collection::Notifications, ChangeKind::Delete);
        Ok(order)
    }

    async fn delete_all_work_orders(&self) -> Result<usize> {
        let removed = self.with_db(|db| db.delete_all_work_orders()).await?;
        self.feed.publish(Collection::WorkOrders, ChangeKind::Reset);
        self.feed.publish(Collection::Notifications, ChangeKind::Reset);
        Ok(removed)
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        self.with_db(|db| db.list_notifications()).await
    }

    async fn insert_notification(&self, notification: NewNotification) -> Result<Notification> {
        let inserted = self
            .with_db(move |db| db.insert_notification(&notification))
            .await?;
        self.feed.publish(Collection::Notifications, ChangeKind::Insert);
        Ok(inserted)
    }

    async fn mark_notification_read(&self, id: &str) -> Result<Notification> {
        let key = id.to_string();
        let notification = self
            .with_db(move |db| db.mark_notification_read(&key))
            .await?
            .ok_or_else(|| not_found("notifications", id))?;
        self.feed.publish(Collection::Notifications, ChangeKind::Update);
        Ok(notification)
    }

    async fn reset_system(&self) -> Result<()> {
        self.with_db(|db| db.reset_system()).await?;
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
