//! Work order list page.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Zoned;
use tokio::task::JoinHandle;

use super::{Loader, PageHandle};
use crate::{
    controller::Notifier,
    engine::filter_work_orders,
    error::Result,
    models::{Machine, MachineOrder, WorkOrder, WorkOrderFilter},
    store::{Collection, RecordStore},
};

/// Rows behind the work order list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardData {
    /// Newest first, machine name joined in
    pub orders: Vec<WorkOrder>,
    /// Sorted by name, for the machine filter and name lookups
    pub machines: Vec<Machine>,
}

struct BoardLoader;

#[async_trait]
impl Loader for BoardLoader {
    type Data = BoardData;

    const NAME: &'static str = "work order board";
    const FETCH_FAILURE: &'static str = "Failed to fetch work orders";
    // Machine renames change the joined names
    const WATCHES: &'static [Collection] = &[Collection::WorkOrders, Collection::Machines];

    async fn load(&self, store: &dyn RecordStore) -> Result<BoardData> {
        let (orders, machines) = tokio::try_join!(
            store.list_work_orders(),
            store.list_machines(MachineOrder::Name)
        )?;
        Ok(BoardData { orders, machines })
    }
}

/// The work order list with its filter bar.
pub struct WorkOrderBoard {
    handle: PageHandle<BoardLoader>,
}

impl WorkOrderBoard {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            handle: PageHandle::new(BoardLoader, store, notifier),
        }
    }

    /// Fetch all work orders and machines.
    ///
    /// # Errors
    ///
    /// `TrackerError::Cancelled` once the board has been cancelled, otherwise
    /// whatever the store returned. The cached rows are left untouched on
    /// error.
    pub async fn refresh(&self) -> Result<()> {
        self.handle.refresh().await
    }

    /// Refresh whenever work orders or machines change.
    pub fn watch(&self) -> Vec<JoinHandle<()>> {
        self.handle.watch()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.is_loaded()
    }

    pub fn data(&self) -> BoardData {
        self.handle.data()
    }

    /// The cached orders that pass `filter`, evaluated at `now`.
    pub fn visible(&self, filter: &WorkOrderFilter, now: &Zoned) -> Vec<WorkOrder> {
        let data = self.handle.data();
        filter_work_orders(&data.orders, &data.machines, filter, now)
    }
}
