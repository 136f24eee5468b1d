//! Dashboard page.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Zoned;
use tokio::task::JoinHandle;

use super::{Loader, PageHandle};
use crate::{
    controller::Notifier,
    engine::dashboard_snapshot,
    error::Result,
    models::{DashboardSnapshot, WorkOrder},
    store::{Collection, RecordStore},
};

/// Raw counts and rows the dashboard is derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub total_machines: u64,
    pub orders: Vec<WorkOrder>,
}

struct DashboardLoader;

#[async_trait]
impl Loader for DashboardLoader {
    type Data = DashboardData;

    const NAME: &'static str = "dashboard";
    const FETCH_FAILURE: &'static str = "Failed to fetch dashboard data";
    const WATCHES: &'static [Collection] = &[Collection::WorkOrders, Collection::Machines];

    async fn load(&self, store: &dyn RecordStore) -> Result<DashboardData> {
        let (total_machines, orders) =
            tokio::try_join!(store.count_machines(), store.list_work_orders())?;
        Ok(DashboardData {
            total_machines,
            orders,
        })
    }
}

/// Headline counters, six-month chart and recent work orders.
pub struct Dashboard {
    handle: PageHandle<DashboardLoader>,
}

impl Dashboard {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            handle: PageHandle::new(DashboardLoader, store, notifier),
        }
    }

    pub async fn refresh(&self) -> Result<()> {
        self.handle.refresh().await
    }

    pub fn watch(&self) -> Vec<JoinHandle<()>> {
        self.handle.watch()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Stats, monthly series and recent orders from the cached rows, with
    /// calendar boundaries taken from `now`.
    pub fn snapshot(&self, now: &Zoned) -> DashboardSnapshot {
        let data = self.handle.data();
        dashboard_snapshot(data.total_machines, &data.orders, now)
    }
}
