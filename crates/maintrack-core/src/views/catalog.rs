//! Machine list page.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use super::{Loader, PageHandle};
use crate::{
    controller::Notifier,
    engine::search_machines,
    error::Result,
    models::{Machine, MachineOrder},
    store::{Collection, RecordStore},
};

struct CatalogLoader;

#[async_trait]
impl Loader for CatalogLoader {
    type Data = Vec<Machine>;

    const NAME: &'static str = "machine catalog";
    const FETCH_FAILURE: &'static str = "Failed to fetch machines";
    const WATCHES: &'static [Collection] = &[Collection::Machines];

    async fn load(&self, store: &dyn RecordStore) -> Result<Vec<Machine>> {
        store.list_machines(MachineOrder::NewestFirst).await
    }
}

/// Registered machines, newest first, with a search box.
pub struct MachineCatalog {
    handle: PageHandle<CatalogLoader>,
}

impl MachineCatalog {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            handle: PageHandle::new(CatalogLoader, store, notifier),
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

    pub fn machines(&self) -> Vec<Machine> {
        self.handle.data()
    }

    /// Cached machines matching `term` on name, location or manufacturer.
    pub fn search(&self, term: &str) -> Vec<Machine> {
        search_machines(&self.handle.data(), term)
    }
}
