//! Pages that keep a fetched copy of store data current.
//!
//! A view owns a [`Revisioned`] cache, a [`CancellationToken`] and a handle
//! to the store. [`refresh`](WorkOrderBoard::refresh) re-runs the page's full
//! fetch and commits the result only if no newer fetch has started since.
//! `watch` subscribes to the collections the page shows and refreshes on
//! every [`ChangeEvent`](crate::store::ChangeEvent).
//!
//! Dropping a view cancels its token: an in-flight fetch returns
//! [`TrackerError::Cancelled`] without touching the cache and every watch
//! task exits.
//!
//! - [`WorkOrderBoard`]: work order list with filters
//! - [`MachineCatalog`]: machine list with search
//! - [`Dashboard`]: counters, monthly chart and recent orders

use std::sync::Arc;

use async_trait::async_trait;
use tokio::{
    sync::broadcast::{error::RecvError, Receiver},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::{
    cache::Revisioned,
    controller::{Notifier, Toast},
    error::{Result, TrackerError},
    store::{ChangeEvent, Collection, RecordStore},
};

pub mod board;
pub mod catalog;
pub mod dashboard;


pub use board::{BoardData, WorkOrderBoard};
pub use catalog::MachineCatalog;
pub use dashboard::{Dashboard, DashboardData};

/// The fetch behind one page.
#[async_trait]
trait Loader: Send + Sync + 'static {
    type Data: Clone + Default + Send + Sync + 'static;

    /// Page name used in log lines.
    const NAME: &'static str;
    /// Toast raised when a fetch fails.
    const FETCH_FAILURE: &'static str;
    /// Collections whose changes trigger a refresh.
    const WATCHES: &'static [Collection];

    async fn load(&self, store: &dyn RecordStore) -> Result<Self::Data>;
}

struct Page<L: Loader> {
    loader: L,
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    cache: Revisioned<L::Data>,
    token: CancellationToken,
}

impl<L: Loader> Page<L> {
    async fn refresh(&self) -> Result<()> {
        let ticket = self.cache.begin();
        let outcome = tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(TrackerError::Cancelled),
            result = self.loader.load(self.store.as_ref()) => result,
        };

        match outcome {
            Ok(data) => {
                if self.cache.commit(ticket, data) {
                    log::debug!("Refreshed {}", L::NAME);
                }
                Ok(())
            }
            Err(TrackerError::Cancelled) => {
                log::debug!("Fetch for {} cancelled", L::NAME);
                Err(TrackerError::Cancelled)
            }
            Err(e) => {
                log::error!("{}: {e}", L::FETCH_FAILURE);
                self.notifier.notify(Toast::failure(L::FETCH_FAILURE));
                Err(e)
            }
        }
    }

    async fn watch_collection(self: Arc<Self>, collection: Collection, mut rx: Receiver<ChangeEvent>) {
        log::debug!("{} watching {}", L::NAME, collection.as_str());

        loop {
            tokio::select! {
                _ = self.token.cancelled() => {
                    log::debug!("{} stopped watching {}", L::NAME, collection.as_str());
                    break;
                }
                result = rx.recv() => match result {
                    Ok(event) => {
                        log::trace!("{} received {:?} on {}", L::NAME, event.kind, collection.as_str());
                        // Failures are already logged and toasted
                        let _ = self.refresh().await;
                    }
                    Err(RecvError::Lagged(n)) => {
                        log::warn!("{} lagged {n} event(s) on {}", L::NAME, collection.as_str());
                        let _ = self.refresh().await;
                    }
                    Err(RecvError::Closed) => {
                        log::debug!("Change feed for {} closed", collection.as_str());
                        break;
                    }
                }
            }
        }
    }
}

/// Owning handle that cancels the page when dropped.
struct PageHandle<L: Loader> {
    page: Arc<Page<L>>,
}

impl<L: Loader> PageHandle<L> {
    fn new(loader: L, store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            page: Arc::new(Page {
                loader,
                store,
                notifier,
                cache: Revisioned::default(),
                token: CancellationToken::new(),
            }),
        }
    }

    async fn refresh(&self) -> Result<()> {
        self.page.refresh().await
    }

    fn data(&self) -> L::Data {
        self.page.cache.snapshot()
    }

    fn is_loaded(&self) -> bool {
        self.page.cache.committed() > 0
    }

    /// Subscribe to every watched collection before returning, so no event
    /// published after this call is missed.
    fn watch(&self) -> Vec<JoinHandle<()>> {
        L::WATCHES
            .iter()
            .map(|&collection| {
                let rx = self.page.store.subscribe(collection);
                tokio::spawn(Arc::clone(&self.page).watch_collection(collection, rx))
            })
            .collect()
    }

    fn cancel(&self) {
        self.page.token.cancel();
    }
}

impl<L: Loader> Drop for PageHandle<L> {
    fn drop(&mut self) {
        self.page.token.cancel();
    }
}
