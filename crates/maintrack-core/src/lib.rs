//! Core library for the Maintrack maintenance dashboard.
//!
//! This crate holds everything behind the dashboard except the terminal
//! front end: the record store, the filter and aggregation engine, the form
//! controllers, the watching views and the spreadsheet export.
//!
//! # Architecture
//!
//! - **Store** ([`store`]): the [`RecordStore`] trait with a SQLite
//!   implementation and an in-memory one. Every write publishes a change
//!   event.
//! - **Engine** ([`engine`]): pure filtering and dashboard aggregation over
//!   fetched rows.
//! - **Controllers** ([`controller`]): validate form input, call the store
//!   once per submission and report the outcome as a toast.
//! - **Views** ([`views`]): revisioned caches that re-fetch on change events
//!   and are cancelled when dropped.
//! - **Display** ([`display`]): Markdown rendering of models and results for
//!   the CLI's terminal renderer.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use maintrack_core::{
//!     controller::{LogNotifier, MachineForm},
//!     params::CreateMachine,
//!     RecordStore, StoreBuilder,
//! };
//!
//! # async fn example() -> maintrack_core::Result<()> {
//! let store: Arc<dyn RecordStore> = Arc::new(
//!     StoreBuilder::new()
//!         .with_database_path(Some("maintrack.db"))
//!         .build()
//!         .await?,
//! );
//!
//! let form = MachineForm::new(store.clone(), Arc::new(LogNotifier));
//! let machine = form
//!     .submit_create(&CreateMachine {
//!         name: "Conveyor Belt A1".to_string(),
//!         location: "Line 1".to_string(),
//!         manufacturer: "Acme".to_string(),
//!     })
//!     .await?;
//! println!("{}", machine);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod controller;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod params;
pub mod store;
pub mod views;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types
pub use db::Database;
pub use display::{CloseResult, CreateResult, DeleteResult, OperationStatus, UpdateResult};
pub use error::{Result, TrackerError};
pub use export::export_workbook;
pub use models::{
    DateRange, Machine, Notification, Priority, WorkOrder, WorkOrderFilter, WorkOrderStatus,
};
pub use store::{MemoryStore, RecordStore, SqliteStore, StoreBuilder};
pub use views::{Dashboard, MachineCatalog, WorkOrderBoard};
