//! Display formatting for models, collections and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! The newtype wrappers in this module add context: list formatting with
//! empty-collection messages, and result banners for create, update, close
//! and delete operations. All output is markdown for the terminal renderer.
//!
//! ## Module Organization
//!
//! - [`collections`]: list wrappers (Machines, WorkOrders, Notifications)
//! - [`results`]: operation result types (CreateResult, UpdateResult,
//!   CloseResult, DeleteResult)
//! - [`status`]: one-line success/failure messages (OperationStatus)
//! - [`datetime`]: timestamp formatting for terminal and report output
//! - [`models`]: Display implementations for domain models
//!
//! ## Example
//!
//! ```rust
//! use maintrack_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Work order created successfully".to_string());
//! assert_eq!(status.to_string(), "Success: Work order created successfully\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Machines, Notifications, WorkOrders};
pub use datetime::{LocalDateTime, ReportDateTime};
pub use results::{CloseResult, CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
