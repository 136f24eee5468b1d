//! Data models for machines, work orders and notifications.
//!
//! This module contains the domain records held by the record store plus the
//! write payloads used to create and modify them. Display implementations for
//! these models live in [`crate::display::models`] so that data structures
//! stay separate from presentation.
//!
//! # Record types
//!
//! - [`Machine`]: equipment that work orders are raised against
//! - [`WorkOrder`]: a maintenance task, pending until it is closed
//! - [`Notification`]: an entry in the notification feed
//!
//! # Write payloads
//!
//! - [`NewMachine`], [`NewWorkOrder`], [`NewNotification`] for inserts
//! - [`MachinePatch`], [`WorkOrderPatch`] for partial updates
//! - [`Completion`] for the one-way pending → completed transition
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use maintrack_core::models::{Priority, WorkOrder, WorkOrderStatus};
//!
//! let order = WorkOrder {
//!     id: "wo-1".to_string(),
//!     machine_id: "m-1".to_string(),
//!     machine_name: Some("Conveyor Belt A1".to_string()),
//!     problem_description: "Belt slipping".to_string(),
//!     priority: Priority::High,
//!     assigned_technician: "Dana".to_string(),
//! #   problem_start_date: Timestamp::now(),
//! #   expected_completion_date: Timestamp::now(),
//!     status: WorkOrderStatus::Pending,
//!     // ... completion fields stay empty while pending
//! #   actual_completion_date: None,
//! #   resolution_details: None,
//! #   parts_replaced: vec![],
//! #   additional_notes: None,
//! #   technician_signature: None,
//! #   maintenance_cost: None,
//! #   created_by: "Sam".to_string(),
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//! assert!(order.is_pending());
//! println!("{}", order); // Markdown with status icon and metadata
//! ```

pub mod filters;
pub mod machine;
pub mod notification;
pub mod status;
pub mod summary;
pub mod work_order;


pub use filters::{DateRange, WorkOrderFilter};
pub use machine::{Machine, MachineOrder, MachinePatch, NewMachine};
pub use notification::{NewNotification, Notification};
pub use status::{NotificationKind, Priority, WorkOrderStatus};
pub use summary::{DashboardSnapshot, DashboardStats, MonthlyBucket, MonthlySeries};
pub use work_order::{Completion, NewWorkOrder, WorkOrder, WorkOrderPatch};
