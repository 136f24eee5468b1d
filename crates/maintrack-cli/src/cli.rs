//! Command-line argument wrappers using clap
//!
//! Each subcommand has a clap `Args` struct that converts into the matching
//! core parameter type, so the core crate stays free of clap attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Controllers / Store
//! ```
//!
//! Dates are `YYYY-MM-DD` and times `HH:MM`, as on the dashboard forms. They
//! are parsed by the core in the local time zone.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use maintrack_core::{
    models::{DateRange, Priority, WorkOrderFilter, WorkOrderStatus},
    params::{CloseWorkOrder, CreateMachine, CreateWorkOrder, UpdateMachine, UpdateWorkOrder},
};

// ============================================================================
// Machines
// ============================================================================

/// Register a new machine
#[derive(Args)]
pub struct AddMachineArgs {
    /// Display name of the machine
    pub name: String,
    #[arg(short, long, help = "Where the machine is installed")]
    pub location: String,
    #[arg(short, long, help = "Who built the machine")]
    pub manufacturer: String,
}

impl From<AddMachineArgs> for CreateMachine {
    fn from(val: AddMachineArgs) -> Self {
        CreateMachine {
            name: val.name,
            location: val.location,
            manufacturer: val.manufacturer,
        }
    }
}

/// List registered machines, newest first
#[derive(Args)]
pub struct ListMachinesArgs {
    #[arg(
        short,
        long,
        help = "Only show machines whose name, location or manufacturer contains this text"
    )]
    pub search: Option<String>,
}

/// Edit a machine's details
#[derive(Args)]
pub struct UpdateMachineArgs {
    #[arg(help = "Unique identifier of the machine to update")]
    pub id: String,
    #[arg(short, long, help = "New display name")]
    pub name: Option<String>,
    #[arg(short, long, help = "New location")]
    pub location: Option<String>,
    #[arg(short, long, help = "New manufacturer")]
    pub manufacturer: Option<String>,
    #[arg(long, help = "Technical specification as a JSON document")]
    pub specifications: Option<String>,
    #[arg(long, help = "Maintenance schedule as a JSON document")]
    pub schedule: Option<String>,
}

impl UpdateMachineArgs {
    /// Human-readable list of the fields this update sets.
    pub fn changes(&self) -> Vec<String> {
        [
            self.name.as_ref().map(|v| format!("Name set to '{v}'")),
            self.location.as_ref().map(|v| format!("Location set to '{v}'")),
            self.manufacturer
                .as_ref()
                .map(|v| format!("Manufacturer set to '{v}'")),
            self.specifications
                .as_ref()
                .map(|_| "Specifications replaced".to_string()),
            self.schedule
                .as_ref()
                .map(|_| "Maintenance schedule replaced".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl From<UpdateMachineArgs> for UpdateMachine {
    fn from(val: UpdateMachineArgs) -> Self {
        UpdateMachine {
            name: val.name,
            location: val.location,
            manufacturer: val.manufacturer,
            specifications: val.specifications,
            maintenance_schedule: val.schedule,
        }
    }
}

/// Delete a machine permanently
///
/// Machines that still have work orders cannot be deleted.
#[derive(Args)]
pub struct DeleteMachineArgs {
    #[arg(help = "Unique identifier of the machine to delete")]
    pub id: String,
}

#[derive(Subcommand)]
pub enum MachineCommands {
    /// Register a new machine
    #[command(alias = "a")]
    Add(AddMachineArgs),
    /// List registered machines
    #[command(aliases = ["l", "ls"])]
    List(ListMachinesArgs),
    /// Edit a machine's details
    #[command(alias = "u")]
    Update(UpdateMachineArgs),
    /// Delete a machine permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteMachineArgs),
}

// ============================================================================
// Work orders
// ============================================================================

/// Raise a new work order
#[derive(Args)]
pub struct CreateOrderArgs {
    #[arg(long, help = "Unique identifier of the machine with the problem")]
    pub machine: String,
    #[arg(short, long, help = "What is wrong")]
    pub description: String,
    #[arg(short, long, value_enum, default_value_t = PriorityArg::Medium)]
    pub priority: PriorityArg,
    #[arg(short, long, help = "Technician the work is assigned to")]
    pub technician: String,
    #[arg(long, help = "Date the problem started (YYYY-MM-DD)")]
    pub start_date: String,
    #[arg(long, help = "Time the problem started (HH:MM)")]
    pub start_time: String,
    #[arg(long, help = "Expected completion date (YYYY-MM-DD)")]
    pub expected_date: String,
    #[arg(long, help = "Expected completion time (HH:MM)")]
    pub expected_time: String,
    #[arg(long, help = "Who is raising the order")]
    pub created_by: String,
}

impl From<CreateOrderArgs> for CreateWorkOrder {
    fn from(val: CreateOrderArgs) -> Self {
        CreateWorkOrder {
            machine_id: val.machine,
            problem_description: val.description,
            priority: val.priority.into(),
            assigned_technician: val.technician,
            problem_start_date: val.start_date,
            problem_start_time: val.start_time,
            expected_completion_date: val.expected_date,
            expected_completion_time: val.expected_time,
            created_by: val.created_by,
        }
    }
}

/// List work orders, newest first
///
/// All filters combine; an order is listed only if it passes every one.
#[derive(Args)]
pub struct ListOrdersArgs {
    #[arg(short, long, value_enum, help = "Only orders with this status")]
    pub status: Option<StatusArg>,
    #[arg(short, long, value_enum, help = "Only orders with this priority")]
    pub priority: Option<PriorityArg>,
    #[arg(short, long, help = "Only orders for this machine ID")]
    pub machine: Option<String>,
    #[arg(short, long, value_enum, default_value_t = RangeArg::All, help = "Creation date window")]
    pub range: RangeArg,
    #[arg(
        long,
        default_value = "",
        help = "Text to find in the description, machine name or technician"
    )]
    pub search: String,
}

impl From<ListOrdersArgs> for WorkOrderFilter {
    fn from(val: ListOrdersArgs) -> Self {
        WorkOrderFilter {
            date_range: val.range.into(),
            status: val.status.map(Into::into),
            priority: val.priority.map(Into::into),
            machine_id: val.machine,
            search: val.search,
        }
    }
}

/// Show one work order
#[derive(Args)]
pub struct ShowOrderArgs {
    #[arg(help = "Unique identifier of the work order to show")]
    pub id: String,
}

/// Edit an open work order
#[derive(Args)]
pub struct UpdateOrderArgs {
    #[arg(help = "Unique identifier of the work order to update")]
    pub id: String,
    #[arg(short, long, help = "New problem description")]
    pub description: Option<String>,
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    #[arg(short, long, help = "Reassign to this technician")]
    pub technician: Option<String>,
    #[arg(long, requires = "expected_time", help = "New expected completion date (YYYY-MM-DD)")]
    pub expected_date: Option<String>,
    #[arg(long, requires = "expected_date", help = "New expected completion time (HH:MM)")]
    pub expected_time: Option<String>,
    #[arg(long, help = "Estimated maintenance cost")]
    pub cost: Option<f64>,
}

impl From<UpdateOrderArgs> for UpdateWorkOrder {
    fn from(val: UpdateOrderArgs) -> Self {
        UpdateWorkOrder {
            problem_description: val.description,
            priority: val.priority.map(Into::into),
            assigned_technician: val.technician,
            expected_completion_date: val.expected_date,
            expected_completion_time: val.expected_time,
            maintenance_cost: val.cost,
        }
    }
}

/// Close a pending work order
///
/// The completion date and time default to now.
#[derive(Args)]
pub struct CloseOrderArgs {
    #[arg(help = "Unique identifier of the work order to close")]
    pub id: String,
    #[arg(short, long, help = "How the issue was resolved")]
    pub resolution: String,
    #[arg(long, default_value = "", help = "Replaced parts as a comma-separated list")]
    pub parts: String,
    #[arg(short, long, default_value = "", help = "Anything else worth recording")]
    pub notes: String,
    #[arg(short, long, help = "Name of the technician signing off the work")]
    pub signature: String,
    #[arg(long, help = "Actual maintenance cost")]
    pub cost: Option<f64>,
    #[arg(long, help = "Completion date (YYYY-MM-DD), defaults to today")]
    pub date: Option<String>,
    #[arg(long, help = "Completion time (HH:MM), defaults to now")]
    pub time: Option<String>,
}

impl CloseOrderArgs {
    /// Close-form parameters with unset date and time filled from `prefilled`.
    pub fn into_params(self, prefilled: CloseWorkOrder) -> CloseWorkOrder {
        CloseWorkOrder {
            actual_completion_date: self.date.unwrap_or(prefilled.actual_completion_date),
            actual_completion_time: self.time.unwrap_or(prefilled.actual_completion_time),
            resolution_details: self.resolution,
            parts_replaced: self.parts,
            additional_notes: self.notes,
            technician_signature: self.signature,
            maintenance_cost: self.cost,
        }
    }
}

/// Delete a work order permanently
#[derive(Args)]
pub struct DeleteOrderArgs {
    #[arg(help = "Unique identifier of the work order to delete")]
    pub id: String,
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Raise a new work order
    #[command(alias = "c")]
    Create(CreateOrderArgs),
    /// List work orders
    #[command(aliases = ["l", "ls"])]
    List(ListOrdersArgs),
    /// Show one work order
    #[command(alias = "s")]
    Show(ShowOrderArgs),
    /// Edit an open work order
    #[command(alias = "u")]
    Update(UpdateOrderArgs),
    /// Close a pending work order
    Close(CloseOrderArgs),
    /// Delete a work order permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteOrderArgs),
}

// ============================================================================
// Notifications, export and settings
// ============================================================================

/// Mark a notification as read
#[derive(Args)]
pub struct ReadNotificationArgs {
    #[arg(help = "Unique identifier of the notification")]
    pub id: String,
}

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List notifications, newest first
    #[command(aliases = ["l", "ls"])]
    List,
    /// Mark a notification as read
    #[command(alias = "r")]
    Read(ReadNotificationArgs),
}

/// Write the spreadsheet report
#[derive(Args)]
pub struct ExportArgs {
    #[arg(
        short,
        long,
        default_value = ".",
        help = "Directory to write maintenance_report_<date>.xlsx into"
    )]
    pub output_dir: PathBuf,
}

/// Confirmation for destructive settings actions
#[derive(Args)]
pub struct ConfirmArgs {
    /// Confirm the action (required to prevent accidental data loss)
    #[arg(long)]
    pub confirm: bool,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Delete all work orders and then all machines
    Clear(ConfirmArgs),
    /// Remove every record in one step
    Reset(ConfirmArgs),
}

// ============================================================================
// Value enums
// ============================================================================

/// Command-line representation of work order priorities
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(val: PriorityArg) -> Self {
        match val {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

/// Command-line representation of work order statuses
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Pending,
    Completed,
}

impl From<StatusArg> for WorkOrderStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Pending => WorkOrderStatus::Pending,
            StatusArg::Completed => WorkOrderStatus::Completed,
        }
    }
}

/// Creation date windows for `order list --range`
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RangeArg {
    All,
    Today,
    Week,
    Month,
}

impl From<RangeArg> for DateRange {
    fn from(val: RangeArg) -> Self {
        match val {
            RangeArg::All => DateRange::All,
            RangeArg::Today => DateRange::Today,
            RangeArg::Week => DateRange::ThisWeek,
            RangeArg::Month => DateRange::ThisMonth,
        }
    }
}
