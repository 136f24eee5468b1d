use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ExportArgs, MachineCommands, NotificationCommands, OrderCommands, SettingsCommands,
};

/// Maintenance dashboard for machines and their work orders
///
/// Maintrack keeps a register of machines and the maintenance work orders
/// raised against them. Orders are created as pending and closed with a
/// resolution, replaced parts and a technician's signature. The dashboard
/// summarises open and completed work over the last six months, and all data
/// can be exported to a spreadsheet report.
#[derive(Parser)]
#[command(version, about, name = "mt")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/maintrack/maintrack.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Maintrack CLI
///
/// Running `mt` without a command shows the dashboard.
#[derive(Subcommand)]
pub enum Commands {
    /// Show counters, the six-month chart and recent work orders
    #[command(alias = "d")]
    Dashboard,
    /// Manage machines
    #[command(alias = "m")]
    Machine {
        #[command(subcommand)]
        command: MachineCommands,
    },
    /// Manage work orders
    #[command(alias = "o")]
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Show or acknowledge notifications
    #[command(alias = "n")]
    Notifications {
        #[command(subcommand)]
        command: Option<NotificationCommands>,
    },
    /// Export all machines and work orders to an .xlsx report
    Export(ExportArgs),
    /// Clear or reset stored data
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}
