//! Maintrack CLI Application
//!
//! Command-line front end for the maintenance dashboard: machines, work
//! orders, notifications, the dashboard summary and the spreadsheet export.

mod args;
mod cli;
mod handlers;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use maintrack_core::StoreBuilder;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let store = StoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to open the maintenance database")?;

    info!("Maintrack started with {}", store.database_path().display());

    let cli = Cli::new(Arc::new(store), TerminalRenderer::new(!no_color));

    match command {
        Some(Machine { command }) => cli.handle_machine_command(command).await,
        Some(Order { command }) => cli.handle_order_command(command).await,
        Some(Notifications { command }) => cli.handle_notification_command(command).await,
        Some(Export(args)) => cli.export(args).await,
        Some(Settings { command }) => cli.handle_settings_command(command).await,
        Some(Dashboard) | None => cli.show_dashboard().await,
    }
}
