//! Command handlers.
//!
//! Every mutating command goes through the same controller a dashboard form
//! would use, so validation and toasts behave identically. Toasts are
//! collected by a [`RecordingNotifier`] and rendered as status lines after
//! the command runs.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use jiff::Zoned;
use maintrack_core::{
    controller::{
        CloseWorkOrderForm, CreateWorkOrderForm, MachineForm, RecordingNotifier, SettingsPanel,
    },
    display::{Machines, Notifications, WorkOrders},
    models::WorkOrderFilter,
    params::{CloseWorkOrder, UpdateWorkOrder},
    CloseResult, CreateResult, Dashboard, DeleteResult, MachineCatalog, OperationStatus,
    RecordStore, UpdateResult, WorkOrderBoard,
};

use crate::{
    cli::{
        CloseOrderArgs, ExportArgs, MachineCommands, NotificationCommands, OrderCommands,
        SettingsCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    store: Arc<dyn RecordStore>,
    renderer: TerminalRenderer,
    toasts: Arc<RecordingNotifier>,
}

impl Cli {
    pub fn new(store: Arc<dyn RecordStore>, renderer: TerminalRenderer) -> Self {
        Self {
            store,
            renderer,
            toasts: Arc::new(RecordingNotifier::new()),
        }
    }

    pub async fn show_dashboard(&self) -> Result<()> {
        let dashboard = Dashboard::new(self.store.clone(), self.toasts.clone());
        dashboard
            .refresh()
            .await
            .context("Failed to load dashboard")?;
        self.renderer
            .render(&dashboard.snapshot(&Zoned::now()).to_string())
    }

    pub async fn handle_machine_command(&self, command: MachineCommands) -> Result<()> {
        let form = MachineForm::new(self.store.clone(), self.toasts.clone());

        match command {
            MachineCommands::Add(args) => {
                let outcome = form.submit_create(&args.into()).await;
                self.flush_toasts()?;
                let machine = outcome.context("Failed to add machine")?;
                self.renderer.render(&CreateResult::new(machine).to_string())
            }
            MachineCommands::List(args) => {
                let catalog = MachineCatalog::new(self.store.clone(), self.toasts.clone());
                catalog
                    .refresh()
                    .await
                    .context("Failed to fetch machines")?;
                let machines = match args.search.as_deref() {
                    Some(term) => catalog.search(term),
                    None => catalog.machines(),
                };
                self.renderer.render(&Machines(machines).to_string())
            }
            MachineCommands::Update(args) => {
                let id = args.id.clone();
                let changes = args.changes();
                if changes.is_empty() {
                    bail!("Nothing to update for machine '{id}'");
                }
                let outcome = form.submit_update(&id, &args.into()).await;
                self.flush_toasts()?;
                let machine = outcome.context("Failed to update machine")?;
                self.renderer
                    .render(&UpdateResult::with_changes(machine, changes).to_string())
            }
            MachineCommands::Delete(args) => {
                let outcome = form.submit_delete(&args.id).await;
                self.flush_toasts()?;
                let machine = outcome.context("Failed to delete machine")?;
                self.renderer.render(&DeleteResult::new(machine).to_string())
            }
        }
    }

    pub async fn handle_order_command(&self, command: OrderCommands) -> Result<()> {
        match command {
            OrderCommands::Create(args) => {
                let form = CreateWorkOrderForm::new(self.store.clone(), self.toasts.clone());
                let outcome = form.submit_create(&args.into()).await;
                self.flush_toasts()?;
                let order = outcome.context("Failed to create work order")?;
                self.renderer.render(&CreateResult::new(order).to_string())
            }
            OrderCommands::List(args) => {
                let filter = WorkOrderFilter::from(args);
                let board = WorkOrderBoard::new(self.store.clone(), self.toasts.clone());
                board
                    .refresh()
                    .await
                    .context("Failed to fetch work orders")?;
                let orders = board.visible(&filter, &Zoned::now());
                self.renderer.render(&WorkOrders(orders).to_string())
            }
            OrderCommands::Show(args) => {
                let order = self
                    .store
                    .get_work_order(&args.id)
                    .await
                    .context("Failed to fetch work order")?
                    .with_context(|| format!("Work order '{}' not found", args.id))?;
                self.renderer.render(&order.to_string())
            }
            OrderCommands::Update(args) => {
                let id = args.id.clone();
                let params = UpdateWorkOrder::from(args);
                let patch = params
                    .into_patch(&jiff::tz::TimeZone::system())
                    .context("Invalid work order update")?;
                if patch.is_empty() {
                    bail!("Nothing to update for work order '{id}'");
                }
                let order = self
                    .store
                    .update_work_order(&id, patch)
                    .await
                    .context("Failed to update work order")?;
                self.renderer.render(&UpdateResult::new(order).to_string())
            }
            OrderCommands::Close(args) => self.close_order(args).await,
            OrderCommands::Delete(args) => {
                let order = self
                    .store
                    .delete_work_order(&args.id)
                    .await
                    .context("Failed to delete work order")?;
                self.renderer.render(&DeleteResult::new(order).to_string())
            }
        }
    }

    async fn close_order(&self, args: CloseOrderArgs) -> Result<()> {
        let order = self
            .store
            .get_work_order(&args.id)
            .await
            .context("Failed to fetch work order")?
            .with_context(|| format!("Work order '{}' not found", args.id))?;

        let params = args.into_params(CloseWorkOrder::prefilled(&Zoned::now()));
        let form = CloseWorkOrderForm::new(self.store.clone(), self.toasts.clone());
        let outcome = form.submit_close(&order, &params).await;
        self.flush_toasts()?;
        let closed = outcome.context("Failed to close work order")?;
        self.renderer.render(&CloseResult(closed).to_string())
    }

    pub async fn handle_notification_command(
        &self,
        command: Option<NotificationCommands>,
    ) -> Result<()> {
        match command.unwrap_or(NotificationCommands::List) {
            NotificationCommands::List => {
                let feed = self
                    .store
                    .list_notifications()
                    .await
                    .context("Failed to fetch notifications")?;
                self.renderer.render(&Notifications(feed).to_string())
            }
            NotificationCommands::Read(args) => {
                let notification = self
                    .store
                    .mark_notification_read(&args.id)
                    .await
                    .context("Failed to mark notification as read")?;
                self.renderer.render(&notification.to_string())
            }
        }
    }

    pub async fn export(&self, args: ExportArgs) -> Result<()> {
        let settings = SettingsPanel::new(self.store.clone(), self.toasts.clone());
        let outcome = settings.export_data(&args.output_dir, &Zoned::now()).await;
        self.flush_toasts()?;
        let path = outcome.context("Failed to export data")?;
        self.renderer
            .render(&format!("Report written to {}\n", path.display()))
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        let settings = SettingsPanel::new(self.store.clone(), self.toasts.clone());

        let outcome = match command {
            SettingsCommands::Clear(args) => {
                if !args.confirm {
                    bail!("Clearing deletes every work order and machine. Re-run with --confirm");
                }
                settings.clear_data().await
            }
            SettingsCommands::Reset(args) => {
                if !args.confirm {
                    bail!("Resetting removes every record. Re-run with --confirm");
                }
                settings.reset_system().await
            }
        };
        self.flush_toasts()?;
        outcome.context("Settings action failed")
    }

    /// Render and discard the toasts raised so far.
    fn flush_toasts(&self) -> Result<()> {
        for toast in self.toasts.drain() {
            self.renderer
                .render(&OperationStatus::from(&toast).to_string())?;
        }
        Ok(())
    }
}
