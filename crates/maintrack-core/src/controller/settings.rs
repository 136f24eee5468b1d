//! Data export and destructive maintenance actions.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use jiff::Zoned;

use super::{submit, Messages, Notifier, SingleFlight};
use crate::{error::Result, export::export_workbook, store::RecordStore};

const EXPORT: Messages = Messages {
    success: "Data exported successfully",
    failure: "Failed to export data",
};
const CLEAR: Messages = Messages {
    success: "All data has been cleared successfully",
    failure: "Failed to clear data",
};
const RESET: Messages = Messages {
    success: "System has been reset successfully",
    failure: "Failed to reset system",
};

/// Exports, clears or resets all stored data.
pub struct SettingsPanel {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    flight: SingleFlight,
}

impl SettingsPanel {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            flight: SingleFlight::new(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.flight.is_submitting()
    }

    /// Write the spreadsheet report into `dir`, returning its path.
    pub async fn export_data(&self, dir: &Path, now: &Zoned) -> Result<PathBuf> {
        submit(
            &self.flight,
            self.notifier.as_ref(),
            EXPORT,
            export_workbook(self.store.as_ref(), dir, now),
        )
        .await
    }

    /// Delete all work orders, then all machines.
    ///
    /// The two deletes are separate calls. If the second fails the work
    /// orders stay deleted.
    pub async fn clear_data(&self) -> Result<()> {
        submit(&self.flight, self.notifier.as_ref(), CLEAR, async {
            let orders = self.store.delete_all_work_orders().await?;
            let machines = self.store.delete_all_machines().await?;
            log::info!("Cleared {orders} work order(s) and {machines} machine(s)");
            Ok(())
        })
        .await
    }

    /// Remove every record in one atomic store call.
    pub async fn reset_system(&self) -> Result<()> {
        submit(
            &self.flight,
            self.notifier.as_ref(),
            RESET,
            self.store.reset_system(),
        )
        .await
    }
}
