//! Machine registration form.

use std::sync::Arc;

use super::{single, submit, Messages, Notifier, SingleFlight};
use crate::{
    error::Result,
    models::{Machine, MachinePatch, NewMachine},
    params::{CreateMachine, UpdateMachine},
    store::RecordStore,
};

const ADD: Messages = Messages {
    success: "Machine added successfully",
    failure: "Failed to add machine",
};
const UPDATE: Messages = Messages {
    success: "Machine updated successfully",
    failure: "Failed to update machine",
};
const DELETE: Messages = Messages {
    success: "Machine deleted successfully",
    failure: "Failed to delete machine",
};

/// Adds, edits and deletes machines.
pub struct MachineForm {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    flight: SingleFlight,
}

impl MachineForm {
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

    /// Check that name, location and manufacturer are present and insert the
    /// machine.
    pub async fn submit_create(&self, params: &CreateMachine) -> Result<Machine> {
        submit(&self.flight, self.notifier.as_ref(), ADD, async {
            let machine = NewMachine::try_from(params)?;
            let inserted = self.store.insert_machines(vec![machine]).await?;
            single(inserted, "machine")
        })
        .await
    }

    pub async fn submit_update(&self, id: &str, params: &UpdateMachine) -> Result<Machine> {
        submit(&self.flight, self.notifier.as_ref(), UPDATE, async {
            let patch = MachinePatch::try_from(params)?;
            self.store.update_machine(id, patch).await
        })
        .await
    }

    /// Delete a machine. The store refuses while work orders reference it.
    pub async fn submit_delete(&self, id: &str) -> Result<Machine> {
        submit(
            &self.flight,
            self.notifier.as_ref(),
            DELETE,
            self.store.delete_machine(id),
        )
        .await
    }
}
