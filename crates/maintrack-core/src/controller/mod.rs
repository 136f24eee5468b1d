//! Form and workflow controllers.
//!
//! Each controller turns one user action into validated store calls and
//! reports the outcome as a [`Toast`] on an injected [`Notifier`]. All of
//! them follow the same sequence:
//!
//! 1. the [`SingleFlight`] guard is taken, or the submission is rejected
//!    with `TrackerError::SubmissionInFlight` without touching the store
//! 2. input is validated and the store is called
//! 3. a success or failure toast is raised, failures are also logged
//! 4. the guard is released
//!
//! The typed error is always returned to the caller as well.
//!
//! - [`MachineForm`]: add, edit and delete machines
//! - [`CreateWorkOrderForm`]: raise a new work order
//! - [`CloseWorkOrderForm`]: complete a pending work order
//! - [`SettingsPanel`]: clear data and reset the system

use std::future::Future;

use crate::error::{Result, TrackerError};

pub mod flight;
pub mod machine_form;
pub mod notifier;
pub mod settings;
pub mod work_order_form;


pub use flight::{FlightGuard, SingleFlight};
pub use machine_form::MachineForm;
pub use notifier::{LogNotifier, Notifier, RecordingNotifier, Toast, ToastLevel};
pub use settings::SettingsPanel;
pub use work_order_form::{CloseWorkOrderForm, CreateWorkOrderForm};

/// Toast texts for one kind of submission.
#[derive(Debug, Clone, Copy)]
struct Messages {
    success: &'static str,
    failure: &'static str,
}

/// Run `op` under `flight` and raise the matching toast.
async fn submit<T, F>(
    flight: &SingleFlight,
    notifier: &dyn Notifier,
    messages: Messages,
    op: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let _guard = flight.try_begin().map_err(|e| {
        log::debug!("Rejected submission: {}", messages.failure);
        e
    })?;

    let outcome = op.await;
    match &outcome {
        Ok(_) => notifier.notify(Toast::success(messages.success)),
        Err(e) => {
            log::error!("{}: {e}", messages.failure);
            notifier.notify(Toast::failure(messages.failure));
        }
    }
    outcome
}

/// The only record of a single-record insert.
fn single<T>(mut records: Vec<T>, collection: &str) -> Result<T> {
    records
        .pop()
        .ok_or_else(|| TrackerError::network(format!("store returned no inserted {collection}")))
}
