//! Work order create and close forms.

use std::sync::Arc;

use jiff::tz::TimeZone;

use super::{single, submit, Messages, Notifier, SingleFlight};
use crate::{
    error::{Result, TrackerError},
    models::WorkOrder,
    params::{CloseWorkOrder, CreateWorkOrder},
    store::RecordStore,
};

const CREATE: Messages = Messages {
    success: "Work order created successfully",
    failure: "Failed to create work order",
};
const CLOSE: Messages = Messages {
    success: "Work order closed successfully",
    failure: "Failed to close work order",
};

/// Raises new work orders.
///
/// Dates and times on the form are interpreted in the form's time zone,
/// the system zone unless set with [`CreateWorkOrderForm::with_time_zone`].
pub struct CreateWorkOrderForm {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    flight: SingleFlight,
    tz: TimeZone,
}

impl CreateWorkOrderForm {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            flight: SingleFlight::new(),
            tz: TimeZone::system(),
        }
    }

    pub fn with_time_zone(mut self, tz: TimeZone) -> Self {
        self.tz = tz;
        self
    }

    pub fn is_submitting(&self) -> bool {
        self.flight.is_submitting()
    }

    /// Validate the form and insert one pending work order.
    pub async fn submit_create(&self, params: &CreateWorkOrder) -> Result<WorkOrder> {
        submit(&self.flight, self.notifier.as_ref(), CREATE, async {
            let order = params.into_new_work_order(&self.tz)?;
            let inserted = self.store.insert_work_orders(vec![order]).await?;
            single(inserted, "work order")
        })
        .await
    }
}

/// Completes pending work orders.
pub struct CloseWorkOrderForm {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    flight: SingleFlight,
    tz: TimeZone,
}

impl CloseWorkOrderForm {
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            flight: SingleFlight::new(),
            tz: TimeZone::system(),
        }
    }

    pub fn with_time_zone(mut self, tz: TimeZone) -> Self {
        self.tz = tz;
        self
    }

    pub fn is_submitting(&self) -> bool {
        self.flight.is_submitting()
    }

    /// Close `order` with the completion details from the form.
    ///
    /// Only status and the completion fields change; the machine reference,
    /// description and creation time are left as they are.
    ///
    /// # Errors
    ///
    /// `TrackerError::Validation` if `order` is not pending or a required
    /// field is missing, `TrackerError::Conflict` if the store finds it was
    /// closed in the meantime.
    pub async fn submit_close(&self, order: &WorkOrder, params: &CloseWorkOrder) -> Result<WorkOrder> {
        submit(&self.flight, self.notifier.as_ref(), CLOSE, async {
            if !order.is_pending() {
                return Err(TrackerError::validation("status")
                    .with_reason(format!("work order '{}' is not pending", order.id)));
            }
            let completion = params.into_completion(&self.tz)?;
            self.store.close_work_order(&order.id, completion).await
        })
        .await
    }
}
