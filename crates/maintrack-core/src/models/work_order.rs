//! Work order model definition and related write payloads.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Priority, WorkOrderStatus};

/// A maintenance task raised against one machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkOrder {
    /// Opaque unique identifier assigned by the store
    pub id: String,

    /// ID of the machine this order is for
    pub machine_id: String,

    /// Name of the referenced machine, joined in by the store on reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<String>,

    /// What is wrong
    pub problem_description: String,

    pub priority: Priority,

    /// Technician the order is assigned to
    pub assigned_technician: String,

    /// When the problem started
    pub problem_start_date: Timestamp,

    /// When the work is expected to be finished
    pub expected_completion_date: Timestamp,

    pub status: WorkOrderStatus,

    /// When the work was actually finished (completed orders only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_completion_date: Option<Timestamp>,

    /// How the issue was resolved (completed orders only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_details: Option<String>,

    /// Names of replaced parts, in the order they were entered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts_replaced: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,

    /// Name of the technician who signed off the work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_signature: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_cost: Option<f64>,

    /// Who raised the order
    pub created_by: String,

    /// Timestamp when the order was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the order was last modified (UTC)
    pub updated_at: Timestamp,
}

impl WorkOrder {
    /// Returns true while the order is still open.
    pub fn is_pending(&self) -> bool {
        self.status == WorkOrderStatus::Pending
    }
}

/// Field values for a work order about to be inserted.
///
/// New orders are always stored as pending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewWorkOrder {
    pub machine_id: String,
    pub problem_description: String,
    pub priority: Priority,
    pub assigned_technician: String,
    pub problem_start_date: Timestamp,
    pub expected_completion_date: Timestamp,
    pub created_by: String,
}

/// Partial update of an open work order's descriptive fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkOrderPatch {
    pub problem_description: Option<String>,
    pub priority: Option<Priority>,
    pub assigned_technician: Option<String>,
    pub expected_completion_date: Option<Timestamp>,
    pub maintenance_cost: Option<f64>,
}

impl WorkOrderPatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.problem_description.is_none()
            && self.priority.is_none()
            && self.assigned_technician.is_none()
            && self.expected_completion_date.is_none()
            && self.maintenance_cost.is_none()
    }

    /// Apply the patch to an in-memory order.
    pub fn apply_to(&self, order: &mut WorkOrder, now: Timestamp) {
        if let Some(description) = &self.problem_description {
            order.problem_description = description.clone();
        }
        if let Some(priority) = self.priority {
            order.priority = priority;
        }
        if let Some(technician) = &self.assigned_technician {
            order.assigned_technician = technician.clone();
        }
        if let Some(expected) = self.expected_completion_date {
            order.expected_completion_date = expected;
        }
        if let Some(cost) = self.maintenance_cost {
            order.maintenance_cost = Some(cost);
        }
        order.updated_at = now;
    }
}

/// Completion fields written when an order is closed.
///
/// The store writes all of them together with the status flip in a single
/// update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Completion {
    pub actual_completion_date: Timestamp,
    pub resolution_details: String,
    pub parts_replaced: Vec<String>,
    pub additional_notes: Option<String>,
    pub technician_signature: String,
    pub maintenance_cost: Option<f64>,
}

impl Completion {
    /// Apply the completion to an in-memory order and mark it completed.
    pub fn apply_to(&self, order: &mut WorkOrder, now: Timestamp) {
        order.status = WorkOrderStatus::Completed;
        order.actual_completion_date = Some(self.actual_completion_date);
        order.resolution_details = Some(self.resolution_details.clone());
        order.parts_replaced = self.parts_replaced.clone();
        order.additional_notes = self.additional_notes.clone();
        order.technician_signature = Some(self.technician_signature.clone());
        if self.maintenance_cost.is_some() {
            order.maintenance_cost = self.maintenance_cost;
        }
        order.updated_at = now;
    }
}
