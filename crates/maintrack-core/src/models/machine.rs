//! Machine model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A piece of equipment that work orders are raised against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Machine {
    /// Opaque unique identifier assigned by the store
    pub id: String,

    /// Display name of the machine
    pub name: String,

    /// Where the machine is installed
    pub location: String,

    /// Who built it
    pub manufacturer: String,

    /// Free-form technical specification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Value>,

    /// Free-form maintenance schedule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_schedule: Option<Value>,

    /// Timestamp when the machine was registered (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the machine was last modified (UTC)
    pub updated_at: Timestamp,
}

/// Field values for a machine about to be inserted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewMachine {
    pub name: String,
    pub location: String,
    pub manufacturer: String,
    #[serde(default)]
    pub specifications: Option<Value>,
    #[serde(default)]
    pub maintenance_schedule: Option<Value>,
}

/// Partial update of a machine's descriptive fields.
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MachinePatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub manufacturer: Option<String>,
    pub specifications: Option<Value>,
    pub maintenance_schedule: Option<Value>,
}

impl MachinePatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.manufacturer.is_none()
            && self.specifications.is_none()
            && self.maintenance_schedule.is_none()
    }

    /// Apply the patch to an in-memory machine.
    pub fn apply_to(&self, machine: &mut Machine, now: Timestamp) {
        if let Some(name) = &self.name {
            machine.name = name.clone();
        }
        if let Some(location) = &self.location {
            machine.location = location.clone();
        }
        if let Some(manufacturer) = &self.manufacturer {
            machine.manufacturer = manufacturer.clone();
        }
        if let Some(specifications) = &self.specifications {
            machine.specifications = Some(specifications.clone());
        }
        if let Some(schedule) = &self.maintenance_schedule {
            machine.maintenance_schedule = Some(schedule.clone());
        }
        machine.updated_at = now;
    }
}

/// Sort order for machine listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MachineOrder {
    /// Alphabetical by name, used for selection lists
    #[default]
    Name,
    /// Newest registrations first, used by the machine catalog
    NewestFirst,
}
