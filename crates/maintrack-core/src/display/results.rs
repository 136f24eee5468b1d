//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! update, close and delete operations with consistent messaging.

use std::fmt;

use crate::models::{Machine, WorkOrder};

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use maintrack_core::{display::CreateResult, models::Machine};
///
/// let machine = Machine {
///     id: "m-1".to_string(),
///     name: "Conveyor Belt A1".to_string(),
///     location: "Line 1".to_string(),
///     manufacturer: "Acme".to_string(),
///     specifications: None,
///     maintenance_schedule: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(machine).to_string();
/// assert!(output.starts_with("Added machine with ID: m-1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Machine> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added machine with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<WorkOrder> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created work order with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations.
///
/// The list of changed fields is printed before the updated resource.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: fmt::Display + HasId> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying a closed work order.
pub struct CloseResult(pub WorkOrder);

impl fmt::Display for CloseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Closed work order with ID: {}", self.0.id)?;
        writeln!(f)?;
        write!(f, "{}", self.0)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Machine> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted machine '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<WorkOrder> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted work order (ID: {})", self.resource.id)
    }
}

/// Records that have an identifier and a human name for their kind.
pub trait HasId {
    const KIND: &'static str;
    fn id(&self) -> &str;
}

impl HasId for Machine {
    const KIND: &'static str = "machine";
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for WorkOrder {
    const KIND: &'static str = "work order";
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{machine, pending_order, ts};

    #[test]
    fn test_update_result_lists_changes() {
        let order = pending_order("wo-7", &machine("m-1", "Lathe"), ts("2024-02-01T08:00:00Z"));
        let result = UpdateResult::with_changes(order, vec!["Priority set to high".to_string()]);
        let output = result.to_string();

        assert!(output.starts_with("Updated work order with ID: wo-7"));
        assert!(output.contains("Changes made:"));
        assert!(output.contains("- Priority set to high"));
    }

    #[test]
    fn test_delete_result_machine() {
        let output = DeleteResult::new(machine("m-3", "Press")).to_string();
        assert_eq!(output, "Deleted machine 'Press' (ID: m-3)\n");
    }
}
