//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items with the item's own `Display` impl and
//! prints a fixed message when the collection is empty.

use std::{fmt, ops::Index};

use crate::models::{Machine, Notification, WorkOrder};

/// Newtype wrapper for displaying a list of machines.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use maintrack_core::{display::Machines, models::Machine};
///
/// let machine = Machine {
///     id: "m-1".to_string(),
///     name: "Industrial Mixer M1".to_string(),
///     location: "Hall 2".to_string(),
///     manufacturer: "Acme".to_string(),
///     specifications: None,
///     maintenance_schedule: None,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = Machines(vec![machine]).to_string();
/// assert!(output.contains("Industrial Mixer M1"));
/// assert_eq!(Machines(vec![]).to_string(), "No machines found.\n");
/// ```
pub struct Machines(pub Vec<Machine>);

impl Machines {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Machine> {
        self.0.iter()
    }
}

impl Index<usize> for Machines {
    type Output = Machine;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for Machines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No machines found.")
        } else {
            for machine in &self.0 {
                write!(f, "{}", machine)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a list of work orders.
pub struct WorkOrders(pub Vec<WorkOrder>);

impl WorkOrders {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkOrder> {
        self.0.iter()
    }
}

impl Index<usize> for WorkOrders {
    type Output = WorkOrder;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for WorkOrders {
    type Item = WorkOrder;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for WorkOrders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No work orders found.")
        } else {
            for order in &self.0 {
                write!(f, "{}", order)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the notification feed.
pub struct Notifications(pub Vec<Notification>);

impl Notifications {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries not yet marked read.
    pub fn unread(&self) -> usize {
        self.0.iter().filter(|n| !n.read).count()
    }
}

impl fmt::Display for Notifications {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No notifications.");
        }
        writeln!(f, "# Notifications ({} unread)", self.unread())?;
        writeln!(f)?;
        for notification in &self.0 {
            write!(f, "{}", notification)?;
        }
        Ok(())
    }
}
