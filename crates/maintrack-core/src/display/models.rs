//! Display implementations for domain models.
//!
//! All output is markdown so the CLI renderer can style headers and
//! emphasis. Completion details are only printed for completed orders.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    DashboardSnapshot, Machine, Notification, NotificationKind, Priority, WorkOrder,
    WorkOrderStatus,
};

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Location**: {}", self.location)?;
        writeln!(f, "- **Manufacturer**: {}", self.manufacturer)?;
        writeln!(f, "- **Registered**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for WorkOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let machine = self.machine_name.as_deref().unwrap_or("Unknown Machine");
        writeln!(
            f,
            "## {} [{}] ({})",
            machine,
            self.priority.as_str().to_uppercase(),
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.problem_description)?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        let technician = if self.assigned_technician.is_empty() {
            "Unassigned"
        } else {
            self.assigned_technician.as_str()
        };
        writeln!(f, "- Assigned To: {technician}")?;
        writeln!(f, "- Start Date: {}", LocalDateTime(&self.problem_start_date))?;
        writeln!(
            f,
            "- Expected Completion: {}",
            LocalDateTime(&self.expected_completion_date)
        )?;
        writeln!(f, "- Created By: {}", self.created_by)?;
        if let Some(cost) = self.maintenance_cost {
            writeln!(f, "- Maintenance Cost: {cost:.2}")?;
        }

        if self.status == WorkOrderStatus::Completed {
            writeln!(f)?;
            writeln!(f, "### Resolution")?;
            writeln!(f)?;
            match &self.resolution_details {
                Some(details) => writeln!(f, "{details}")?,
                None => writeln!(f, "No resolution recorded.")?,
            }
            writeln!(f)?;
            if self.parts_replaced.is_empty() {
                writeln!(f, "- Parts Replaced: None")?;
            } else {
                writeln!(f, "- Parts Replaced: {}", self.parts_replaced.join(", "))?;
            }
            match &self.actual_completion_date {
                Some(done) => writeln!(f, "- Completed: {}", LocalDateTime(done))?,
                None => writeln!(f, "- Completed: Not completed")?,
            }
            if let Some(signature) = &self.technician_signature {
                writeln!(f, "- Signed By: {signature}")?;
            }
            if let Some(notes) = &self.additional_notes {
                if !notes.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "#### Notes")?;
                    writeln!(f)?;
                    writeln!(f, "{notes}")?;
                }
            }
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.read { " " } else { "*" };
        writeln!(
            f,
            "- {marker} [{}] {} ({})",
            self.kind,
            self.message,
            LocalDateTime(&self.created_at)
        )
    }
}

impl fmt::Display for DashboardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Dashboard")?;
        writeln!(f)?;
        writeln!(f, "- **Total Machines**: {}", self.stats.total_machines)?;
        writeln!(
            f,
            "- **Active Work Orders**: {}",
            self.stats.active_work_orders
        )?;
        writeln!(
            f,
            "- **Completed Work Orders**: {}",
            self.stats.completed_work_orders
        )?;
        writeln!(f)?;

        writeln!(f, "## Monthly Work Orders")?;
        writeln!(f)?;
        writeln!(f, "| Month | Created | Completed |")?;
        writeln!(f, "|-------|---------|-----------|")?;
        for bucket in self.monthly.iter() {
            writeln!(
                f,
                "| {} | {} | {} |",
                bucket.month, bucket.created, bucket.completed
            )?;
        }
        writeln!(f)?;

        writeln!(f, "## Recent Work Orders")?;
        writeln!(f)?;
        if self.recent.is_empty() {
            writeln!(f, "No work orders found.")?;
        } else {
            for order in &self.recent {
                let machine = order.machine_name.as_deref().unwrap_or("Unknown Machine");
                writeln!(
                    f,
                    "- {}: {} ({})",
                    machine,
                    order.problem_description,
                    order.status.with_icon()
                )?;
            }
        }

        Ok(())
    }
}
