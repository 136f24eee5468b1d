//! Status messages for operation feedback.

use std::fmt;

use crate::controller::{Toast, ToastLevel};

/// Wrapper type for displaying a one-line success or failure message.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl From<&Toast> for OperationStatus {
    fn from(toast: &Toast) -> Self {
        match toast.level {
            ToastLevel::Success => Self::success(toast.message.clone()),
            ToastLevel::Failure => Self::failure(toast.message.clone()),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "Success:" } else { "Error:" }, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Machine added successfully".to_string());
        assert_eq!(format!("{success}"), "Success: Machine added successfully\n");

        let failure = OperationStatus::failure("Failed to add machine".to_string());
        assert!(format!("{failure}").contains("Error:"));
    }

    #[test]
    fn test_operation_status_from_toast() {
        let toast = Toast::failure("Failed to close work order");
        let status = OperationStatus::from(&toast);
        assert!(!status.success);
        assert_eq!(status.message, "Failed to close work order");
    }
}
