//! Parameter structures for tracker operations.
//!
//! These are the raw form payloads shared by every front end. They carry
//! strings exactly as a user typed them; the `into_*` conversions perform the
//! presence checks and date/time parsing and produce the typed write payloads
//! from [`crate::models`].
//!
//! ```text
//! CLI Args (clap) ──▶ Params (this module) ──▶ models::New*/Completion ──▶ RecordStore
//! ```
//!
//! Presence checks only reject empty strings. Whitespace-only values are
//! accepted, as are expected-completion times that precede the problem start.

use jiff::{civil::DateTime, tz::TimeZone, Timestamp, Zoned};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, TrackerError},
    models::{Completion, MachinePatch, NewMachine, NewWorkOrder, Priority, WorkOrderPatch},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the record to operate on
    pub id: String,
}

/// Parameters for registering a machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMachine {
    pub name: String,
    pub location: String,
    pub manufacturer: String,
}

impl TryFrom<&CreateMachine> for NewMachine {
    type Error = TrackerError;

    fn try_from(params: &CreateMachine) -> Result<Self> {
        require("name", &params.name)?;
        require("location", &params.location)?;
        require("manufacturer", &params.manufacturer)?;

        Ok(NewMachine {
            name: params.name.clone(),
            location: params.location.clone(),
            manufacturer: params.manufacturer.clone(),
            specifications: None,
            maintenance_schedule: None,
        })
    }
}

/// Parameters for editing a machine's descriptive fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMachine {
    pub name: Option<String>,
    pub location: Option<String>,
    pub manufacturer: Option<String>,
    /// Specification blob as JSON text
    pub specifications: Option<String>,
    /// Maintenance schedule blob as JSON text
    pub maintenance_schedule: Option<String>,
}

impl TryFrom<&UpdateMachine> for MachinePatch {
    type Error = TrackerError;

    fn try_from(params: &UpdateMachine) -> Result<Self> {
        let specifications = params
            .specifications
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let maintenance_schedule = params
            .maintenance_schedule
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(MachinePatch {
            name: params.name.clone(),
            location: params.location.clone(),
            manufacturer: params.manufacturer.clone(),
            specifications,
            maintenance_schedule,
        })
    }
}

/// Parameters for raising a new work order.
///
/// Dates are `YYYY-MM-DD` and times `HH:MM`, supplied separately as they
/// are entered on the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWorkOrder {
    pub machine_id: String,
    pub problem_description: String,
    #[serde(default)]
    pub priority: Priority,
    pub assigned_technician: String,
    pub problem_start_date: String,
    pub problem_start_time: String,
    pub expected_completion_date: String,
    pub expected_completion_time: String,
    pub created_by: String,
}

impl CreateWorkOrder {
    /// Validate presence, parse timestamps in `tz` and build the insert
    /// payload.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Validation` for a missing field or an
    /// unparsable date/time combination.
    pub fn into_new_work_order(&self, tz: &TimeZone) -> Result<NewWorkOrder> {
        require("machine_id", &self.machine_id)?;
        require("problem_description", &self.problem_description)?;
        require("assigned_technician", &self.assigned_technician)?;
        require("created_by", &self.created_by)?;

        let problem_start_date = combine_date_time(
            "problem_start",
            &self.problem_start_date,
            &self.problem_start_time,
            tz,
        )?;
        let expected_completion_date = combine_date_time(
            "expected_completion",
            &self.expected_completion_date,
            &self.expected_completion_time,
            tz,
        )?;

        if expected_completion_date < problem_start_date {
            log::warn!(
                "Expected completion {expected_completion_date} precedes problem start {problem_start_date}"
            );
        }

        Ok(NewWorkOrder {
            machine_id: self.machine_id.clone(),
            problem_description: self.problem_description.clone(),
            priority: self.priority,
            assigned_technician: self.assigned_technician.clone(),
            problem_start_date,
            expected_completion_date,
            created_by: self.created_by.clone(),
        })
    }
}

/// Parameters for editing an open work order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkOrder {
    pub problem_description: Option<String>,
    pub priority: Option<Priority>,
    pub assigned_technician: Option<String>,
    pub expected_completion_date: Option<String>,
    pub expected_completion_time: Option<String>,
    pub maintenance_cost: Option<f64>,
}

impl UpdateWorkOrder {
    /// Build the partial update, parsing the expected completion if both its
    /// parts are given.
    pub fn into_patch(&self, tz: &TimeZone) -> Result<WorkOrderPatch> {
        let expected_completion_date = match (
            self.expected_completion_date.as_deref(),
            self.expected_completion_time.as_deref(),
        ) {
            (Some(date), Some(time)) => Some(combine_date_time(
                "expected_completion",
                date,
                time,
                tz,
            )?),
            (None, None) => None,
            _ => {
                return Err(TrackerError::validation("expected_completion")
                    .with_reason("both a date and a time are required"))
            }
        };

        Ok(WorkOrderPatch {
            problem_description: self.problem_description.clone(),
            priority: self.priority,
            assigned_technician: self.assigned_technician.clone(),
            expected_completion_date,
            maintenance_cost: self.maintenance_cost,
        })
    }
}

/// Parameters collected by the close-work-order form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CloseWorkOrder {
    pub actual_completion_date: String,
    pub actual_completion_time: String,
    pub resolution_details: String,
    /// Comma-separated list of replaced parts
    #[serde(default)]
    pub parts_replaced: String,
    #[serde(default)]
    pub additional_notes: String,
    pub technician_signature: String,
    #[serde(default)]
    pub maintenance_cost: Option<f64>,
}

impl CloseWorkOrder {
    /// A close form with the completion date and time set to `now`.
    ///
    /// ```rust
    /// use jiff::Zoned;
    /// use maintrack_core::params::CloseWorkOrder;
    ///
    /// let now: Zoned = "2024-02-25T14:05:31[UTC]".parse().unwrap();
    /// let form = CloseWorkOrder::prefilled(&now);
    /// assert_eq!(form.actual_completion_date, "2024-02-25");
    /// assert_eq!(form.actual_completion_time, "14:05");
    /// assert!(form.resolution_details.is_empty());
    /// ```
    pub fn prefilled(now: &Zoned) -> Self {
        Self {
            actual_completion_date: now.strftime("%Y-%m-%d").to_string(),
            actual_completion_time: now.strftime("%H:%M").to_string(),
            ..Default::default()
        }
    }

    /// Validate presence, parse the completion timestamp in `tz` and split
    /// the parts list.
    pub fn into_completion(&self, tz: &TimeZone) -> Result<Completion> {
        require("resolution_details", &self.resolution_details)?;
        require("technician_signature", &self.technician_signature)?;
        let actual_completion_date = combine_date_time(
            "actual_completion",
            &self.actual_completion_date,
            &self.actual_completion_time,
            tz,
        )?;

        let additional_notes =
            (!self.additional_notes.is_empty()).then(|| self.additional_notes.clone());

        Ok(Completion {
            actual_completion_date,
            resolution_details: self.resolution_details.clone(),
            parts_replaced: split_parts(&self.parts_replaced),
            additional_notes,
            technician_signature: self.technician_signature.clone(),
            maintenance_cost: self.maintenance_cost,
        })
    }
}

/// Split a comma-separated parts list, trimming each entry and skipping
/// blanks.
pub fn split_parts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Combine a `YYYY-MM-DD` date and an `HH:MM` time into an instant in `tz`.
///
/// # Errors
///
/// Returns `TrackerError::Validation` naming `field` when either part is
/// missing or the combination does not parse.
pub fn combine_date_time(field: &str, date: &str, time: &str, tz: &TimeZone) -> Result<Timestamp> {
    if date.is_empty() || time.is_empty() {
        return Err(TrackerError::validation(field).with_reason("both a date and a time are required"));
    }

    let civil: DateTime = format!("{date}T{time}").parse().map_err(|e| {
        TrackerError::validation(field).with_reason(format!("cannot parse '{date} {time}': {e}"))
    })?;

    civil
        .to_zoned(tz.clone())
        .map(|zoned| zoned.timestamp())
        .map_err(|e| TrackerError::validation(field).with_reason(e.to_string()))
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(TrackerError::validation(field).with_reason("this field is required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateWorkOrder {
        CreateWorkOrder {
            machine_id: "m-1".to_string(),
            problem_description: "Hydraulic leak".to_string(),
            priority: Priority::High,
            assigned_technician: "Dana".to_string(),
            problem_start_date: "2024-02-20".to_string(),
            problem_start_time: "08:15".to_string(),
            expected_completion_date: "2024-02-22".to_string(),
            expected_completion_time: "17:00".to_string(),
            created_by: "Sam".to_string(),
        }
    }

    #[test]
    fn test_combine_date_time_in_zone() {
        let tz = TimeZone::fixed(jiff::tz::offset(1));
        let ts = combine_date_time("start", "2024-02-20", "08:15", &tz).expect("parse");
        assert_eq!(ts.to_string(), "2024-02-20T07:15:00Z");
    }

    #[test]
    fn test_combine_date_time_rejects_malformed() {
        let err = combine_date_time("start", "2024-13-40", "25:99", &TimeZone::UTC).unwrap_err();
        assert!(err.is_validation());

        let err = combine_date_time("start", "2024-02-20", "", &TimeZone::UTC).unwrap_err();
        assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "start"));
    }

    #[test]
    fn test_create_work_order_presence_checks() {
        let mut params = valid_create();
        params.problem_description.clear();
        let err = params.into_new_work_order(&TimeZone::UTC).unwrap_err();
        assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "problem_description"));

        // Whitespace passes the presence check
        let mut params = valid_create();
        params.assigned_technician = "  ".to_string();
        assert!(params.into_new_work_order(&TimeZone::UTC).is_ok());
    }

    #[test]
    fn test_create_work_order_accepts_inverted_dates() {
        let mut params = valid_create();
        params.expected_completion_date = "2024-02-01".to_string();
        let order = params.into_new_work_order(&TimeZone::UTC).expect("accepted");
        assert!(order.expected_completion_date < order.problem_start_date);
    }

    #[test]
    fn test_close_work_order_splits_parts() {
        let form = CloseWorkOrder {
            actual_completion_date: "2024-02-25".to_string(),
            actual_completion_time: "10:00".to_string(),
            resolution_details: "Replaced seals".to_string(),
            parts_replaced: " seal kit , , hose ".to_string(),
            additional_notes: String::new(),
            technician_signature: "Dana".to_string(),
            maintenance_cost: Some(120.5),
        };
        let completion = form.into_completion(&TimeZone::UTC).expect("valid");

        assert_eq!(completion.parts_replaced, vec!["seal kit", "hose"]);
        assert_eq!(completion.additional_notes, None);
        assert_eq!(completion.maintenance_cost, Some(120.5));
    }

    #[test]
    fn test_close_work_order_requires_signature() {
        let form = CloseWorkOrder {
            resolution_details: "Done".to_string(),
            ..CloseWorkOrder::prefilled(&"2024-02-25T10:00:00[UTC]".parse().unwrap())
        };
        let err = form.into_completion(&TimeZone::UTC).unwrap_err();
        assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "technician_signature"));
    }

    #[test]
    fn test_update_machine_parses_json_blobs() {
        let params = UpdateMachine {
            specifications: Some(r#"{"power_kw": 7.5}"#.to_string()),
            ..Default::default()
        };
        let patch = MachinePatch::try_from(&params).expect("valid json");
        assert_eq!(patch.specifications, Some(serde_json::json!({"power_kw": 7.5})));

        let params = UpdateMachine {
            maintenance_schedule: Some("not json".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            MachinePatch::try_from(&params),
            Err(TrackerError::Serialization { .. })
        ));
    }
}
