//! Spreadsheet export of all machines and work orders.
//!
//! Rows are flattened to strings first so the workbook itself can be built
//! and saved on the blocking pool. Both sheets are always written, with just
//! the header row when there is no data.

use std::path::{Path, PathBuf};

use jiff::{tz::TimeZone, Timestamp, Zoned};
use rust_xlsxwriter::{Format, Workbook};
use tokio::task;

use crate::{
    display::ReportDateTime,
    error::{ExportResultExt, Result, TrackerError},
    models::{Machine, MachineOrder, WorkOrder},
    store::RecordStore,
};

pub const MACHINE_HEADERS: [&str; 6] = [
    "Machine ID",
    "Name",
    "Location",
    "Manufacturer",
    "Created At",
    "Updated At",
];

pub const WORK_ORDER_HEADERS: [&str; 16] = [
    "Work Order ID",
    "Machine",
    "Problem Description",
    "Priority",
    "Status",
    "Assigned Technician",
    "Problem Start Date",
    "Expected Completion",
    "Created By",
    "Resolution Details",
    "Parts Replaced",
    "Additional Notes",
    "Completed By",
    "Actual Completion Date",
    "Created At",
    "Updated At",
];

const MISSING: &str = "N/A";
const NO_PARTS: &str = "None";

/// One worksheet's worth of flattened cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

/// File name for a report produced on `now`'s local date.
pub fn report_file_name(now: &Zoned) -> String {
    format!("maintenance_report_{}.xlsx", now.strftime("%Y-%m-%d"))
}

pub fn machine_rows(machines: &[Machine], tz: &TimeZone) -> Vec<Vec<String>> {
    machines
        .iter()
        .map(|machine| {
            vec![
                machine.id.clone(),
                machine.name.clone(),
                machine.location.clone(),
                machine.manufacturer.clone(),
                report_time(&machine.created_at, tz),
                report_time(&machine.updated_at, tz),
            ]
        })
        .collect()
}

/// Flatten work orders. Priority and status are upper-cased, missing values
/// become `N/A` and an empty parts list becomes `None`.
pub fn work_order_rows(orders: &[WorkOrder], tz: &TimeZone) -> Vec<Vec<String>> {
    orders
        .iter()
        .map(|order| {
            let parts = if order.parts_replaced.is_empty() {
                NO_PARTS.to_string()
            } else {
                order.parts_replaced.join(", ")
            };

            vec![
                order.id.clone(),
                or_missing(order.machine_name.as_deref()),
                order.problem_description.clone(),
                order.priority.as_str().to_uppercase(),
                order.status.as_str().to_uppercase(),
                order.assigned_technician.clone(),
                report_time(&order.problem_start_date, tz),
                report_time(&order.expected_completion_date, tz),
                order.created_by.clone(),
                or_missing(order.resolution_details.as_deref()),
                parts,
                or_missing(order.additional_notes.as_deref()),
                or_missing(order.technician_signature.as_deref()),
                order
                    .actual_completion_date
                    .as_ref()
                    .map_or_else(|| MISSING.to_string(), |ts| report_time(ts, tz)),
                report_time(&order.created_at, tz),
                report_time(&order.updated_at, tz),
            ]
        })
        .collect()
}

/// Fetch everything and write `maintenance_report_<date>.xlsx` into `dir`.
///
/// Machines and work orders are fetched concurrently. If either fetch fails
/// nothing is written. Times are rendered in `now`'s time zone.
///
/// # Errors
///
/// Store errors are passed through; workbook and file errors are
/// `TrackerError::Export`, and a writer that panics is `TrackerError::Task`.
pub async fn export_workbook(store: &dyn RecordStore, dir: &Path, now: &Zoned) -> Result<PathBuf> {
    let (machines, orders) = tokio::try_join!(
        store.list_machines(MachineOrder::NewestFirst),
        store.list_work_orders()
    )?;

    let tz = now.time_zone();
    let sheets = vec![
        Sheet {
            name: "Machines",
            headers: &MACHINE_HEADERS,
            rows: machine_rows(&machines, tz),
        },
        Sheet {
            name: "Work Orders",
            headers: &WORK_ORDER_HEADERS,
            rows: work_order_rows(&orders, tz),
        },
    ];
    let path = dir.join(report_file_name(now));

    log::info!(
        "Exporting {} machine(s) and {} work order(s) to {}",
        machines.len(),
        orders.len(),
        path.display()
    );

    let target = path.clone();
    task::spawn_blocking(move || write_workbook(&sheets, &target))
        .await
        .map_err(|e| TrackerError::task("Workbook writer failed", e))??;

    Ok(path)
}

/// Write `sheets` to a new workbook at `path`, headers in bold.
pub fn write_workbook(sheets: &[Sheet], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook
            .add_worksheet()
            .set_name(sheet.name)
            .export_context("Invalid worksheet name")?;

        for (col, header) in (0u16..).zip(sheet.headers) {
            worksheet
                .write_string_with_format(0, col, *header, &bold)
                .export_context("Failed to write header")?;
        }
        for (row, cells) in (1u32..).zip(&sheet.rows) {
            for (col, cell) in (0u16..).zip(cells) {
                worksheet
                    .write_string(row, col, cell)
                    .export_context("Failed to write cell")?;
            }
        }
    }

    workbook
        .save(path)
        .export_context(&format!("Failed to save {}", path.display()))
}

fn report_time(ts: &Timestamp, tz: &TimeZone) -> String {
    ReportDateTime::new(ts, tz).to_string()
}

fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}
