//! Machine CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{json_column, timestamp_column, timestamp_text};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Machine, MachineOrder, MachinePatch, NewMachine},
};

const MACHINE_COLUMNS: &str =
    "id, name, location, manufacturer, specifications, maintenance_schedule, created_at, updated_at";
const INSERT_MACHINE_SQL: &str = "INSERT INTO machines (id, name, location, manufacturer, specifications, maintenance_schedule, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_MACHINE_SQL: &str = "UPDATE machines SET name = ?1, location = ?2, manufacturer = ?3, specifications = ?4, maintenance_schedule = ?5, updated_at = ?6 WHERE id = ?7";
const COUNT_MACHINES_SQL: &str = "SELECT COUNT(*) FROM machines";
const DELETE_MACHINE_SQL: &str = "DELETE FROM machines WHERE id = ?1";
const DELETE_ALL_MACHINES_SQL: &str = "DELETE FROM machines";

impl super::Database {
    fn build_machine_from_row(row: &rusqlite::Row) -> rusqlite::Result<Machine> {
        Ok(Machine {
            id: row.get(0)?,
            name: row.get(1)?,
            location: row.get(2)?,
            manufacturer: row.get(3)?,
            specifications: json_column(row, 4)?,
            maintenance_schedule: json_column(row, 5)?,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
        })
    }

    /// Inserts a batch of machines in one transaction and returns them with
    /// their generated IDs and timestamps.
    pub fn insert_machines(&mut self, machines: &[NewMachine]) -> Result<Vec<Machine>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = timestamp_text(&now);
        let mut inserted = Vec::with_capacity(machines.len());

        for machine in machines {
            let id = Uuid::new_v4().to_string();
            tx.execute(
                INSERT_MACHINE_SQL,
                params![
                    &id,
                    &machine.name,
                    &machine.location,
                    &machine.manufacturer,
                    machine.specifications.as_ref().map(|v| v.to_string()),
                    machine.maintenance_schedule.as_ref().map(|v| v.to_string()),
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert machine")?;

            inserted.push(Machine {
                id,
                name: machine.name.clone(),
                location: machine.location.clone(),
                manufacturer: machine.manufacturer.clone(),
                specifications: machine.specifications.clone(),
                maintenance_schedule: machine.maintenance_schedule.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(inserted)
    }

    /// Lists all machines in the requested order.
    pub fn list_machines(&self, order: MachineOrder) -> Result<Vec<Machine>> {
        let order_by = match order {
            MachineOrder::Name => "name COLLATE NOCASE ASC",
            MachineOrder::NewestFirst => "created_at DESC, rowid DESC",
        };
        let query = format!("SELECT {MACHINE_COLUMNS} FROM machines ORDER BY {order_by}");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let machines = stmt
            .query_map([], Self::build_machine_from_row)
            .db_context("Failed to query machines")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch machines")?;

        Ok(machines)
    }

    /// Retrieves a machine by its ID.
    pub fn get_machine(&self, id: &str) -> Result<Option<Machine>> {
        let query = format!("SELECT {MACHINE_COLUMNS} FROM machines WHERE id = ?1");
        self.connection
            .query_row(&query, params![id], Self::build_machine_from_row)
            .optional()
            .db_context("Failed to get machine")
    }

    pub fn count_machines(&self) -> Result<u64> {
        let count: i64 = self
            .connection
            .query_row(COUNT_MACHINES_SQL, [], |row| row.get(0))
            .db_context("Failed to count machines")?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Applies a partial update. Returns None if the machine doesn't exist.
    pub fn update_machine(&mut self, id: &str, patch: &MachinePatch) -> Result<Option<Machine>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let query = format!("SELECT {MACHINE_COLUMNS} FROM machines WHERE id = ?1");
        let current = tx
            .query_row(&query, params![id], Self::build_machine_from_row)
            .optional()
            .db_context("Failed to get current machine")?;

        let Some(mut machine) = current else {
            return Ok(None);
        };

        patch.apply_to(&mut machine, Timestamp::now());

        tx.execute(
            UPDATE_MACHINE_SQL,
            params![
                &machine.name,
                &machine.location,
                &machine.manufacturer,
                machine.specifications.as_ref().map(|v| v.to_string()),
                machine.maintenance_schedule.as_ref().map(|v| v.to_string()),
                timestamp_text(&machine.updated_at),
                id
            ],
        )
        .db_context("Failed to update machine")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(machine))
    }

    /// Deletes a machine and returns the removed record, or None if it
    /// didn't exist.
    ///
    /// Fails with a conflict while any work order still references it.
    pub fn delete_machine(&mut self, id: &str) -> Result<Option<Machine>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let query = format!("SELECT {MACHINE_COLUMNS} FROM machines WHERE id = ?1");
        let machine = tx
            .query_row(&query, params![id], Self::build_machine_from_row)
            .optional()
            .db_context("Failed to get machine")?;

        if machine.is_some() {
            tx.execute(DELETE_MACHINE_SQL, params![id])
                .db_context("Failed to delete machine")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(machine)
    }

    /// Deletes every machine. Fails with a conflict while work orders exist.
    pub fn delete_all_machines(&mut self) -> Result<usize> {
        self.connection
            .execute(DELETE_ALL_MACHINES_SQL, [])
            .db_context("Failed to delete machines")
    }
}
