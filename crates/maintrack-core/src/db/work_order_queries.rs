//! Work order CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{enum_column, optional_timestamp_column, timestamp_column, timestamp_text};
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Completion, NewWorkOrder, WorkOrder, WorkOrderPatch, WorkOrderStatus},
};

// Every read joins the machine name in
const SELECT_WORK_ORDERS_SQL: &str = "SELECT w.id, w.machine_id, m.name, w.problem_description, w.priority, w.assigned_technician, w.problem_start_date, w.expected_completion_date, w.status, w.actual_completion_date, w.resolution_details, w.parts_replaced, w.additional_notes, w.technician_signature, w.maintenance_cost, w.created_by, w.created_at, w.updated_at FROM work_orders w LEFT JOIN machines m ON m.id = w.machine_id";
const INSERT_WORK_ORDER_SQL: &str = "INSERT INTO work_orders (id, machine_id, problem_description, priority, assigned_technician, problem_start_date, expected_completion_date, status, created_by, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const UPDATE_WORK_ORDER_SQL: &str = "UPDATE work_orders SET problem_description = ?1, priority = ?2, assigned_technician = ?3, expected_completion_date = ?4, maintenance_cost = ?5, updated_at = ?6 WHERE id = ?7";
const CLOSE_WORK_ORDER_SQL: &str = "UPDATE work_orders SET status = ?1, actual_completion_date = ?2, resolution_details = ?3, parts_replaced = ?4, additional_notes = ?5, technician_signature = ?6, maintenance_cost = COALESCE(?7, maintenance_cost), updated_at = ?8 WHERE id = ?9 AND status = ?10";
const CHECK_WORK_ORDER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM work_orders WHERE id = ?1)";
const DELETE_WORK_ORDER_SQL: &str = "DELETE FROM work_orders WHERE id = ?1";
const DELETE_ALL_WORK_ORDERS_SQL: &str = "DELETE FROM work_orders";

impl super::Database {
    fn build_work_order_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkOrder> {
        // Stored as a JSON array; NULL is treated as no parts
        let parts_replaced = super::json_column::<Vec<String>>(row, 11)?.unwrap_or_default();

        Ok(WorkOrder {
            id: row.get(0)?,
            machine_id: row.get(1)?,
            machine_name: row.get(2)?,
            problem_description: row.get(3)?,
            priority: enum_column(row, 4)?,
            assigned_technician: row.get(5)?,
            problem_start_date: timestamp_column(row, 6)?,
            expected_completion_date: timestamp_column(row, 7)?,
            status: enum_column(row, 8)?,
            actual_completion_date: optional_timestamp_column(row, 9)?,
            resolution_details: row.get(10)?,
            parts_replaced,
            additional_notes: row.get(12)?,
            technician_signature: row.get(13)?,
            maintenance_cost: row.get(14)?,
            created_by: row.get(15)?,
            created_at: timestamp_column(row, 16)?,
            updated_at: timestamp_column(row, 17)?,
        })
    }

    fn select_work_order(conn: &rusqlite::Connection, id: &str) -> Result<Option<WorkOrder>> {
        let query = format!("{SELECT_WORK_ORDERS_SQL} WHERE w.id = ?1");
        conn.query_row(&query, params![id], Self::build_work_order_from_row)
            .optional()
            .db_context("Failed to get work order")
    }

    /// Inserts a batch of pending work orders in one transaction.
    ///
    /// Fails with a conflict if any order references an unknown machine; in
    /// that case nothing is inserted.
    pub fn insert_work_orders(&mut self, orders: &[NewWorkOrder]) -> Result<Vec<WorkOrder>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = timestamp_text(&Timestamp::now());
        let mut ids = Vec::with_capacity(orders.len());

        for order in orders {
            let id = Uuid::new_v4().to_string();
            tx.execute(
                INSERT_WORK_ORDER_SQL,
                params![
                    &id,
                    &order.machine_id,
                    &order.problem_description,
                    order.priority.as_str(),
                    &order.assigned_technician,
                    timestamp_text(&order.problem_start_date),
                    timestamp_text(&order.expected_completion_date),
                    WorkOrderStatus::Pending.as_str(),
                    &order.created_by,
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert work order")?;
            ids.push(id);
        }

        let mut inserted = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(order) = Self::select_work_order(&tx, id)? {
                inserted.push(order);
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(inserted)
    }

    /// Lists all work orders, newest first.
    pub fn list_work_orders(&self) -> Result<Vec<WorkOrder>> {
        let query = format!("{SELECT_WORK_ORDERS_SQL} ORDER BY w.created_at DESC, w.rowid DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let orders = stmt
            .query_map([], Self::build_work_order_from_row)
            .db_context("Failed to query work orders")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch work orders")?;

        Ok(orders)
    }

    /// Retrieves a single work order by its ID.
    pub fn get_work_order(&self, id: &str) -> Result<Option<WorkOrder>> {
        Self::select_work_order(&self.connection, id)
    }

    /// Applies a partial update. Returns None if the order doesn't exist.
    pub fn update_work_order(
        &mut self,
        id: &str,
        patch: &WorkOrderPatch,
    ) -> Result<Option<WorkOrder>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let Some(mut order) = Self::select_work_order(&tx, id)? else {
            return Ok(None);
        };

        patch.apply_to(&mut order, Timestamp::now());

        tx.execute(
            UPDATE_WORK_ORDER_SQL,
            params![
                &order.problem_description,
                order.priority.as_str(),
                &order.assigned_technician,
                timestamp_text(&order.expected_completion_date),
                order.maintenance_cost,
                timestamp_text(&order.updated_at),
                id
            ],
        )
        .db_context("Failed to update work order")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(order))
    }

    /// Atomically transitions a pending order to completed and writes every
    /// completion field. Returns None if the order doesn't exist.
    ///
    /// Fails with a conflict if the order is already completed.
    pub fn close_work_order(
        &mut self,
        id: &str,
        completion: &Completion,
    ) -> Result<Option<WorkOrder>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let parts = serde_json::to_string(&completion.parts_replaced)?;
        let rows_affected = tx
            .execute(
                CLOSE_WORK_ORDER_SQL,
                params![
                    WorkOrderStatus::Completed.as_str(),
                    timestamp_text(&completion.actual_completion_date),
                    &completion.resolution_details,
                    &parts,
                    &completion.additional_notes,
                    &completion.technician_signature,
                    completion.maintenance_cost,
                    timestamp_text(&Timestamp::now()),
                    id,
                    WorkOrderStatus::Pending.as_str()
                ],
            )
            .db_context("Failed to close work order")?;

        if rows_affected == 0 {
            let exists: bool = tx
                .query_row(CHECK_WORK_ORDER_EXISTS_SQL, params![id], |row| row.get(0))
                .db_context("Failed to check work order existence")?;

            if !exists {
                return Ok(None);
            }
            return Err(TrackerError::conflict(format!(
                "work order '{id}' is already completed"
            )));
        }

        let order = Self::select_work_order(&tx, id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(order)
    }

    /// Deletes a work order and returns the removed record, or None if it
    /// didn't exist. Notifications about it are removed with it.
    pub fn delete_work_order(&mut self, id: &str) -> Result<Option<WorkOrder>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let order = Self::select_work_order(&tx, id)?;
        if order.is_some() {
            tx.execute(DELETE_WORK_ORDER_SQL, params![id])
                .db_context("Failed to delete work order")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(order)
    }

    /// Deletes every work order.
    pub fn delete_all_work_orders(&mut self) -> Result<usize> {
        self.connection
            .execute(DELETE_ALL_WORK_ORDERS_SQL, [])
            .db_context("Failed to delete work orders")
    }
}
