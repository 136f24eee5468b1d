//! SQLite persistence for machines, work orders and notifications.
//!
//! [`Database`] wraps a single rusqlite connection. Query methods are split
//! by table into the submodules below and are all synchronous; the async
//! [`crate::store::SqliteStore`] opens one `Database` per call on the
//! blocking pool.

use std::{path::Path, str::FromStr};

use jiff::Timestamp;
use rusqlite::{types::Type, Connection, Row};

use crate::error::{DatabaseResultExt, Result};

pub mod machine_queries;
pub mod migrations;
pub mod notification_queries;
pub mod work_order_queries;

const DELETE_ALL_NOTIFICATIONS_SQL: &str = "DELETE FROM notifications";
const DELETE_ALL_WORK_ORDERS_SQL: &str = "DELETE FROM work_orders";
const DELETE_ALL_MACHINES_SQL: &str = "DELETE FROM machines";

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Deletes every notification, work order and machine in one transaction.
    pub fn reset_system(&mut self) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(DELETE_ALL_NOTIFICATIONS_SQL, [])
            .db_context("Failed to delete notifications")?;
        tx.execute(DELETE_ALL_WORK_ORDERS_SQL, [])
            .db_context("Failed to delete work orders")?;
        tx.execute(DELETE_ALL_MACHINES_SQL, [])
            .db_context("Failed to delete machines")?;

        tx.commit().db_context("Failed to commit transaction")
    }
}

/// Fixed-width text form of a timestamp for storage.
pub(crate) fn timestamp_text(ts: &Timestamp) -> String {
    format!("{ts:.9}")
}

fn conversion_failure(
    idx: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
}

fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_failure(idx, e))
}

fn optional_timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|text| text.parse::<Timestamp>().map_err(|e| conversion_failure(idx, e)))
        .transpose()
}

fn enum_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    row.get::<_, String>(idx)?
        .parse::<T>()
        .map_err(|e| conversion_failure(idx, e))
}

fn json_column<T>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: serde::de::DeserializeOwned,
{
    row.get::<_, Option<String>>(idx)?
        .map(|text| serde_json::from_str(&text).map_err(|e| conversion_failure(idx, e)))
        .transpose()
}
