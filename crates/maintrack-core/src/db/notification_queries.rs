//! Notification feed queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use super::{enum_column, timestamp_column, timestamp_text};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{NewNotification, Notification},
};

const NOTIFICATION_COLUMNS: &str = "id, type, message, work_order_id, created_at, read";
const INSERT_NOTIFICATION_SQL: &str = "INSERT INTO notifications (id, type, message, work_order_id, created_at, read) VALUES (?1, ?2, ?3, ?4, ?5, 0)";
const MARK_READ_SQL: &str = "UPDATE notifications SET read = 1 WHERE id = ?1";

impl super::Database {
    fn build_notification_from_row(row: &rusqlite::Row) -> rusqlite::Result<Notification> {
        Ok(Notification {
            id: row.get(0)?,
            kind: enum_column(row, 1)?,
            message: row.get(2)?,
            work_order_id: row.get(3)?,
            created_at: timestamp_column(row, 4)?,
            read: row.get(5)?,
        })
    }

    /// Lists notifications, newest first.
    pub fn list_notifications(&self) -> Result<Vec<Notification>> {
        let query = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications ORDER BY created_at DESC, rowid DESC"
        );
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let notifications = stmt
            .query_map([], Self::build_notification_from_row)
            .db_context("Failed to query notifications")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch notifications")?;

        Ok(notifications)
    }

    /// Adds an unread notification about an existing work order.
    pub fn insert_notification(&mut self, notification: &NewNotification) -> Result<Notification> {
        let id = Uuid::new_v4().to_string();
        let now = Timestamp::now();

        self.connection
            .execute(
                INSERT_NOTIFICATION_SQL,
                params![
                    &id,
                    notification.kind.as_str(),
                    &notification.message,
                    &notification.work_order_id,
                    timestamp_text(&now)
                ],
            )
            .db_context("Failed to insert notification")?;

        Ok(Notification {
            id,
            kind: notification.kind,
            message: notification.message.clone(),
            work_order_id: notification.work_order_id.clone(),
            created_at: now,
            read: false,
        })
    }

    /// Marks a notification read. Returns None if it doesn't exist.
    pub fn mark_notification_read(&mut self, id: &str) -> Result<Option<Notification>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(MARK_READ_SQL, params![id])
            .db_context("Failed to mark notification read")?;

        let query = format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?1");
        let notification = tx
            .query_row(&query, params![id], Self::build_notification_from_row)
            .optional()
            .db_context("Failed to get notification")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(notification)
    }
}
