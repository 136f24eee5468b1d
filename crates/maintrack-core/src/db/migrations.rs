//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Machine references and notification cascades depend on this
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Bring databases created before `maintenance_cost` existed up to date.
    fn apply_migrations(&self) -> Result<()> {
        let has_cost_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('work_orders') WHERE name = 'maintenance_cost'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect work_orders table")?;

        if !has_cost_column {
            self.connection
                .execute("ALTER TABLE work_orders ADD COLUMN maintenance_cost REAL", [])
                .db_context("Failed to add maintenance_cost column")?;
        }

        Ok(())
    }
}
