//! SQLite driver for the dbpulse working table.
//!
//! Opens a file-backed database with the shared cache enabled so repeated
//! cycles against the same path observe the same pager state a long-lived
//! deployment would.

mod error;

pub use error::SqliteDriverError;

use rusqlite::{Connection, OpenFlags};
use tracing::warn;

/// Working table DDL. `IF NOT EXISTS` keeps re-initialization idempotent.
pub const CREATE_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS test (id INTEGER PRIMARY KEY AUTOINCREMENT, data TEXT)";

/// Parameterized insert for one payload row.
pub const INSERT_SQL: &str = "INSERT INTO test (data) VALUES (?1)";

/// Full-table read in randomized order.
pub const READ_SQL: &str = "SELECT * FROM test ORDER BY RANDOM()";

/// Teardown. `IF EXISTS` keeps cleanup idempotent.
pub const DROP_TABLE_SQL: &str = "DROP TABLE IF EXISTS test";

/// A file-backed SQLite connection scoped to one benchmark cycle.
pub struct SqliteDriver {
    conn: Connection,
}

impl SqliteDriver {
    /// Open the database at `path`, creating it if missing, with the shared
    /// cache enabled.
    pub fn connect(path: &str) -> Result<Self, SqliteDriverError> {
        let flags = OpenFlags::default() | OpenFlags::SQLITE_OPEN_SHARED_CACHE;
        let conn = Connection::open_with_flags(path, flags)?;
        Ok(Self { conn })
    }

    /// Create the working table if it does not exist yet.
    pub fn create_table(&self) -> Result<(), SqliteDriverError> {
        self.conn.execute(CREATE_TABLE_SQL, [])?;
        Ok(())
    }

    /// Insert one payload row.
    pub fn insert(&self, data: &str) -> Result<(), SqliteDriverError> {
        self.conn.execute(INSERT_SQL, [data])?;
        Ok(())
    }

    /// Run the randomized-order select, drain it, and return the row count.
    pub fn read_all(&self) -> Result<u64, SqliteDriverError> {
        let mut stmt = self.conn.prepare(READ_SQL)?;
        let mut rows = stmt.query([])?;
        let mut count = 0u64;
        while rows.next()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Drop the working table if it exists.
    pub fn drop_table(&self) -> Result<(), SqliteDriverError> {
        self.conn.execute(DROP_TABLE_SQL, [])?;
        Ok(())
    }

    /// Current row count of the working table.
    pub fn count_rows(&self) -> Result<u64, SqliteDriverError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM test", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Whether the working table currently exists.
    pub fn table_exists(&self) -> Result<bool, SqliteDriverError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'test'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Release the connection.
    pub fn close(self) {
        if let Err((_conn, e)) = self.conn.close() {
            warn!("error closing SQLite connection: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_uses_positional_placeholder_and_random_ordering() {
        assert!(INSERT_SQL.contains("?1"));
        assert!(READ_SQL.contains("ORDER BY RANDOM()"));
        assert!(CREATE_TABLE_SQL.contains("IF NOT EXISTS"));
        assert!(DROP_TABLE_SQL.contains("IF EXISTS"));
    }
}
