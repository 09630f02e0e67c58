//! MySQL driver for the dbpulse working table.
//!
//! Connections go through a [`mysql_async::Pool`]; each statement checks a
//! connection out of the pool and returns it when done.

mod error;

pub use error::MySqlDriverError;

use mysql_async::prelude::*;
use mysql_async::{Pool, Row};
use tracing::warn;

/// Working table DDL. `IF NOT EXISTS` keeps re-initialization idempotent.
pub const CREATE_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS test (id INT AUTO_INCREMENT PRIMARY KEY, data VARCHAR(255))";

/// Parameterized insert for one payload row.
pub const INSERT_SQL: &str = "INSERT INTO test (data) VALUES (?)";

/// Full-table read in randomized order.
pub const READ_SQL: &str = "SELECT * FROM test ORDER BY RAND()";

/// Teardown. `IF EXISTS` keeps cleanup idempotent.
pub const DROP_TABLE_SQL: &str = "DROP TABLE IF EXISTS test";

/// A pooled MySQL connection scoped to one benchmark cycle.
pub struct MySqlDriver {
    pool: Pool,
}

impl MySqlDriver {
    /// Create a pool from a `mysql://` URL and verify it with a ping.
    pub async fn connect(url: &str) -> Result<Self, MySqlDriverError> {
        let pool = Pool::from_url(url)?;
        let mut conn = pool.get_conn().await?;
        conn.ping().await?;
        Ok(Self { pool })
    }

    /// Create the working table if it does not exist yet.
    pub async fn create_table(&self) -> Result<(), MySqlDriverError> {
        let mut conn = self.pool.get_conn().await?;
        conn.query_drop(CREATE_TABLE_SQL).await?;
        Ok(())
    }

    /// Insert one payload row.
    pub async fn insert(&self, data: &str) -> Result<(), MySqlDriverError> {
        let mut conn = self.pool.get_conn().await?;
        conn.exec_drop(INSERT_SQL, (data,)).await?;
        Ok(())
    }

    /// Run the randomized-order select, drain it, and return the row count.
    pub async fn read_all(&self) -> Result<u64, MySqlDriverError> {
        let mut conn = self.pool.get_conn().await?;
        let rows: Vec<Row> = conn.query(READ_SQL).await?;
        Ok(rows.len() as u64)
    }

    /// Drop the working table if it exists.
    pub async fn drop_table(&self) -> Result<(), MySqlDriverError> {
        let mut conn = self.pool.get_conn().await?;
        conn.query_drop(DROP_TABLE_SQL).await?;
        Ok(())
    }

    /// Tear down the pool, waiting for checked-out connections to settle.
    pub async fn close(self) {
        if let Err(e) = self.pool.disconnect().await {
            warn!("error disconnecting MySQL pool: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_uses_question_mark_placeholder_and_rand_ordering() {
        assert!(INSERT_SQL.contains('?'));
        assert!(!INSERT_SQL.contains("$1"));
        assert!(READ_SQL.contains("ORDER BY RAND()"));
        assert!(CREATE_TABLE_SQL.contains("AUTO_INCREMENT"));
        assert!(DROP_TABLE_SQL.contains("IF EXISTS"));
    }
}
