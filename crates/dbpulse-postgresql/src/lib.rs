//! PostgreSQL driver for the dbpulse working table.
//!
//! The wire protocol is driven by a background task that lives until the
//! client half is dropped.

mod error;

pub use error::PostgresDriverError;

use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::error;

/// Working table DDL. `IF NOT EXISTS` keeps re-initialization idempotent.
pub const CREATE_TABLE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS test (id SERIAL PRIMARY KEY, data TEXT)";

/// Parameterized insert for one payload row.
pub const INSERT_SQL: &str = "INSERT INTO test (data) VALUES ($1)";

/// Full-table read in randomized order.
pub const READ_SQL: &str = "SELECT * FROM test ORDER BY RANDOM()";

/// Teardown. `IF EXISTS` keeps cleanup idempotent.
pub const DROP_TABLE_SQL: &str = "DROP TABLE IF EXISTS test";

/// A PostgreSQL connection scoped to one benchmark cycle.
pub struct PostgresDriver {
    client: Client,
    connection: JoinHandle<()>,
}

impl PostgresDriver {
    /// Connect using a key/value parameter string and verify the session
    /// with a trivial query.
    pub async fn connect(params: &str) -> Result<Self, PostgresDriverError> {
        let (client, connection) = tokio_postgres::connect(params, NoTls).await?;

        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("PostgreSQL connection error: {e}");
            }
        });

        client.simple_query("SELECT 1").await?;

        Ok(Self { client, connection })
    }

    /// Create the working table if it does not exist yet.
    pub async fn create_table(&self) -> Result<(), PostgresDriverError> {
        self.client.batch_execute(CREATE_TABLE_SQL).await?;
        Ok(())
    }

    /// Insert one payload row.
    pub async fn insert(&self, data: &str) -> Result<(), PostgresDriverError> {
        self.client.execute(INSERT_SQL, &[&data]).await?;
        Ok(())
    }

    /// Run the randomized-order select, drain it, and return the row count.
    pub async fn read_all(&self) -> Result<u64, PostgresDriverError> {
        let rows = self.client.query(READ_SQL, &[]).await?;
        Ok(rows.len() as u64)
    }

    /// Drop the working table if it exists.
    pub async fn drop_table(&self) -> Result<(), PostgresDriverError> {
        self.client.batch_execute(DROP_TABLE_SQL).await?;
        Ok(())
    }

    /// Drop the client half and wait for the connection task to wind down.
    pub async fn close(self) {
        drop(self.client);
        let _ = self.connection.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_uses_dollar_placeholder_and_random_ordering() {
        assert!(INSERT_SQL.contains("$1"));
        assert!(READ_SQL.contains("ORDER BY RANDOM()"));
        assert!(CREATE_TABLE_SQL.contains("SERIAL"));
        assert!(DROP_TABLE_SQL.contains("IF EXISTS"));
    }
}
