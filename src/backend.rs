//! Backend identity and connected-client dispatch.

use dbpulse_mysql::MySqlDriver;
use dbpulse_postgresql::PostgresDriver;
use dbpulse_sqlite::SqliteDriver;

use crate::config::BenchConfig;
use crate::error::BenchError;

/// The database engines exercised by the benchmark loop.
///
/// This is a closed set: adding an engine means adding a variant and
/// satisfying every `match` below at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Sqlite3,
    MySql,
    Postgres,
}

impl Backend {
    /// All backends, in the order a round visits them.
    pub const ALL: [Backend; 3] = [Backend::Sqlite3, Backend::MySql, Backend::Postgres];

    /// Label used for the `db_type` metrics dimension.
    pub fn label(&self) -> &'static str {
        match self {
            Backend::Sqlite3 => "sqlite3",
            Backend::MySql => "mysql",
            Backend::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A connected client for one backend, owned by a single cycle.
pub enum DbClient {
    Sqlite3(SqliteDriver),
    MySql(MySqlDriver),
    Postgres(PostgresDriver),
}

impl DbClient {
    /// Open a connection to the given backend.
    pub async fn connect(backend: Backend, config: &BenchConfig) -> Result<Self, BenchError> {
        Ok(match backend {
            Backend::Sqlite3 => DbClient::Sqlite3(SqliteDriver::connect(&config.sqlite_path)?),
            Backend::MySql => DbClient::MySql(MySqlDriver::connect(&config.mysql_url).await?),
            Backend::Postgres => {
                DbClient::Postgres(PostgresDriver::connect(&config.postgres_params).await?)
            }
        })
    }

    /// Create the working table if it does not exist yet.
    pub async fn create_table(&self) -> Result<(), BenchError> {
        match self {
            DbClient::Sqlite3(driver) => driver.create_table()?,
            DbClient::MySql(driver) => driver.create_table().await?,
            DbClient::Postgres(driver) => driver.create_table().await?,
        }
        Ok(())
    }

    /// Insert one row with the given payload.
    pub async fn insert(&self, data: &str) -> Result<(), BenchError> {
        match self {
            DbClient::Sqlite3(driver) => driver.insert(data)?,
            DbClient::MySql(driver) => driver.insert(data).await?,
            DbClient::Postgres(driver) => driver.insert(data).await?,
        }
        Ok(())
    }

    /// Run the randomized-order select, drain the result set, and return the
    /// row count.
    pub async fn read_all(&self) -> Result<u64, BenchError> {
        Ok(match self {
            DbClient::Sqlite3(driver) => driver.read_all()?,
            DbClient::MySql(driver) => driver.read_all().await?,
            DbClient::Postgres(driver) => driver.read_all().await?,
        })
    }

    /// Drop the working table if it exists.
    pub async fn drop_table(&self) -> Result<(), BenchError> {
        match self {
            DbClient::Sqlite3(driver) => driver.drop_table()?,
            DbClient::MySql(driver) => driver.drop_table().await?,
            DbClient::Postgres(driver) => driver.drop_table().await?,
        }
        Ok(())
    }

    /// Release the connection. Close errors are logged by the drivers, not
    /// surfaced, so teardown never masks a cycle result.
    pub async fn close(self) {
        match self {
            DbClient::Sqlite3(driver) => driver.close(),
            DbClient::MySql(driver) => driver.close().await,
            DbClient::Postgres(driver) => driver.close().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_metrics_dimensions() {
        assert_eq!(Backend::Sqlite3.label(), "sqlite3");
        assert_eq!(Backend::MySql.label(), "mysql");
        assert_eq!(Backend::Postgres.label(), "postgres");
    }

    #[test]
    fn round_order_is_sqlite_mysql_postgres() {
        assert_eq!(
            Backend::ALL,
            [Backend::Sqlite3, Backend::MySql, Backend::Postgres]
        );
    }
}
