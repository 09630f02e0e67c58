//! Error types for the benchmark loop.

use thiserror::Error;

/// Errors that can abort a benchmark cycle or the process setup.
#[derive(Error, Debug)]
pub enum BenchError {
    /// The OS entropy source failed while generating a payload.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// SQLite error.
    #[error(transparent)]
    Sqlite(#[from] dbpulse_sqlite::SqliteDriverError),

    /// MySQL error.
    #[error(transparent)]
    MySql(#[from] dbpulse_mysql::MySqlDriverError),

    /// PostgreSQL error.
    #[error(transparent)]
    Postgres(#[from] dbpulse_postgresql::PostgresDriverError),

    /// Metrics recorder or exporter setup failure.
    #[error("metrics exporter error: {0}")]
    Exporter(String),
}
