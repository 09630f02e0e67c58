//! Error type for the PostgreSQL driver.

use thiserror::Error;

/// Errors that can occur while driving the PostgreSQL working table.
#[derive(Error, Debug)]
pub enum PostgresDriverError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}
