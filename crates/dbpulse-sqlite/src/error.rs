//! Error type for the SQLite driver.

use thiserror::Error;

/// Errors that can occur while driving the SQLite working table.
#[derive(Error, Debug)]
pub enum SqliteDriverError {
    /// Underlying SQLite failure.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
