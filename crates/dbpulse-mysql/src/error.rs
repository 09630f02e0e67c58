//! Error type for the MySQL driver.

use thiserror::Error;

/// Errors that can occur while driving the MySQL working table.
#[derive(Error, Debug)]
pub enum MySqlDriverError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// Malformed connection URL.
    #[error("invalid MySQL URL: {0}")]
    Url(#[from] mysql_async::UrlError),
}
