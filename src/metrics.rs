//! Prometheus metrics for the benchmark loop.
//!
//! The registry is an explicit value rather than ambient global state: a
//! [`BenchMetrics`] binds its counter and histogram handles to whichever
//! recorder is active when it is constructed, so tests can build one under
//! `metrics::with_local_recorder` and inspect an isolated snapshot while
//! `main` binds to the process-wide recorder installed by
//! [`install_exporter`].

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_histogram, histogram, Counter, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::error;

use crate::backend::Backend;
use crate::error::BenchError;

/// The `query_type` metrics dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Insert,
    Read,
}

impl QueryType {
    /// Label used for the `query_type` metrics dimension.
    pub fn label(&self) -> &'static str {
        match self {
            QueryType::Insert => "insert",
            QueryType::Read => "read",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Histogram buckets in seconds, matching the Prometheus client defaults.
pub const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Handles for one (backend, query type) series set.
pub struct OpMetrics {
    /// Wall-clock duration of a whole insert or read phase.
    pub phase_duration: Histogram,
    /// Duration of a single operation.
    pub op_duration: Histogram,
    /// Operations completed.
    pub processed: Counter,
    /// Operations failed.
    pub errors: Counter,
}

impl OpMetrics {
    fn register(backend: Backend, query: QueryType) -> Self {
        let db_type = backend.label();
        let query_type = query.label();
        Self {
            phase_duration: histogram!(
                "db_ops_duration_seconds_total",
                "db_type" => db_type,
                "query_type" => query_type
            ),
            op_duration: histogram!(
                "db_ops_duration_seconds",
                "db_type" => db_type,
                "query_type" => query_type
            ),
            processed: counter!(
                "db_ops_processed_total",
                "db_type" => db_type,
                "query_type" => query_type
            ),
            errors: counter!(
                "db_query_errors_total",
                "db_type" => db_type,
                "query_type" => query_type
            ),
        }
    }
}

/// Registry of every series the benchmark loop records, pre-registered per
/// (backend, query type) pair so all series render from the first scrape.
pub struct BenchMetrics {
    ops: [[OpMetrics; 2]; 3],
}

impl BenchMetrics {
    /// Register all series against the active recorder.
    pub fn new() -> Self {
        describe_histogram!(
            "db_ops_duration_seconds_total",
            "Histogram of the duration of database operations"
        );
        describe_histogram!(
            "db_ops_duration_seconds",
            "Histogram of the duration of single database operations"
        );
        describe_counter!(
            "db_ops_processed_total",
            "Total number of database operations"
        );
        describe_counter!(
            "db_query_errors_total",
            "Total number of database query errors"
        );

        let ops = Backend::ALL
            .map(|backend| [QueryType::Insert, QueryType::Read].map(|q| OpMetrics::register(backend, q)));
        Self { ops }
    }

    /// Series handles for one (backend, query type) pair.
    pub fn op(&self, backend: Backend, query: QueryType) -> &OpMetrics {
        let b = match backend {
            Backend::Sqlite3 => 0,
            Backend::MySql => 1,
            Backend::Postgres => 2,
        };
        let q = match query {
            QueryType::Insert => 0,
            QueryType::Read => 1,
        };
        &self.ops[b][q]
    }
}

impl Default for BenchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the process-wide recorder and start the scrape endpoint on
/// `listen` as a background task.
///
/// With `exporter_failure_fatal` the listener dying takes the whole process
/// with it, mirroring the loop's own fail-fast contract; without it the
/// benchmark keeps running without a scrape endpoint.
pub fn install_exporter(
    listen: SocketAddr,
    exporter_failure_fatal: bool,
) -> Result<(), BenchError> {
    let (recorder, exporter) = PrometheusBuilder::new()
        .with_http_listener(listen)
        .set_buckets(DURATION_BUCKETS)
        .map_err(|e| BenchError::Exporter(e.to_string()))?
        .build()
        .map_err(|e| BenchError::Exporter(e.to_string()))?;

    metrics::set_global_recorder(recorder).map_err(|e| BenchError::Exporter(e.to_string()))?;

    tokio::spawn(async move {
        if let Err(err) = exporter.await {
            if exporter_failure_fatal {
                error!("metrics exporter failed: {err:?}");
                std::process::exit(1);
            }
            error!("metrics exporter failed, continuing without a scrape endpoint: {err:?}");
        }
    });

    Ok(())
}
