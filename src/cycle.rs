//! The per-backend benchmark cycle: connect, create, insert, read, drop.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

use crate::backend::{Backend, DbClient};
use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::metrics::{BenchMetrics, QueryType};
use crate::payload::{random_hex, PAYLOAD_LEN};

/// Exclusive upper bound of the random per-insert delay, in microseconds.
const INSERT_JITTER_MICROS: u64 = 10;

/// Timings from one completed cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleReport {
    /// Wall-clock duration of the insert phase.
    pub insert_duration: Duration,
    /// Wall-clock duration of the read phase.
    pub read_duration: Duration,
}

impl CycleReport {
    /// Combined insert and read time.
    pub fn total(&self) -> Duration {
        self.insert_duration + self.read_duration
    }
}

/// Run one full cycle against `backend`: create the working table, time
/// `count` inserts and `count` reads, then drop the table.
///
/// The connection is released before this returns, whether or not the cycle
/// succeeded. Any failure aborts the rest of the cycle; the caller decides
/// whether it is fatal to the process.
pub async fn run_cycle(
    backend: Backend,
    config: &BenchConfig,
    metrics: &BenchMetrics,
    count: u64,
) -> Result<CycleReport, BenchError> {
    info!(%backend, "connecting");
    let client = DbClient::connect(backend, config).await?;

    let result = run_phases(&client, backend, metrics, count).await;
    client.close().await;
    result
}

async fn run_phases(
    client: &DbClient,
    backend: Backend,
    metrics: &BenchMetrics,
    count: u64,
) -> Result<CycleReport, BenchError> {
    info!(%backend, "initializing working table");
    client.create_table().await?;

    let insert_duration = insert_phase(client, backend, metrics, count).await?;
    let read_duration = read_phase(client, backend, metrics, count).await?;

    info!(%backend, "dropping working table");
    client.drop_table().await?;

    let report = CycleReport {
        insert_duration,
        read_duration,
    };
    info!(
        %backend,
        total_secs = report.total().as_secs_f64(),
        insert_secs = insert_duration.as_secs_f64(),
        read_secs = read_duration.as_secs_f64(),
        "cycle finished"
    );
    Ok(report)
}

/// Time `count` inserts of one freshly generated payload.
///
/// The payload is generated once and reused for every row of the phase. Each
/// iteration sleeps a random 0–9 µs jitter inside the per-operation timed
/// window before executing the statement. A failed insert increments the
/// error counter and aborts the phase.
pub async fn insert_phase(
    client: &DbClient,
    backend: Backend,
    metrics: &BenchMetrics,
    count: u64,
) -> Result<Duration, BenchError> {
    let payload = random_hex(PAYLOAD_LEN)?;
    let op = metrics.op(backend, QueryType::Insert);

    info!(%backend, count, "starting inserts");
    let start = Instant::now();
    for _ in 0..count {
        let op_start = Instant::now();

        let jitter = rand::rng().random_range(0..INSERT_JITTER_MICROS);
        tokio::time::sleep(Duration::from_micros(jitter)).await;

        if let Err(e) = client.insert(&payload).await {
            op.errors.increment(1);
            return Err(e);
        }
        op.op_duration.record(op_start.elapsed().as_secs_f64());
        op.processed.increment(1);
    }
    let duration = start.elapsed();
    op.phase_duration.record(duration.as_secs_f64());
    info!(
        %backend,
        secs = duration.as_secs_f64(),
        "finished inserts"
    );
    Ok(duration)
}

/// Time `count` randomized-order reads, draining each result set.
///
/// A failed read increments the error counter and aborts the phase.
pub async fn read_phase(
    client: &DbClient,
    backend: Backend,
    metrics: &BenchMetrics,
    count: u64,
) -> Result<Duration, BenchError> {
    let op = metrics.op(backend, QueryType::Read);

    info!(%backend, count, "starting reads");
    let start = Instant::now();
    for _ in 0..count {
        let op_start = Instant::now();

        if let Err(e) = client.read_all().await {
            op.errors.increment(1);
            return Err(e);
        }
        op.op_duration.record(op_start.elapsed().as_secs_f64());
        op.processed.increment(1);
    }
    let duration = start.elapsed();
    op.phase_duration.record(duration.as_secs_f64());
    info!(
        %backend,
        secs = duration.as_secs_f64(),
        "finished reads"
    );
    Ok(duration)
}
