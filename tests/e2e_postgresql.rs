//! End-to-end cycle test against a locally provisioned PostgreSQL server.
//!
//! Requires a reachable PostgreSQL instance (see `BenchConfig` defaults);
//! run with `cargo test -- --ignored` once one is up.

use dbpulse::cycle::run_cycle;
use dbpulse::metrics::DURATION_BUCKETS;
use dbpulse::{Backend, BenchConfig, BenchMetrics};
use metrics_exporter_prometheus::PrometheusBuilder;

#[tokio::test]
#[ignore = "requires a local PostgreSQL server"]
async fn full_cycle_against_local_postgresql() {
    let mut config = BenchConfig::default();
    if let Ok(params) = std::env::var("DBPULSE_POSTGRES_PARAMS") {
        config.postgres_params = params;
    }

    let recorder = PrometheusBuilder::new()
        .set_buckets(DURATION_BUCKETS)
        .expect("buckets")
        .build_recorder();
    let metrics = metrics::with_local_recorder(&recorder, BenchMetrics::new);

    let report = run_cycle(Backend::Postgres, &config, &metrics, 3)
        .await
        .expect("cycle");
    assert!(report.total() >= report.read_duration);

    let rendered = recorder.handle().render();
    assert!(rendered
        .lines()
        .any(|l| l.starts_with("db_ops_processed_total{")
            && l.contains("db_type=\"postgres\"")
            && l.contains("query_type=\"read\"")
            && l.ends_with(" 3")));
}
