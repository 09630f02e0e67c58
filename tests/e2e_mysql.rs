//! End-to-end cycle test against a locally provisioned MySQL server.
//!
//! Requires a reachable MySQL instance (see `BenchConfig` defaults); run
//! with `cargo test -- --ignored` once one is up.

use dbpulse::cycle::run_cycle;
use dbpulse::metrics::DURATION_BUCKETS;
use dbpulse::{Backend, BenchConfig, BenchMetrics};
use metrics_exporter_prometheus::PrometheusBuilder;

#[tokio::test]
#[ignore = "requires a local MySQL server"]
async fn full_cycle_against_local_mysql() {
    let mut config = BenchConfig::default();
    if let Ok(url) = std::env::var("DBPULSE_MYSQL_URL") {
        config.mysql_url = url;
    }

    let recorder = PrometheusBuilder::new()
        .set_buckets(DURATION_BUCKETS)
        .expect("buckets")
        .build_recorder();
    let metrics = metrics::with_local_recorder(&recorder, BenchMetrics::new);

    let report = run_cycle(Backend::MySql, &config, &metrics, 3)
        .await
        .expect("cycle");
    assert!(report.total() >= report.insert_duration);

    let rendered = recorder.handle().render();
    assert!(rendered
        .lines()
        .any(|l| l.starts_with("db_ops_processed_total{")
            && l.contains("db_type=\"mysql\"")
            && l.contains("query_type=\"insert\"")
            && l.ends_with(" 3")));
}
