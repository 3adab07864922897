//! Tests for telemetry emission from the gateway.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use tailfin::{
    FlightProvider, FlightQuery, RawFlight, RawQuery, Result, Tailfin, TailfinError, telemetry,
};

// ============================================================================
// Mock providers
// ============================================================================

struct StaticProvider;

#[async_trait]
impl FlightProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, _query: &FlightQuery) -> Result<Vec<RawFlight>> {
        Ok(vec![RawFlight {
            flight_iata: Some("AA100".into()),
            ..RawFlight::default()
        }])
    }
}

struct FailingProvider;

#[async_trait]
impl FlightProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(&self, _query: &FlightQuery) -> Result<Vec<RawFlight>> {
        Err(TailfinError::Upstream {
            status: 500,
            message: "boom".into(),
        })
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn lookup_records_request_and_cache_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let gateway = Tailfin::builder()
                    .provider(Arc::new(StaticProvider))
                    .build()
                    .unwrap();
                gateway.lookup(RawQuery::flight("AA100")).await.unwrap();
                gateway.lookup(RawQuery::flight("AA100")).await.unwrap();
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(counter_total(&snapshot, telemetry::LOOKUPS_TOTAL), 2);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::UPSTREAM_CALLS_TOTAL), 1);
    assert!(
        has_histogram(&snapshot, telemetry::LOOKUP_DURATION_SECONDS),
        "expected a duration histogram entry"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_upstream_records_error_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let gateway = Tailfin::builder()
                    .provider(Arc::new(FailingProvider))
                    .build()
                    .unwrap();
                let _ = gateway.lookup(RawQuery::flight("AA100")).await;
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();

    assert_eq!(counter_total(&snapshot, telemetry::LOOKUPS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::UPSTREAM_CALLS_TOTAL), 1);
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let gateway = Tailfin::builder()
        .provider(Arc::new(StaticProvider))
        .build()
        .unwrap();
    let _ = gateway.lookup(RawQuery::flight("AA100")).await.unwrap();
}
