//! Integration tests for the build lifecycle: validate, start, poll, hand off.

use super::test_utils::{Script, ScriptedRuntime};
use cosmos_testcontainer::container::ContainerBuilder;
use cosmos_testcontainer::cosmos::{ARGS_ENV, DATABASE_ENV, PARTITION_COUNT_ENV};
use cosmos_testcontainer::runtime::ContainerRuntime;
use cosmos_testcontainer::wait::{MarkerMatch, WaitStrategy};
use cosmos_testcontainer::{BuildError, CosmosDbBuilder};
use std::sync::Arc;
use std::time::Duration;

fn fast_wait() -> WaitStrategy {
    WaitStrategy::default()
        .with_timeout(Duration::from_secs(10))
        .with_poll_interval(Duration::from_millis(100))
}

#[tokio::test(start_paused = true)]
async fn test_build_returns_handle_after_marker() {
    let runtime = Arc::new(ScriptedRuntime::ready_after(3));
    let container = CosmosDbBuilder::new()
        .with_database("orders")
        .with_port(9081)
        .with_partition_count(4)
        .with_wait_strategy(fast_wait())
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap();

    assert_eq!(runtime.snapshots(), 3);
    let started = runtime.started();
    assert_eq!(started.len(), 1);
    let spec = &started[0];
    assert_eq!(spec.env(DATABASE_ENV), Some("orders"));
    assert_eq!(spec.env(PARTITION_COUNT_ENV), Some("4"));
    assert_eq!(spec.env(ARGS_ENV), Some("/Port=9081"));
    assert_eq!(spec.host_port(9081), Some(9081));
    assert_eq!(spec.port_bindings.len(), 1);

    assert_eq!(container.launch_spec(), spec);
    assert_eq!(container.port(), 9081);
    assert!(container.connection_string().contains("https://localhost:9081;"));
    assert!(runtime.stopped().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_empty_database_fails_without_starting() {
    let runtime = Arc::new(ScriptedRuntime::ready_after(1));
    let err = CosmosDbBuilder::new()
        .with_database("")
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BuildError::MissingRequiredField { field: "database" }
    ));
    assert!(runtime.started().is_empty());
    assert_eq!(runtime.snapshots(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_empty_account_key_fails_without_starting() {
    let runtime = Arc::new(ScriptedRuntime::ready_after(1));
    let err = CosmosDbBuilder::with_account_key("")
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BuildError::MissingRequiredField { field: "credential" }
    ));
    assert!(runtime.started().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_marker_with_surrounding_text_times_out_and_stops() {
    let runtime = Arc::new(ScriptedRuntime::new(Script::Prints(
        "Starting emulator\nStarted\n".to_string(),
    )));
    let err = CosmosDbBuilder::new()
        .with_wait_strategy(fast_wait())
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap_err();

    match err {
        BuildError::ReadinessTimeout { container, timeout } => {
            assert_eq!(timeout, Duration::from_secs(10));
            assert_eq!(runtime.stopped(), vec![container]);
        }
        other => panic!("expected readiness timeout, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_contains_match_accepts_real_log_output() {
    let runtime = Arc::new(ScriptedRuntime::new(Script::Prints(
        "Starting emulator\nStarted\n".to_string(),
    )));
    let container = CosmosDbBuilder::new()
        .with_wait_strategy(fast_wait().with_marker_match(MarkerMatch::Contains))
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap();

    assert_eq!(container.id().as_str(), "scripted-1");
}

#[tokio::test(start_paused = true)]
async fn test_start_failure_is_propagated() {
    let runtime = Arc::new(ScriptedRuntime::new(Script::FailsToStart));
    let err = CosmosDbBuilder::new()
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::ProcessStartFailure(_)));
    assert_eq!(runtime.snapshots(), 0);
    assert!(runtime.stopped().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_log_failure_aborts_and_stops() {
    let runtime = Arc::new(ScriptedRuntime::new(Script::LogsUnavailable));
    let err = CosmosDbBuilder::new()
        .with_wait_strategy(fast_wait())
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::Runtime(_)));
    assert_eq!(runtime.snapshots(), 1);
    assert_eq!(runtime.stopped().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stop_delegates_to_runtime() {
    let runtime = Arc::new(ScriptedRuntime::ready_after(1));
    let container = CosmosDbBuilder::new()
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap();
    let id = container.id().clone();

    container.stop().await.unwrap();
    assert_eq!(runtime.stopped(), vec![id]);
}

#[tokio::test(start_paused = true)]
async fn test_independent_builds_do_not_share_state() {
    let runtime = Arc::new(ScriptedRuntime::ready_after(1));
    let base = CosmosDbBuilder::new();

    let first = base
        .with_database("first")
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap();
    let second = base
        .with_database("second")
        .build(runtime.clone() as Arc<dyn ContainerRuntime>)
        .await
        .unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(first.configuration().database(), Some("first"));
    assert_eq!(second.configuration().database(), Some("second"));
}
