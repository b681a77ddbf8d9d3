mod common;

use common::{spawn_health_server, spawn_health_server_with_reflection};
use sonda_core::probe::ProbeSpec;
use sonda_core::probe::discovery::REFLECTION_UNSUPPORTED;
use sonda_core::report::{FailureKind, ProbeResult};
use sonda_core::runner::ProbeRunner;
use std::time::Duration;

#[tokio::test]
async fn lists_services_when_reflection_is_enabled() {
    let addr = spawn_health_server_with_reflection().await;
    let runner = ProbeRunner::new(&addr.to_string()).unwrap();

    let report = runner
        .run(vec![ProbeSpec::discovery(Duration::from_secs(5))])
        .await;

    let entry = &report.entries()[0];
    assert_eq!(entry.name, "discovery");
    match &entry.result {
        ProbeResult::Success { detail } => {
            assert!(
                detail.contains("grpc.health.v1.Health"),
                "unexpected detail: {detail}"
            );
            assert!(
                detail.contains("grpc.reflection.v1.ServerReflection"),
                "unexpected detail: {detail}"
            );
        }
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_reflection_service_reports_skipped() {
    let addr = spawn_health_server().await;
    let runner = ProbeRunner::new(&addr.to_string()).unwrap();

    let report = runner
        .run(vec![ProbeSpec::discovery(Duration::from_secs(5))])
        .await;

    assert_eq!(
        report.entries()[0].result,
        ProbeResult::Skipped {
            reason: REFLECTION_UNSUPPORTED.to_string()
        }
    );
    assert!(!report.has_failures());
}

#[tokio::test(start_paused = true)]
async fn silent_listener_times_out_instead_of_skipping() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let runner = ProbeRunner::new(&addr.to_string()).unwrap();
    let report = runner
        .run(vec![ProbeSpec::discovery(Duration::from_millis(250))])
        .await;

    assert_eq!(
        report.entries()[0].result,
        ProbeResult::Failure {
            kind: FailureKind::Timeout,
            detail: "discovery timed out after 250ms".to_string(),
        }
    );
}

#[tokio::test]
async fn unreachable_target_yields_unreachable_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let runner = ProbeRunner::new(&addr.to_string()).unwrap();
    let report = runner
        .run(vec![ProbeSpec::discovery(Duration::from_secs(5))])
        .await;

    assert_eq!(
        report.entries()[0].result.failure_kind(),
        Some(FailureKind::Unreachable)
    );
}

#[tokio::test]
async fn full_run_against_a_server_without_reflection() {
    let addr = spawn_health_server().await;
    let runner = ProbeRunner::new(&addr.to_string()).unwrap();

    let report = runner
        .run(vec![
            ProbeSpec::reachability(Duration::from_secs(5)),
            ProbeSpec::query(None, Duration::from_secs(5)),
            ProbeSpec::discovery(Duration::from_secs(5)),
        ])
        .await;

    let outcomes: Vec<_> = report
        .iter()
        .map(|entry| {
            (
                entry.name.as_str(),
                entry.result.is_success(),
                entry.result.is_skipped(),
            )
        })
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("reachability", true, false),
            ("query", false, true),
            ("discovery", false, true),
        ]
    );
    assert!(!report.has_failures());
}
