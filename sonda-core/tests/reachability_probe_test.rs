use sonda_core::probe::ProbeSpec;
use sonda_core::report::{FailureKind, ProbeResult};
use sonda_core::runner::ProbeRunner;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

#[tokio::test]
async fn accepting_listener_passes_well_under_its_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let _ = listener.accept().await;
        }
    });

    let runner = ProbeRunner::new(&addr.to_string()).unwrap();
    let started = Instant::now();
    let report = runner
        .run(vec![ProbeSpec::reachability(Duration::from_secs(5))])
        .await;

    assert!(report.entries()[0].result.is_success());
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn refused_connection_fails_as_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let runner = ProbeRunner::new(&addr.to_string()).unwrap();
    let report = runner
        .run(vec![ProbeSpec::reachability(Duration::from_secs(5))])
        .await;

    let entry = &report.entries()[0];
    assert_eq!(entry.name, "reachability");
    assert_eq!(entry.result.failure_kind(), Some(FailureKind::Unreachable));
    match &entry.result {
        ProbeResult::Failure { detail, .. } => {
            assert!(
                detail.to_lowercase().contains("refused"),
                "unexpected detail: {detail}"
            );
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn success_detail_names_the_peer() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let _ = listener.accept().await;
        }
    });

    let runner = ProbeRunner::new(&addr.to_string()).unwrap();
    let report = runner
        .run(vec![ProbeSpec::reachability(Duration::from_secs(5))])
        .await;

    match &report.entries()[0].result {
        ProbeResult::Success { detail } => {
            assert!(
                detail.contains(&addr.to_string()),
                "unexpected detail: {detail}"
            );
        }
        other => panic!("expected success, got {other:?}"),
    }
}
