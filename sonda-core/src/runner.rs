//! # Probe Runner
//!
//! Sequential execution of probes against a single target, one bounded attempt per
//! probe, collected into an ordered [`ProbeReport`].
use crate::channel::{Target, TargetParseError};
use crate::probe::ProbeSpec;
use crate::report::{FailureKind, ProbeEntry, ProbeReport, ProbeResult};
use std::time::Instant;
use tokio::time::timeout;
use tracing::debug;

/// Runs a list of probes against one target and collects their outcomes.
///
/// The target address is validated when the runner is built; a malformed address is a
/// caller error and never turns into a probe failure. Each probe then runs under its
/// own hard deadline: when the deadline elapses the executor's future is dropped,
/// cancelling the in-flight call, and the outcome is recorded as a timeout without
/// waiting for transport teardown.
///
/// The runner never retries. One attempt, one timeout, one result per probe keeps the
/// semantics simple; retry policy belongs to the caller.
///
/// ```rust,no_run
/// use sonda_core::probe::{DEFAULT_REACHABILITY_TIMEOUT, DEFAULT_RPC_TIMEOUT, ProbeSpec};
/// use sonda_core::runner::ProbeRunner;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let runner = ProbeRunner::new("localhost:9080")?;
/// let report = runner
///     .run(vec![
///         ProbeSpec::reachability(DEFAULT_REACHABILITY_TIMEOUT),
///         ProbeSpec::discovery(DEFAULT_RPC_TIMEOUT),
///     ])
///     .await;
///
/// for entry in &report {
///     println!("{}: {:?}", entry.name, entry.result);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ProbeRunner {
    target: Target,
}

impl ProbeRunner {
    /// Builds a runner for a `host:port` target, failing fast on malformed addresses.
    pub fn new(target: &str) -> Result<Self, TargetParseError> {
        Ok(Self::from_target(Target::parse(target)?))
    }

    /// Builds a runner from an already-validated target.
    pub fn from_target(target: Target) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Executes every probe in order and returns one report entry per spec.
    ///
    /// Probes are independent: no connection is shared between them and no outcome
    /// gates a later probe. An empty list yields an empty report, not an error.
    pub async fn run(&self, probes: Vec<ProbeSpec>) -> ProbeReport {
        let mut entries = Vec::with_capacity(probes.len());

        for spec in probes {
            debug!(
                "running probe '{}' with timeout {:?}",
                spec.name, spec.timeout
            );
            let started = Instant::now();

            let result = match timeout(spec.timeout, spec.probe.execute(&self.target)).await {
                Ok(Ok(success)) => ProbeResult::Success {
                    detail: success.detail,
                },
                Ok(Err(err)) => err.into(),
                Err(_) => ProbeResult::Failure {
                    kind: FailureKind::Timeout,
                    detail: format!("{} timed out after {:?}", spec.name, spec.timeout),
                },
            };

            debug!("probe '{}' finished in {:?}", spec.name, started.elapsed());
            entries.push(ProbeEntry {
                name: spec.name,
                result,
            });
        }

        ProbeReport::new(entries)
    }
}
