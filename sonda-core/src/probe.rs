//! # Probes
//!
//! The probe abstraction and the three built-in connectivity checks.
//!
//! A probe performs exactly one check against a target and reports a structured
//! outcome: a success detail, a classified error, or an unmet precondition. Probes do
//! not enforce their own deadlines; the runner drives each execution under a hard
//! timeout and classifies an elapsed deadline itself.
//!
//! ## Built-in probes
//!
//! * **[`ReachabilityProbe`]:** Opens a TCP connection to the target. Pure liveness
//!   check, no application RPC.
//! * **[`QueryProbe`]:** Issues one unary RPC described by caller-supplied
//!   [`QueryBindings`]. Without bindings the probe is settled as skipped at
//!   construction time.
//! * **[`DiscoveryProbe`]:** Enumerates the services the target exposes through the
//!   gRPC Server Reflection protocol, skipping gracefully when the target doesn't
//!   offer it.
pub mod discovery;
pub mod query;
pub mod reachability;

pub use discovery::DiscoveryProbe;
pub use query::QueryProbe;
pub use reachability::ReachabilityProbe;

use crate::channel::{ChannelConnectError, Target};
use crate::descriptor::QueryBindings;
use crate::report::{FailureKind, ProbeResult};
use async_trait::async_trait;
use std::time::Duration;

/// Default deadline for the reachability probe.
pub const DEFAULT_REACHABILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default deadline for probes that issue an RPC (query, discovery).
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// A single connectivity or capability check against a target.
///
/// Implementations acquire whatever transport resources they need inside `execute` and
/// release them before returning, so no connection outlives one probe execution. Errors
/// are always returned as [`ProbeError`], never panicked or logged-and-swallowed.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn execute(&self, target: &Target) -> Result<ProbeSuccess, ProbeError>;
}

/// Successful probe outcome with a human-readable summary for the report.
#[derive(Debug, Clone)]
pub struct ProbeSuccess {
    pub detail: String,
}

impl ProbeSuccess {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Classified probe error, converted by the runner into a terminal [`ProbeResult`].
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Transport-level failure: refused connection, reset, DNS resolution.
    #[error("{detail}")]
    Unreachable { detail: String },
    /// The remote service answered the call with an explicit error status.
    #[error("{detail}")]
    Rejected { detail: String },
    /// A precondition of the probe is not met; maps to a skip, not a failure.
    #[error("{reason}")]
    Precondition { reason: String },
}

impl From<ProbeError> for ProbeResult {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Unreachable { detail } => ProbeResult::Failure {
                kind: FailureKind::Unreachable,
                detail,
            },
            ProbeError::Rejected { detail } => ProbeResult::Failure {
                kind: FailureKind::RpcRejected,
                detail,
            },
            ProbeError::Precondition { reason } => ProbeResult::Skipped { reason },
        }
    }
}

impl From<ChannelConnectError> for ProbeError {
    fn from(err: ChannelConnectError) -> Self {
        let detail = match &err {
            ChannelConnectError::InvalidUrl(..) => err.to_string(),
            ChannelConnectError::ConnectionFailed(url, source) => {
                format!("connection to '{url}' failed: {}", error_chain(source))
            }
        };
        ProbeError::Unreachable { detail }
    }
}

/// Renders an error and its full `source()` chain on one line.
///
/// Transport errors bury the interesting part ("connection refused", "name or service
/// not known") several sources deep; reports need the whole chain.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }

    rendered
}

/// A named probe together with the deadline the runner enforces for it.
pub struct ProbeSpec {
    pub(crate) name: String,
    pub(crate) timeout: Duration,
    pub(crate) probe: Box<dyn Probe>,
}

impl ProbeSpec {
    /// Wraps any probe implementation under a report name and a deadline.
    pub fn new(name: impl Into<String>, timeout: Duration, probe: Box<dyn Probe>) -> Self {
        Self {
            name: name.into(),
            timeout,
            probe,
        }
    }

    /// The standard TCP reachability probe, reported as `"reachability"`.
    pub fn reachability(timeout: Duration) -> Self {
        Self::new("reachability", timeout, Box::new(ReachabilityProbe))
    }

    /// The standard unary RPC probe, reported as `"query"`.
    ///
    /// Passing `None` produces a probe that reports
    /// [`query::BINDINGS_MISSING`] as skipped instead of failing.
    pub fn query(bindings: Option<QueryBindings>, timeout: Duration) -> Self {
        Self::new("query", timeout, Box::new(QueryProbe::new(bindings)))
    }

    /// The standard service discovery probe, reported as `"discovery"`.
    pub fn discovery(timeout: Duration) -> Self {
        Self::new("discovery", timeout, Box::new(DiscoveryProbe))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
