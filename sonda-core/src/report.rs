//! # Probe Reports
//!
//! The structured outcome of a probe run. Probes never print; they produce
//! [`ProbeResult`] values which the runner collects, in execution order, into an
//! immutable [`ProbeReport`]. Rendering to a console or to JSON is a separate concern
//! of the caller.

/// Classification of a probe failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The probe's deadline elapsed before it finished.
    Timeout,
    /// Transport-level failure: refused connection, reset, DNS resolution.
    Unreachable,
    /// The remote service answered with an explicit error status.
    RpcRejected,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Unreachable => "unreachable",
            FailureKind::RpcRejected => "rpc_rejected",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Success { detail: String },
    Failure { kind: FailureKind, detail: String },
    Skipped { reason: String },
}

impl ProbeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ProbeResult::Failure { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ProbeResult::Skipped { .. })
    }

    /// The failure classification, if this result is a failure.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ProbeResult::Failure { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// One report line: the probe's name paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeEntry {
    pub name: String,
    pub result: ProbeResult,
}

/// Ordered, immutable collection of probe outcomes.
///
/// Entry order is execution order, which is the order the specs were handed to the
/// runner. The report exposes read access only; once returned it never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    entries: Vec<ProbeEntry>,
}

impl ProbeReport {
    pub fn new(entries: Vec<ProbeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ProbeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProbeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.count(ProbeResult::is_success)
    }

    pub fn failed(&self) -> usize {
        self.count(ProbeResult::is_failure)
    }

    pub fn skipped(&self) -> usize {
        self.count(ProbeResult::is_skipped)
    }

    /// Whether any probe failed. Skipped probes never count as failures.
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, predicate: impl Fn(&ProbeResult) -> bool) -> usize {
        self.entries
            .iter()
            .filter(|entry| predicate(&entry.result))
            .count()
    }
}

impl<'a> IntoIterator for &'a ProbeReport {
    type Item = &'a ProbeEntry;
    type IntoIter = std::slice::Iter<'a, ProbeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
