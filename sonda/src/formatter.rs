use colored::*;
use sonda_core::report::{ProbeReport, ProbeResult};
use std::fmt::Display;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

/// A probe report paired with the target it ran against, ready for the console.
pub struct ReportView<'a> {
    pub target: &'a str,
    pub report: &'a ProbeReport,
}

pub struct GenericError<T: Display>(pub &'static str, pub T);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}

impl From<ReportView<'_>> for FormattedString {
    fn from(ReportView { target, report }: ReportView<'_>) -> Self {
        if report.is_empty() {
            return FormattedString(format!("No probes ran against {target}.").yellow().to_string());
        }

        let width = report
            .iter()
            .map(|entry| entry.name.len())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        out.push_str(&format!("Probing {target}\n\n"));

        for entry in report {
            let (label, text) = match &entry.result {
                ProbeResult::Success { detail } => (pad("PASS").green().bold(), detail),
                ProbeResult::Failure { detail, .. } => (pad("FAIL").red().bold(), detail),
                ProbeResult::Skipped { reason } => (pad("SKIPPED").yellow().bold(), reason),
            };
            out.push_str(&format!("  {:<width$}  {label} {text}\n", entry.name));
        }

        out.push_str(&format!(
            "\n{} passed, {} failed, {} skipped",
            report.passed(),
            report.failed(),
            report.skipped()
        ));
        FormattedString(out)
    }
}

// Pad before colouring, ANSI escapes count toward the format width.
fn pad(label: &str) -> String {
    format!("{label:<7}")
}

/// Renders a report as a single JSON object, carrying the same information as the
/// text view plus the failure kind of each failed probe.
pub fn report_json(target: &str, report: &ProbeReport) -> serde_json::Value {
    let probes: Vec<serde_json::Value> = report
        .iter()
        .map(|entry| match &entry.result {
            ProbeResult::Success { detail } => serde_json::json!({
                "name": entry.name,
                "status": "pass",
                "detail": detail,
            }),
            ProbeResult::Failure { kind, detail } => serde_json::json!({
                "name": entry.name,
                "status": "fail",
                "kind": kind.as_str(),
                "detail": detail,
            }),
            ProbeResult::Skipped { reason } => serde_json::json!({
                "name": entry.name,
                "status": "skipped",
                "reason": reason,
            }),
        })
        .collect();

    serde_json::json!({
        "target": target,
        "probes": probes,
        "summary": {
            "passed": report.passed(),
            "failed": report.failed(),
            "skipped": report.skipped(),
        },
    })
}
