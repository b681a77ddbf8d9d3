//! # Sonda CLI Entry Point
//!
//! The main executable for the Sonda tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and configures logging.
//! 2. **Assembly**: Builds the probe list for the run, loading query bindings when provided.
//! 3. **Execution**: Hands the probes to the `sonda_core` runner against the target.
//! 4. **Presentation**: Renders the report to standard output and derives the exit code.

mod cli;
mod formatter;

use clap::Parser;
use cli::{Cli, OutputFormat};
use formatter::{FormattedString, GenericError, ReportView};
use sonda_core::descriptor::{BindingsError, QueryBindings};
use sonda_core::probe::ProbeSpec;
use sonda_core::runner::ProbeRunner;
use std::process;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let runner = match ProbeRunner::new(&args.target) {
        Ok(runner) => runner,
        Err(err) => {
            eprintln!(
                "{}",
                FormattedString::from(GenericError("Invalid target", err))
            );
            process::exit(2);
        }
    };

    let probes = match build_probes(&args) {
        Ok(probes) => probes,
        Err(err) => {
            eprintln!(
                "{}",
                FormattedString::from(GenericError("Invalid query bindings", err))
            );
            process::exit(2);
        }
    };

    debug!("probing '{}' with {} probes", runner.target(), probes.len());
    let report = runner.run(probes).await;

    let target = runner.target().to_string();
    match args.output {
        OutputFormat::Text => println!(
            "{}",
            FormattedString::from(ReportView {
                target: &target,
                report: &report,
            })
        ),
        OutputFormat::Json => println!("{}", formatter::report_json(&target, &report)),
    }

    if report.has_failures() {
        process::exit(1);
    }
}

/// Assembles the probe list for one run. The reachability probe always runs first;
/// the query and discovery probes follow unless disabled by flags.
fn build_probes(args: &Cli) -> Result<Vec<ProbeSpec>, BindingsError> {
    let mut probes = vec![ProbeSpec::reachability(Duration::from_secs(
        args.connect_timeout,
    ))];
    let rpc_timeout = Duration::from_secs(args.rpc_timeout);

    if !args.no_query {
        let bindings = match (&args.descriptor_set, &args.method) {
            (Some(path), Some(method)) => Some(QueryBindings::from_file(
                path,
                method,
                args.body.clone(),
                args.headers.clone(),
            )?),
            _ => None,
        };
        probes.push(ProbeSpec::query(bindings, rpc_timeout));
    }

    if !args.no_discovery {
        probes.push(ProbeSpec::discovery(rpc_timeout));
    }

    Ok(probes)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sonda=debug,sonda_core=debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
