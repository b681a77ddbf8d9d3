//! # CLI
//!
//! This module defines the command-line interface of `sonda` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring
//! headers are `key:value` and the request body is valid JSON) before any probe runs.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "sonda", version, about = "gRPC endpoint health probes")]
pub struct Cli {
    /// The target to probe, as 'host:port' (e.g. localhost:9080)
    pub target: String,

    /// Deadline in seconds for the TCP reachability probe
    #[arg(long, value_name = "SECONDS", default_value_t = 5)]
    pub connect_timeout: u64,

    /// Deadline in seconds for the probes that issue an RPC (query, discovery)
    #[arg(long, value_name = "SECONDS", default_value_t = 10)]
    pub rpc_timeout: u64,

    /// Path to an encoded FileDescriptorSet (.bin) describing the target's protocol
    #[arg(long, value_name = "FILE", requires = "method")]
    pub descriptor_set: Option<PathBuf>,

    /// Unary method for the query probe to call (package.Service/Method)
    #[arg(long, value_name = "PATH", requires = "descriptor_set")]
    pub method: Option<String>,

    /// JSON body for the query probe request
    #[arg(long, default_value = "{}", value_parser = parse_body)]
    pub body: serde_json::Value,

    /// Metadata header for the query probe (key:value)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Do not run the query probe
    #[arg(long)]
    pub no_query: bool,

    /// Do not run the discovery probe
    #[arg(long)]
    pub no_discovery: bool,

    /// Report output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Log probe progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Machine-readable report, one JSON object on stdout
    Json,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    s.split_once(':')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| "Format must be 'key:value'".to_string())
}

fn parse_body(value: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(value).map_err(|e| format!("Invalid JSON: {e}"))
}
