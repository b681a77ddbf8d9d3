//! # Sonda Core
//!
//! `sonda-core` is the foundational library powering the Sonda CLI. It provides a small
//! set of health probes for gRPC endpoints: raw TCP reachability, a single dynamic unary
//! call, and service discovery through server reflection, all executed under bounded
//! deadlines and collected into an ordered report.
//!
//! ## Key Components
//!
//! * **[`runner::ProbeRunner`]:** The main entry point. It validates the target address up
//!   front, drives each probe sequentially under its own deadline, and returns a
//!   [`report::ProbeReport`].
//! * **[`probe::ProbeSpec`]:** A named probe with its timeout. Constructors are provided
//!   for the three built-in probes; any [`probe::Probe`] implementation can be boxed into
//!   a spec, so custom checks slot into the same report.
//! * **[`report::ProbeReport`]:** The immutable outcome of a run, one entry per probe in
//!   execution order.
//!
//! ## Internal clients
//!
//! We've decided to expose the clients that the built-in probes use internally, so callers
//! can reuse them for richer diagnostics.
//!
//! * **[`grpc::GrpcClient`]:** A dynamic gRPC client issuing unary calls described by a
//!   `prost_reflect::MethodDescriptor`, using a custom Json Codec.
//! * **[`reflection::ReflectionClient`]:** A gRPC Server Reflection client offering the
//!   service enumeration the discovery probe needs.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost_reflect` and `tonic` to ensure that consumers use
//! compatible versions of these underlying dependencies.
pub mod channel;
pub mod descriptor;
pub mod grpc;
pub mod probe;
pub mod reflection;
pub mod report;
pub mod runner;

// Re-exports
pub use prost_reflect;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
