//! # Server Reflection
//!
//! Interaction with the gRPC Server Reflection Protocol (`grpc.reflection.v1`).
//!
//! The discovery probe uses this to enumerate the services a target exposes at runtime,
//! with no pre-compiled descriptors. Protocol types come from `tonic-reflection`, so no
//! build-time code generation is involved.
pub mod client;

pub use client::{ReflectionClient, ReflectionError};
