//! # Generic gRPC Transport
//!
//! Low-level building blocks for issuing a gRPC call without compile-time knowledge of
//! the target schema.
//!
//! Unlike standard `tonic` clients which are strongly typed (e.g., `HealthCheckRequest`),
//! the components here work with generic `serde_json::Value` structures, transcoding
//! them to Protobuf binary format on the fly against a `MethodDescriptor`.
pub mod client;
pub mod codec;

pub use client::{GrpcClient, GrpcRequestError};
