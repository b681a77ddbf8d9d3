//! # Generic gRPC Client
//!
//! A thin wrapper over `tonic::client::Grpc` issuing unary calls described entirely at
//! runtime. It is agnostic to the specific Protobuf messages being exchanged.
//!
//! ## How it works
//!
//! The [`GrpcClient`] uses the [`super::codec::JsonCodec`] to handle serialization. It
//! does not need to know the structure of the data it is sending; it builds the HTTP/2
//! path (e.g., `/package.Service/Method`) from the `MethodDescriptor` and hands the
//! `serde_json::Value` payload to the codec.
//!
//! Only unary calls are offered: a probe issues exactly one request and reads exactly
//! one response. Request metadata arrives as an already-validated
//! [`tonic::metadata::MetadataMap`], so sending cannot fail on header syntax.
use super::codec::JsonCodec;
use crate::BoxError;
use http_body::Body as HttpBody;
use prost_reflect::MethodDescriptor;
use std::str::FromStr;
use tonic::{client::GrpcService, metadata::MetadataMap, transport::Channel};

#[derive(thiserror::Error, Debug)]
pub enum GrpcRequestError {
    #[error("Internal error, the client was not ready: '{0}'")]
    ClientNotReady(#[source] BoxError),
}

/// A dynamic gRPC client for single unary calls.
pub struct GrpcClient<S = Channel> {
    client: tonic::client::Grpc<S>,
}

impl<S> GrpcClient<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S) -> Self {
        let client = tonic::client::Grpc::new(service);
        Self { client }
    }

    /// Performs a Unary gRPC call (Single Request -> Single Response).
    ///
    /// # Returns
    /// * `Ok(Ok(Value))` - Successful RPC execution.
    /// * `Ok(Err(Status))` - RPC executed, but the server returned an error.
    /// * `Err(GrpcRequestError)` - Failed to ready the underlying transport.
    pub async fn unary(
        &mut self,
        method: MethodDescriptor,
        payload: serde_json::Value,
        metadata: MetadataMap,
    ) -> Result<Result<serde_json::Value, tonic::Status>, GrpcRequestError> {
        self.client
            .ready()
            .await
            .map_err(|e| GrpcRequestError::ClientNotReady(e.into()))?;

        let codec = JsonCodec::new(method.input(), method.output());
        let path = http_path(&method);

        let mut request = tonic::Request::new(payload);
        *request.metadata_mut() = metadata;

        match self.client.unary(request, path, codec).await {
            Ok(response) => Ok(Ok(response.into_inner())),
            Err(status) => Ok(Err(status)),
        }
    }
}

fn http_path(method: &MethodDescriptor) -> http::uri::PathAndQuery {
    let path = format!("/{}/{}", method.parent_service().full_name(), method.name());
    http::uri::PathAndQuery::from_str(&path).expect("valid gRPC path")
}
