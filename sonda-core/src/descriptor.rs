//! # Query Bindings
//!
//! Caller-supplied protocol bindings for the query probe.
//!
//! The probe library carries no compiled-in knowledge of any target schema. To issue a
//! real RPC, the caller provides an encoded `FileDescriptorSet` (as produced by
//! `protoc --descriptor_set_out` or `buf build`) plus the `package.Service/Method`
//! path to call, a JSON request body, and optional metadata headers. All of it is
//! validated here, at construction, so invalid input fails before any probe runs.
use prost_reflect::{DescriptorPool, MethodDescriptor};
use std::path::Path;
use std::str::FromStr;
use tonic::metadata::errors::{InvalidMetadataKey, InvalidMetadataValue};
use tonic::metadata::{MetadataKey, MetadataMap, MetadataValue};

#[derive(Debug, thiserror::Error)]
pub enum BindingsError {
    #[error("Failed to read descriptor set file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode descriptor set: {0}")]
    Decode(#[from] prost_reflect::DescriptorError),
    #[error("Invalid method path '{0}', expected 'package.Service/Method'")]
    InvalidMethodPath(String),
    #[error("Service '{0}' not found in the descriptor set")]
    ServiceNotFound(String),
    #[error("Method '{method}' not found on service '{service}'")]
    MethodNotFound { service: String, method: String },
    #[error("Method '{0}' is not unary")]
    NotUnary(String),
    #[error("Invalid metadata (header) key '{key}': '{source}'")]
    InvalidMetadataKey {
        key: String,
        source: InvalidMetadataKey,
    },
    #[error("Invalid metadata (header) value for key '{key}': '{source}'")]
    InvalidMetadataValue {
        key: String,
        source: InvalidMetadataValue,
    },
}

/// Everything the query probe needs to issue its single unary call: the resolved
/// method descriptor, the JSON request body, and pre-validated request metadata.
#[derive(Debug, Clone)]
pub struct QueryBindings {
    method: MethodDescriptor,
    body: serde_json::Value,
    metadata: MetadataMap,
}

impl QueryBindings {
    /// Loads an encoded `FileDescriptorSet` from disk and resolves the bindings.
    pub fn from_file(
        path: impl AsRef<Path>,
        method_path: &str,
        body: serde_json::Value,
        headers: Vec<(String, String)>,
    ) -> Result<Self, BindingsError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, method_path, body, headers)
    }

    /// Resolves the bindings from an already-loaded encoded `FileDescriptorSet`.
    ///
    /// # Arguments
    /// * `bytes` - The encoded `FileDescriptorSet`.
    /// * `method_path` - The method to call, as `package.Service/Method`.
    /// * `body` - The JSON request payload, validated against the schema at call time.
    /// * `headers` - Metadata headers as `(key, value)` pairs, validated here.
    pub fn from_bytes(
        bytes: &[u8],
        method_path: &str,
        body: serde_json::Value,
        headers: Vec<(String, String)>,
    ) -> Result<Self, BindingsError> {
        let pool = DescriptorPool::decode(bytes)?;
        let method = resolve_method(&pool, method_path)?;
        let metadata = build_metadata(headers)?;

        Ok(Self {
            method,
            body,
            metadata,
        })
    }

    pub fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    /// The `package.Service/Method` path these bindings resolve to.
    pub fn method_path(&self) -> String {
        format!(
            "{}/{}",
            self.method.parent_service().full_name(),
            self.method.name()
        )
    }
}

fn resolve_method(
    pool: &DescriptorPool,
    method_path: &str,
) -> Result<MethodDescriptor, BindingsError> {
    let (service_name, method_name) = method_path
        .split_once('/')
        .filter(|(service, method)| !service.is_empty() && !method.is_empty())
        .ok_or_else(|| BindingsError::InvalidMethodPath(method_path.to_string()))?;

    let service = pool
        .get_service_by_name(service_name)
        .ok_or_else(|| BindingsError::ServiceNotFound(service_name.to_string()))?;

    let method = service
        .methods()
        .find(|method| method.name() == method_name)
        .ok_or_else(|| BindingsError::MethodNotFound {
            service: service_name.to_string(),
            method: method_name.to_string(),
        })?;

    // One probe, one call. Streaming methods have no place here.
    if method.is_client_streaming() || method.is_server_streaming() {
        return Err(BindingsError::NotUnary(method_path.to_string()));
    }

    Ok(method)
}

fn build_metadata(headers: Vec<(String, String)>) -> Result<MetadataMap, BindingsError> {
    let mut metadata = MetadataMap::new();

    for (k, v) in headers {
        let key = MetadataKey::from_str(&k).map_err(|source| BindingsError::InvalidMetadataKey {
            key: k.clone(),
            source,
        })?;
        let value = MetadataValue::from_str(&v)
            .map_err(|source| BindingsError::InvalidMetadataValue { key: k, source })?;
        metadata.insert(key, value);
    }

    Ok(metadata)
}
