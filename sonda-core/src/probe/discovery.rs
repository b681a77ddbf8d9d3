use super::{Probe, ProbeError, ProbeSuccess};
use crate::channel::{self, Target};
use crate::reflection::{ReflectionClient, ReflectionError};
use async_trait::async_trait;
use tracing::debug;

/// Reason reported when the target does not expose the reflection service.
pub const REFLECTION_UNSUPPORTED: &str = "reflection not supported by transport";

/// Enumerates the services the target exposes through gRPC Server Reflection.
///
/// Absence of reflection is not an error condition: a target that rejects the
/// reflection stream outright reports [`REFLECTION_UNSUPPORTED`] as skipped. An error
/// response from the reflection service itself is a rejection, and connection failures
/// are unreachability, as for any other probe.
#[derive(Debug, Default)]
pub struct DiscoveryProbe;

#[async_trait]
impl Probe for DiscoveryProbe {
    async fn execute(&self, target: &Target) -> Result<ProbeSuccess, ProbeError> {
        debug!("listing services on {target} via reflection");
        let channel = channel::connect(target).await?;
        let mut client = ReflectionClient::new(channel);

        let mut services = client.list_services().await.map_err(classify)?;
        services.sort();

        let detail = if services.is_empty() {
            "0 services exposed".to_string()
        } else {
            format!("{} services exposed: {}", services.len(), services.join(", "))
        };

        Ok(ProbeSuccess::new(detail))
    }
}

fn classify(err: ReflectionError) -> ProbeError {
    match err {
        ReflectionError::ServerStreamInitFailed(_) => ProbeError::Precondition {
            reason: REFLECTION_UNSUPPORTED.to_string(),
        },
        ReflectionError::ServerError { code, message } => ProbeError::Rejected {
            detail: format!("reflection error code {code}: {message}"),
        },
        ReflectionError::ServerStreamFailure(status) => ProbeError::Rejected {
            detail: format!("{:?}: {}", status.code(), status.message()),
        },
        other => ProbeError::Rejected {
            detail: other.to_string(),
        },
    }
}
