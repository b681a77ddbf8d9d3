use super::{Probe, ProbeError, ProbeSuccess};
use crate::channel::Target;
use async_trait::async_trait;
use std::time::Instant;
use tokio::net::TcpStream;
use tracing::debug;

/// Pure liveness check: opens a TCP connection to the target and reports the resolved
/// peer address and how long the connect took. No application RPC is issued.
#[derive(Debug, Default)]
pub struct ReachabilityProbe;

#[async_trait]
impl Probe for ReachabilityProbe {
    async fn execute(&self, target: &Target) -> Result<ProbeSuccess, ProbeError> {
        let address = target.authority();
        debug!("opening tcp connection to {address}");

        let started = Instant::now();
        let stream = TcpStream::connect(address.as_str())
            .await
            .map_err(|err| ProbeError::Unreachable {
                detail: format!("tcp connect to {address} failed: {err}"),
            })?;
        let elapsed = started.elapsed();

        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or(address);

        Ok(ProbeSuccess::new(format!(
            "tcp connection established to {peer} in {elapsed:?}"
        )))
    }
}
