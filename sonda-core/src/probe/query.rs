use super::{Probe, ProbeError, ProbeSuccess};
use crate::channel::{self, Target};
use crate::descriptor::QueryBindings;
use crate::grpc::GrpcClient;
use async_trait::async_trait;
use tracing::debug;

/// Reason reported when the probe was built without bindings.
pub const BINDINGS_MISSING: &str = "query bindings not provided";

const EXCERPT_CHARS: usize = 120;

/// Issues exactly one unary RPC against the target and reports the response size plus
/// a short excerpt of its JSON rendering.
///
/// Whether the probe can run at all is settled when it is built: without
/// [`QueryBindings`] it permanently reports [`BINDINGS_MISSING`] as skipped. This keeps
/// the skip condition explicit and testable instead of surfacing as a call-time error.
pub struct QueryProbe {
    state: State,
}

enum State {
    Ready(QueryBindings),
    Unavailable { reason: &'static str },
}

impl QueryProbe {
    pub fn new(bindings: Option<QueryBindings>) -> Self {
        let state = match bindings {
            Some(bindings) => State::Ready(bindings),
            None => State::Unavailable {
                reason: BINDINGS_MISSING,
            },
        };
        Self { state }
    }
}

#[async_trait]
impl Probe for QueryProbe {
    async fn execute(&self, target: &Target) -> Result<ProbeSuccess, ProbeError> {
        let bindings = match &self.state {
            State::Ready(bindings) => bindings,
            State::Unavailable { reason } => {
                return Err(ProbeError::Precondition {
                    reason: (*reason).to_string(),
                });
            }
        };

        debug!("calling {} on {target}", bindings.method_path());
        let channel = channel::connect(target).await?;
        let mut client = GrpcClient::new(channel);

        let response = client
            .unary(
                bindings.method().clone(),
                bindings.body().clone(),
                bindings.metadata().clone(),
            )
            .await
            .map_err(|err| ProbeError::Unreachable {
                detail: err.to_string(),
            })?;

        match response {
            Ok(value) => Ok(ProbeSuccess::new(response_summary(&value))),
            Err(status) => Err(ProbeError::Rejected {
                detail: format!("{:?}: {}", status.code(), status.message()),
            }),
        }
    }
}

fn response_summary(value: &serde_json::Value) -> String {
    let rendered = value.to_string();
    let excerpt: String = rendered.chars().take(EXCERPT_CHARS).collect();

    if rendered.chars().count() > EXCERPT_CHARS {
        format!("response received ({} bytes): {excerpt}...", rendered.len())
    } else {
        format!("response received ({} bytes): {excerpt}", rendered.len())
    }
}
