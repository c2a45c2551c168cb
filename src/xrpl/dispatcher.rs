use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::xrpl::command::{RpcCommand, RpcResponse};
use crate::xrpl::endpoints::Endpoint;
use crate::xrpl::error::RpcError;
use crate::xrpl::session::ClientSession;
use crate::xrpl::transport::Transport;

/// Sends commands to the active endpoint, rotating forward on failure.
///
/// Routing is sticky: a success leaves the active endpoint where it is. A
/// failure advances it by one (mod n) and retries, and a single dispatch
/// makes at most one attempt per registered endpoint.
pub struct FailoverDispatcher {
    endpoints: Arc<[Endpoint]>,
    transport: Arc<dyn Transport>,
    session: Arc<ClientSession>,
    request_timeout: Duration,
}

impl FailoverDispatcher {
    pub fn new(
        endpoints: Arc<[Endpoint]>,
        transport: Arc<dyn Transport>,
        session: Arc<ClientSession>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            endpoints,
            transport,
            session,
            request_timeout,
        }
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    /// Deliver `command`, failing over through every endpoint at most once
    pub async fn dispatch(&self, command: &RpcCommand) -> Result<RpcResponse, RpcError> {
        let count = self.endpoints.len();
        if count == 0 {
            return Err(RpcError::AllEndpointsFailed {
                attempts: 0,
                last: Box::new(RpcError::Unreachable {
                    endpoint: String::new(),
                    reason: "no endpoints registered".to_string(),
                }),
            });
        }

        let _routing = self.session.lock_routing().await;

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < count {
            let index = self.session.active_endpoint() % count;
            let endpoint = &self.endpoints[index];
            let id = self.session.next_request_id();

            match self.transport.send(endpoint, command, id, self.request_timeout).await {
                Ok(response) => {
                    debug!("{} succeeded on {}", command.method(), endpoint);
                    return Ok(response);
                }
                Err(e) => {
                    warn!("Request {} failed on endpoint {}: {}", command.method(), endpoint, e);

                    let next = (index + 1) % count;
                    self.session.set_active_endpoint(next);
                    attempts += 1;
                    last_error = Some(e);

                    if attempts < count {
                        debug!("Failing over to {}", self.endpoints[next]);
                    }
                }
            }
        }

        let last = last_error.unwrap_or_else(|| RpcError::Unreachable {
            endpoint: String::new(),
            reason: "no attempt made".to_string(),
        });

        Err(RpcError::AllEndpointsFailed {
            attempts,
            last: Box::new(last),
        })
    }
}
