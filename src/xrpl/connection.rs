use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::models::ConnectionStatus;
use crate::xrpl::command::RpcCommand;
use crate::xrpl::endpoints::Endpoint;
use crate::xrpl::session::ClientSession;
use crate::xrpl::transport::Transport;

/// Liveness check method
const HEALTH_CHECK_METHOD: &str = "server_info";

/// Picks an initially healthy endpoint and owns the connected flag.
///
/// Connecting never fails: when no endpoint answers the session is still
/// marked connected, in demo mode. `connected` is a status indicator, not a
/// gate; domain operations work either way.
pub struct ConnectionManager {
    endpoints: Arc<[Endpoint]>,
    transport: Arc<dyn Transport>,
    session: Arc<ClientSession>,
    health_check_timeout: Duration,
}

impl ConnectionManager {
    pub fn new(
        endpoints: Arc<[Endpoint]>,
        transport: Arc<dyn Transport>,
        session: Arc<ClientSession>,
        health_check_timeout: Duration,
    ) -> Self {
        Self {
            endpoints,
            transport,
            session,
            health_check_timeout,
        }
    }

    /// Check endpoints in registry order and settle on the first that answers
    pub async fn connect(&self) {
        let _routing = self.session.lock_routing().await;
        self.check_all().await;
    }

    /// Connect unless a previous connect (live or demo) is still in effect
    pub async fn ensure_connected(&self) {
        if self.session.is_connected() {
            return;
        }

        let _routing = self.session.lock_routing().await;
        // Another caller may have connected while we waited for the lock
        if !self.session.is_connected() {
            self.check_all().await;
        }
    }

    pub async fn disconnect(&self) {
        if self.session.is_connected() {
            info!("Disconnected from ledger network");
        }
        self.session.mark_disconnected();
    }

    pub fn status(&self) -> ConnectionStatus {
        self.session.status()
    }

    async fn check_all(&self) {
        let check = RpcCommand::new(HEALTH_CHECK_METHOD);

        for (index, endpoint) in self.endpoints.iter().enumerate() {
            let id = self.session.next_request_id();
            match self.transport.send(endpoint, &check, id, self.health_check_timeout).await {
                Ok(_) => {
                    self.session.set_active_endpoint(index);
                    self.session.mark_connected(true);
                    info!("Connected to ledger endpoint: {}", endpoint);
                    return;
                }
                Err(e) => {
                    warn!("Failed to connect to {}, trying next: {}", endpoint, e);
                }
            }
        }

        self.session.mark_connected(false);
        warn!("All ledger endpoints failed, using demo mode");
    }
}
