use serde::{Deserialize, Serialize};

use crate::xrpl::NetworkMode;

/// Connectivity of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Never connected, or explicitly disconnected
    Disconnected,
    /// An endpoint answered the liveness check
    Live,
    /// No endpoint answered; running on synthesized data
    Demo,
}

/// Snapshot of where the client is pointed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub endpoint_url: String,
    pub is_test_mode: bool,
    pub connected: bool,
    pub mode: NetworkMode,
    pub status: ConnectionStatus,
}
