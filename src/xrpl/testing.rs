use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use crate::xrpl::command::{RpcCommand, RpcResponse};
use crate::xrpl::endpoints::Endpoint;
use crate::xrpl::error::RpcError;
use crate::xrpl::transport::Transport;

/// In-process transport: listed endpoints are unreachable, the rest answer
/// with a canned result per method (or an echo of endpoint and method).
pub(crate) struct ScriptedTransport {
    failing: HashSet<String>,
    results: HashMap<String, Value>,
    calls: Mutex<Vec<(String, String, u64)>>,
}

impl ScriptedTransport {
    pub fn new(failing: &[&str]) -> Self {
        Self {
            failing: failing.iter().map(|u| u.to_string()).collect(),
            results: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_result(mut self, method: &str, result: Value) -> Self {
        self.results.insert(method.to_string(), result);
        self
    }

    /// (endpoint, request id) per call, in order
    pub fn calls(&self) -> Vec<(String, u64)> {
        self.calls.lock().unwrap().iter().map(|(url, _, id)| (url.clone(), *id)).collect()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(_, method, _)| method.clone()).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        command: &RpcCommand,
        id: u64,
        _timeout: Duration,
    ) -> Result<RpcResponse, RpcError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.url().to_string(), command.method().to_string(), id));

        // Let other tasks interleave the way a real network call would
        tokio::task::yield_now().await;

        if self.failing.contains(endpoint.url()) {
            return Err(RpcError::Unreachable {
                endpoint: endpoint.to_string(),
                reason: "connection refused".to_string(),
            });
        }

        let result = self
            .results
            .get(command.method())
            .cloned()
            .unwrap_or_else(|| json!({ "endpoint": endpoint.url(), "method": command.method(), "status": "success" }));

        Ok(RpcResponse {
            result,
            status: Some("success".to_string()),
            kind: Some("response".to_string()),
            ..RpcResponse::default()
        })
    }
}
