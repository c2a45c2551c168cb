use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use crate::xrpl::command::{RpcCommand, RpcResponse};
use crate::xrpl::endpoints::Endpoint;
use crate::xrpl::error::RpcError;

/// One RPC round trip against one endpoint. No retries happen at this level.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `command` stamped with `id`, bounded by `timeout` end to end
    async fn send(
        &self,
        endpoint: &Endpoint,
        command: &RpcCommand,
        id: u64,
        timeout: Duration,
    ) -> Result<RpcResponse, RpcError>;
}

/// JSON-RPC over HTTP POST
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn exchange(
        &self,
        endpoint: &Endpoint,
        command: &RpcCommand,
        id: u64,
        timeout: Duration,
    ) -> Result<RpcResponse, RpcError> {
        let body = command.to_request_body(id);

        let resp = self
            .client
            .post(endpoint.url())
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify(endpoint, timeout, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RpcError::Unreachable {
                endpoint: endpoint.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| classify(endpoint, timeout, e))?;
        serde_json::from_slice(&bytes).map_err(|e| RpcError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        endpoint: &Endpoint,
        command: &RpcCommand,
        id: u64,
        timeout: Duration,
    ) -> Result<RpcResponse, RpcError> {
        debug!("Sending {} (id {}) to {}", command.method(), id, endpoint);

        let response = tokio::time::timeout(timeout, self.exchange(endpoint, command, id, timeout))
            .await
            .map_err(|_| timed_out(endpoint, timeout))??;

        if let Some(err) = response.application_error() {
            return Err(err);
        }

        Ok(response)
    }
}

fn timed_out(endpoint: &Endpoint, timeout: Duration) -> RpcError {
    RpcError::Timeout {
        endpoint: endpoint.to_string(),
        timeout_ms: timeout.as_millis() as u64,
    }
}

fn classify(endpoint: &Endpoint, timeout: Duration, err: reqwest::Error) -> RpcError {
    if err.is_timeout() {
        timed_out(endpoint, timeout)
    } else {
        RpcError::Unreachable {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMEOUT: Duration = Duration::from_secs(2);

    fn endpoint(server: &MockServer) -> Endpoint {
        Endpoint::new(format!("{}/", server.uri()))
    }

    #[tokio::test]
    async fn posts_json_rpc_envelope_and_decodes_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "method": "server_info",
                "params": [{ "id": 42 }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": { "status": "success", "info": { "build_version": "2.0.0" } },
                "type": "response"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new();
        let response = transport
            .send(&endpoint(&server), &RpcCommand::new("server_info"), 42, TIMEOUT)
            .await
            .unwrap();

        assert_eq!(response.result["info"]["build_version"], "2.0.0");
    }

    #[tokio::test]
    async fn non_success_status_is_unreachable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = HttpTransport::new()
            .send(&endpoint(&server), &RpcCommand::new("server_info"), 1, TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, RpcError::Unreachable { ref reason, .. } if reason.contains("503")));
    }

    #[tokio::test]
    async fn embedded_error_on_http_200_is_application_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "error": "actNotFound",
                    "error_message": "Account not found.",
                    "status": "error"
                }
            })))
            .mount(&server)
            .await;

        let err = HttpTransport::new()
            .send(&endpoint(&server), &RpcCommand::new("account_info"), 1, TIMEOUT)
            .await
            .unwrap_err();

        match err {
            RpcError::ApplicationError { code, message } => {
                assert_eq!(code, "actNotFound");
                assert_eq!(message, "Account not found.");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "result": {} }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = HttpTransport::new()
            .send(&endpoint(&server), &RpcCommand::new("server_info"), 1, Duration::from_millis(50))
            .await
            .unwrap_err();

        assert!(matches!(err, RpcError::Timeout { timeout_ms: 50, .. }));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = HttpTransport::new()
            .send(&endpoint(&server), &RpcCommand::new("server_info"), 1, TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, RpcError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        // Port 9 (discard) on localhost is not listening in test environments
        let err = HttpTransport::new()
            .send(&Endpoint::new("http://127.0.0.1:9/"), &RpcCommand::new("server_info"), 1, TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, RpcError::Unreachable { .. } | RpcError::Timeout { .. }));
    }
}
