use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xrpl_access::config::Config;
use xrpl_access::models::ConnectionStatus;
use xrpl_access::xrpl::{Endpoint, HttpTransport, XrplClient};

const ADDRESS: &str = "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH";

fn endpoint(server: &MockServer) -> Endpoint {
    Endpoint::new(format!("{}/", server.uri()))
}

fn client(servers: &[&MockServer]) -> XrplClient {
    let config = Config {
        request_timeout_ms: 2_000,
        health_check_timeout_ms: 1_000,
        submit_delay_ms: 0,
        ..Config::default()
    };
    let endpoints = servers.iter().map(|s| endpoint(s)).collect();
    XrplClient::with_transport(&config, endpoints, Arc::new(HttpTransport::new()))
}

async fn answer(server: &MockServer, rpc_method: &str, result: Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": result, "type": "response" })))
        .mount(server)
        .await;
}

async fn request_ids(server: &MockServer) -> Vec<u64> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| {
            let body: Value = serde_json::from_slice(&r.body).unwrap();
            body["params"][0]["id"].as_u64().unwrap()
        })
        .collect()
}

#[tokio::test]
async fn history_fails_over_and_sticks_to_the_working_endpoint() {
    let flaky = MockServer::start().await;
    let healthy = MockServer::start().await;

    answer(&flaky, "server_info", json!({ "status": "success" })).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": "account_tx" })))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&flaky)
        .await;
    answer(
        &healthy,
        "account_tx",
        json!({ "account": ADDRESS, "transactions": [{ "tx": { "TransactionType": "Payment" } }] }),
    )
    .await;

    let client = client(&[&flaky, &healthy]);

    let history = client.transaction_history(ADDRESS, 10).await;
    assert_eq!(history.len(), 1);
    assert_eq!(client.network_info().endpoint_url, endpoint(&healthy).url());

    // Sticky: the second lookup goes straight to the healthy endpoint
    let history = client.transaction_history(ADDRESS, 10).await;
    assert_eq!(history.len(), 1);
    assert_eq!(client.network_info().status, ConnectionStatus::Live);

    let mut ids = request_ids(&flaky).await;
    ids.extend(request_ids(&healthy).await);
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 4);
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn embedded_ledger_error_triggers_failover() {
    let rate_limited = MockServer::start().await;
    let healthy = MockServer::start().await;

    answer(&rate_limited, "server_info", json!({ "status": "success" })).await;
    answer(
        &rate_limited,
        "account_tx",
        json!({ "error": "slowDown", "error_message": "You are placing too much load on the server.", "status": "error" }),
    )
    .await;
    answer(&healthy, "account_tx", json!({ "transactions": [] })).await;

    let client = client(&[&rate_limited, &healthy]);

    assert!(client.transaction_history(ADDRESS, 10).await.is_empty());
    assert_eq!(client.network_info().endpoint_url, endpoint(&healthy).url());
    assert_eq!(healthy.received_requests().await.unwrap_or_default().len(), 1);
}

#[tokio::test]
async fn unreachable_network_degrades_to_demo_mode() {
    let down_a = MockServer::start().await;
    let down_b = MockServer::start().await;
    for server in [&down_a, &down_b] {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .mount(server)
            .await;
    }

    let client = client(&[&down_a, &down_b]);
    client.connect().await;

    let info = client.network_info();
    assert!(info.connected);
    assert_eq!(info.status, ConnectionStatus::Demo);

    assert_eq!(client.account_balance("garbage").await, 1250.32);
    assert_eq!(client.account_info(ADDRESS).await.balance, "1250320000");
    assert!(client.transaction_history(ADDRESS, 10).await.is_empty());

    let paths = client.find_payment_paths(ADDRESS, ADDRESS, "100", "USD").await.unwrap();
    assert_eq!(paths.len(), 3);
    assert!(paths[0].source_amount.starts_with("172.58"));
    assert!(paths.windows(2).all(|w| w[0].quality >= w[1].quality));

    client.disconnect().await;
    client.disconnect().await;
    assert!(!client.network_info().connected);
    assert_eq!(client.network_info().status, ConnectionStatus::Disconnected);
}

#[tokio::test]
async fn simulated_submission_never_reaches_the_network() {
    let server = MockServer::start().await;
    answer(&server, "server_info", json!({ "status": "success" })).await;

    let client = client(&[&server]);
    let request = xrpl_access::models::PaymentRequest::new(ADDRESS, "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B", "1.5", "XRP");

    let result = client.submit_payment(&request).await.unwrap();
    assert_eq!(result.engine_result, "tesSUCCESS");
    assert_eq!(result.tx_json.amount, "1500000");

    let methods: Vec<String> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice::<Value>(&r.body).unwrap()["method"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(methods, vec!["server_info"]);
}
