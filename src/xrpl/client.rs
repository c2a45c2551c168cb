use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, IssuerTable, RateTable};
use crate::models::{AccountInfo, NetworkInfo, PathOption, PaymentRequest, PaymentSubmissionResult};
use crate::utils::{drops_to_xrp, format_address, is_valid_address, parse_amount, parse_drops};
use crate::xrpl::command::RpcCommand;
use crate::xrpl::connection::ConnectionManager;
use crate::xrpl::demo;
use crate::xrpl::dispatcher::FailoverDispatcher;
use crate::xrpl::endpoints::{list_endpoints, Endpoint, NetworkMode};
use crate::xrpl::error::{RequestError, RpcError};
use crate::xrpl::paths;
use crate::xrpl::policy::{LookupPolicy, OperationPolicies};
use crate::xrpl::session::ClientSession;
use crate::xrpl::transport::{HttpTransport, Transport};

/// Ledger access for wallet flows.
///
/// Every operation connects on first use and none of them surface network
/// errors: per [`OperationPolicies`], an operation either answers from
/// synthesized data or tries the network and falls back to it.
pub struct XrplClient {
    mode: NetworkMode,
    endpoints: Arc<[Endpoint]>,
    session: Arc<ClientSession>,
    dispatcher: FailoverDispatcher,
    connection: ConnectionManager,
    policies: OperationPolicies,
    rates: RateTable,
    issuers: IssuerTable,
    submit_delay: Duration,
}

impl XrplClient {
    /// Client over HTTP against the registered endpoints for `config.network`
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, list_endpoints(config.network), Arc::new(HttpTransport::new()))
    }

    /// Client over an explicit endpoint list and transport
    pub fn with_transport(config: &Config, endpoints: Vec<Endpoint>, transport: Arc<dyn Transport>) -> Self {
        let endpoints: Arc<[Endpoint]> = endpoints.into();
        let session = Arc::new(ClientSession::new());

        let dispatcher = FailoverDispatcher::new(
            endpoints.clone(),
            transport.clone(),
            session.clone(),
            config.request_timeout(),
        );
        let connection = ConnectionManager::new(endpoints.clone(), transport, session.clone(), config.health_check_timeout());

        Self {
            mode: config.network,
            endpoints,
            session,
            dispatcher,
            connection,
            policies: OperationPolicies::from_live_lookups(config.live_lookups),
            rates: config.rates.clone(),
            issuers: config.issuers.clone(),
            submit_delay: config.submit_delay(),
        }
    }

    pub fn with_policies(mut self, policies: OperationPolicies) -> Self {
        self.policies = policies;
        self
    }

    pub fn policies(&self) -> &OperationPolicies {
        &self.policies
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    /// Rate table used to quote synthesized paths
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Check endpoints with `server_info` and settle on live or demo mode.
    ///
    /// Never fails: when no endpoint answers the client is still connected,
    /// in demo mode.
    pub async fn connect(&self) {
        self.connection.connect().await;
    }

    /// Drop the connection state; safe to call more than once
    pub async fn disconnect(&self) {
        self.connection.disconnect().await;
    }

    /// Snapshot of the network, active endpoint and connection status
    pub fn network_info(&self) -> NetworkInfo {
        let endpoint_url = self
            .endpoints
            .get(self.session.active_endpoint())
            .or_else(|| self.endpoints.first())
            .map(|e| e.url().to_string())
            .unwrap_or_default();

        NetworkInfo {
            endpoint_url,
            is_test_mode: self.mode.is_test(),
            connected: self.session.is_connected(),
            mode: self.mode,
            status: self.connection.status(),
        }
    }

    /// Dispatch a raw command with failover
    pub async fn request(&self, command: &RpcCommand) -> Result<Value, RpcError> {
        self.connection.ensure_connected().await;
        let response = self.dispatcher.dispatch(command).await?;
        Ok(response.result)
    }

    /// Account state for `address`, synthesized when the lookup is not live or fails
    pub async fn account_info(&self, address: &str) -> AccountInfo {
        self.connection.ensure_connected().await;

        if self.policies.account_info == LookupPolicy::LiveWithFallback {
            match self.live_account_info(address).await {
                Ok(info) => return info,
                Err(e) => warn!("Account info lookup for {} failed, using demo data: {}", format_address(address), e),
            }
        } else {
            info!("Using demo account info for {}", format_address(address));
        }

        demo::account_info(address)
    }

    /// Balance in XRP
    pub async fn account_balance(&self, address: &str) -> f64 {
        self.connection.ensure_connected().await;

        if self.policies.account_balance == LookupPolicy::LiveWithFallback {
            let live = self
                .live_account_info(address)
                .await
                .map(|info| info.balance_drops().map(drops_to_xrp));
            match live {
                Ok(Some(balance)) => return balance,
                Ok(None) => warn!("Unparsable balance for {}, using demo balance", format_address(address)),
                Err(e) => warn!("Balance lookup for {} failed, using demo balance: {}", format_address(address), e),
            }
        } else {
            info!("Using demo balance {} for {}", demo::DEMO_BALANCE, format_address(address));
        }

        demo::DEMO_BALANCE
    }

    /// Candidate routes for delivering `destination_amount`, best first
    pub async fn find_payment_paths(
        &self,
        source: &str,
        destination: &str,
        destination_amount: &str,
        destination_currency: &str,
    ) -> Result<Vec<PathOption>, RequestError> {
        let amount = parse_amount(destination_amount)?;
        let destination_param = paths::destination_amount_param(destination_amount, destination_currency, &self.issuers)?;
        self.connection.ensure_connected().await;

        if self.policies.payment_paths == LookupPolicy::LiveWithFallback {
            let command = RpcCommand::new("ripple_path_find")
                .param("source_account", source)
                .param("destination_account", destination)
                .param("destination_amount", destination_param);

            match self.dispatcher.dispatch(&command).await {
                Ok(response) => match paths::paths_from_ledger(&response.result, destination_amount) {
                    Some(options) => return Ok(options),
                    None => warn!("No usable paths from the ledger, using demo paths"),
                },
                Err(e) => warn!("Path finding failed, using demo paths: {}", e),
            }
        } else {
            info!(
                "Using demo payment paths {} -> {} for {} {}",
                format_address(source),
                format_address(destination),
                destination_amount,
                destination_currency
            );
        }

        Ok(paths::synthesize_paths(
            destination_amount,
            amount,
            destination_currency,
            &self.rates,
            &self.issuers,
        ))
    }

    /// Raw transactions for `address`, newest first; empty on any failure
    pub async fn transaction_history(&self, address: &str, limit: u32) -> Vec<Value> {
        self.connection.ensure_connected().await;

        if self.policies.transaction_history == LookupPolicy::Synthesized {
            return Vec::new();
        }

        let command = RpcCommand::new("account_tx")
            .param("account", address)
            .param("limit", limit)
            .param("ledger_index_min", -1)
            .param("ledger_index_max", -1);

        match self.dispatcher.dispatch(&command).await {
            Ok(response) => response
                .result
                .get("transactions")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            Err(e) => {
                warn!("Failed to get transaction history for {}: {}", format_address(address), e);
                Vec::new()
            }
        }
    }

    /// Simulate submitting `request`: waits the configured delay and reports
    /// success with a fresh hash. Nothing is sent to the network.
    pub async fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentSubmissionResult, RequestError> {
        let amount = if request.currency == paths::NATIVE_CURRENCY {
            parse_drops(&request.amount)?.to_string()
        } else {
            parse_amount(&request.amount)?;
            request.amount.clone()
        };
        if let Some(send_max) = &request.send_max {
            parse_amount(send_max)?;
        }
        self.connection.ensure_connected().await;

        info!(
            "Simulating payment of {} {} from {} to {}",
            request.amount,
            request.currency,
            format_address(&request.source),
            format_address(&request.destination)
        );

        tokio::time::sleep(self.submit_delay).await;

        let result = demo::payment_result(request, amount);
        debug!("Simulated payment hash {}", result.hash());
        Ok(result)
    }

    pub fn is_valid_address(&self, address: &str) -> bool {
        is_valid_address(address)
    }

    async fn live_account_info(&self, address: &str) -> Result<AccountInfo, RpcError> {
        let command = RpcCommand::new("account_info")
            .param("account", address)
            .param("ledger_index", "validated");

        let response = self.dispatcher.dispatch(&command).await?;
        AccountInfo::from_ledger_result(&response.result).ok_or_else(|| RpcError::MalformedResponse {
            endpoint: self.network_info().endpoint_url,
            reason: "account_info result without account_data".to_string(),
        })
    }
}
