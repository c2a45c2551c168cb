pub mod client;
pub mod command;
pub mod connection;
pub mod demo;
pub mod dispatcher;
pub mod endpoints;
pub mod error;
pub mod paths;
pub mod policy;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::XrplClient;
pub use command::{RpcCommand, RpcResponse};
pub use connection::ConnectionManager;
pub use dispatcher::FailoverDispatcher;
pub use endpoints::{list_endpoints, Endpoint, NetworkMode};
pub use error::{RequestError, RpcError};
pub use policy::{LookupPolicy, OperationPolicies};
pub use session::ClientSession;
pub use transport::{HttpTransport, Transport};

use log::info;

use crate::config::{Config, RateTable};
use crate::rates::RateFeed;

/// Create a ledger client from the application configuration
pub fn create_client_from_config(config: &Config) -> XrplClient {
    info!(
        "Using {} network with {} endpoints",
        config.network,
        list_endpoints(config.network).len()
    );
    XrplClient::new(config)
}

/// Like [`create_client_from_config`], refreshing the path-finding rate table
/// from the price feed first when `live_rates` is set
pub async fn create_client_with_rates(config: &Config, feed: &RateFeed) -> XrplClient {
    if !config.live_rates {
        return create_client_from_config(config);
    }

    let mut config = config.clone();
    config.rates = RateTable::from(feed.fetch().await);
    create_client_from_config(&config)
}
