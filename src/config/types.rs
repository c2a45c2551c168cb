use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::config::tables::{IssuerTable, RateTable};
use crate::xrpl::NetworkMode;

/// Configuration for the ledger access layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Which endpoint set to use
    pub network: NetworkMode,
    /// Bound on one dispatched request, per endpoint
    pub request_timeout_ms: u64,
    /// Bound on one liveness check during connect
    pub health_check_timeout_ms: u64,
    /// Simulated latency of a payment submission
    pub submit_delay_ms: u64,
    /// Query the network for account info, balances and paths instead of synthesizing them
    pub live_lookups: bool,
    /// Refresh the rate table from a price feed at startup
    pub live_rates: bool,
    pub rates: RateTable,
    pub issuers: IssuerTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkMode::Test,
            request_timeout_ms: 10_000,
            health_check_timeout_ms: 5_000,
            submit_delay_ms: 2_000,
            live_lookups: false,
            live_rates: false,
            rates: RateTable::default(),
            issuers: IssuerTable::default(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn health_check_timeout(&self) -> Duration {
        Duration::from_millis(self.health_check_timeout_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }
}

/// Loads configuration from environment variables, falling back to default values
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    if let Ok(network) = env::var("XRPL_NETWORK") {
        config.network = network
            .parse()
            .map_err(|e| anyhow!("Invalid XRPL_NETWORK: {}", e))?;
    }

    override_from_env("XRPL_REQUEST_TIMEOUT_MS", &mut config.request_timeout_ms);
    override_from_env("XRPL_HEALTH_CHECK_TIMEOUT_MS", &mut config.health_check_timeout_ms);
    override_from_env("XRPL_SUBMIT_DELAY_MS", &mut config.submit_delay_ms);
    override_from_env("XRPL_LIVE_LOOKUPS", &mut config.live_lookups);
    override_from_env("XRPL_LIVE_RATES", &mut config.live_rates);

    Ok(config)
}

fn override_from_env<T: FromStr>(key: &str, target: &mut T) {
    if let Ok(raw) = env::var(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => *target = value,
            Err(_) => warn!("Ignoring unparsable {}={:?}", key, raw),
        }
    }
}
