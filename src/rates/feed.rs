use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const COINGECKO_URL: &str = "https://api.coingecko.com/api/v3/simple/price?ids=ripple&vs_currencies=usd,krw";
const COINBASE_URL: &str = "https://api.coinbase.com/v2/exchange-rates?currency=XRP";
const SOURCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Spot quotes for the native asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub xrp_to_usd: f64,
    pub xrp_to_krw: f64,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            xrp_to_usd: 0.58,
            xrp_to_krw: 754.0,
        }
    }
}

/// Fetches spot quotes from public price APIs, primary first
pub struct RateFeed {
    client: reqwest::Client,
    primary_url: String,
    secondary_url: String,
    timeout: Duration,
}

impl Default for RateFeed {
    fn default() -> Self {
        Self::new(COINGECKO_URL, COINBASE_URL)
    }
}

impl RateFeed {
    pub fn new(primary_url: impl Into<String>, secondary_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            primary_url: primary_url.into(),
            secondary_url: secondary_url.into(),
            timeout: SOURCE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Current quotes. Never fails: falls back to the secondary source, then
    /// to the built-in defaults.
    pub async fn fetch(&self) -> ExchangeRates {
        match self.fetch_primary().await {
            Ok(rates) => {
                info!("Fetched exchange rates from primary source: {:?}", rates);
                return rates;
            }
            Err(e) => warn!("Failed to fetch exchange rates from primary source: {:#}", e),
        }

        match self.fetch_secondary().await {
            Ok(rates) => {
                info!("Fetched exchange rates from secondary source: {:?}", rates);
                return rates;
            }
            Err(e) => warn!("Failed to fetch exchange rates from secondary source: {:#}", e),
        }

        let rates = ExchangeRates::default();
        warn!("Using default exchange rates: {:?}", rates);
        rates
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        if !resp.status().is_success() {
            return Err(anyhow!("HTTP {}", resp.status()));
        }

        resp.json().await.context("Invalid JSON body")
    }

    // { "ripple": { "usd": 0.5, "krw": 700 } }
    async fn fetch_primary(&self) -> Result<ExchangeRates> {
        let body = self.get_json(&self.primary_url).await?;
        let quote = body.get("ripple").context("Missing ripple quote")?;

        Ok(ExchangeRates {
            xrp_to_usd: quote.get("usd").and_then(Value::as_f64).context("Missing usd quote")?,
            xrp_to_krw: quote.get("krw").and_then(Value::as_f64).context("Missing krw quote")?,
        })
    }

    // { "data": { "rates": { "USD": "0.5", "KRW": "700" } } }
    async fn fetch_secondary(&self) -> Result<ExchangeRates> {
        let body = self.get_json(&self.secondary_url).await?;
        let rates = body
            .pointer("/data/rates")
            .context("Missing data.rates")?;

        Ok(ExchangeRates {
            xrp_to_usd: quoted_number(rates, "USD")?,
            xrp_to_krw: quoted_number(rates, "KRW")?,
        })
    }
}

fn quoted_number(rates: &Value, currency: &str) -> Result<f64> {
    let raw = rates
        .get(currency)
        .with_context(|| format!("Missing {} rate", currency))?;

    let value = match raw {
        Value::String(s) => s.parse::<f64>().with_context(|| format!("Invalid {} rate {:?}", currency, s))?,
        other => other.as_f64().with_context(|| format!("Invalid {} rate", currency))?,
    };

    if !value.is_finite() || value <= 0.0 {
        return Err(anyhow!("Non-positive {} rate", currency));
    }

    Ok(value)
}
