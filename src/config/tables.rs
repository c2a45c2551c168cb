use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rates::ExchangeRates;

/// Destination-currency units per unit of the native asset, used to quote
/// synthesized paths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub rates: BTreeMap<String, f64>,
    /// Rate for currencies missing from `rates`
    pub default_rate: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::from(ExchangeRates::default())
    }
}

impl RateTable {
    pub fn rate_for(&self, currency: &str) -> f64 {
        self.rates.get(currency).copied().unwrap_or(self.default_rate)
    }
}

impl From<ExchangeRates> for RateTable {
    fn from(quotes: ExchangeRates) -> Self {
        let rates = BTreeMap::from([
            ("USD".to_string(), quotes.xrp_to_usd),
            ("KRW".to_string(), quotes.xrp_to_krw),
        ]);

        Self {
            rates,
            default_rate: quotes.xrp_to_usd,
        }
    }
}

/// Well-known issuing gateways per currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerTable {
    pub issuers: BTreeMap<String, String>,
    /// Currency whose issuer stands in for unknown currencies
    pub fallback_currency: String,
}

impl Default for IssuerTable {
    fn default() -> Self {
        let issuers = [
            ("USD", "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B"), // Bitstamp
            ("EUR", "rLEsXccBGNR3UPuPu2hUXPjziKC3qKSBun"), // Gatehub
            ("BTC", "rchGBxcD1A1C2tdxF6papQYZ8kjRKMYcL"), // Gatehub
            ("ETH", "rcA8X3TVMST1n3CJeAdGk1RdRCHii7N2h"), // Gatehub
        ]
        .into_iter()
        .map(|(currency, issuer)| (currency.to_string(), issuer.to_string()))
        .collect();

        Self {
            issuers,
            fallback_currency: "USD".to_string(),
        }
    }
}

impl IssuerTable {
    pub fn knows(&self, currency: &str) -> bool {
        self.issuers.contains_key(currency)
    }

    /// Issuer for `currency`, or the fallback currency's issuer
    pub fn issuer_for(&self, currency: &str) -> &str {
        self.issuers
            .get(currency)
            .or_else(|| self.issuers.get(&self.fallback_currency))
            .map(String::as_str)
            .unwrap_or_default()
    }
}
