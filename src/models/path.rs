use serde::{Deserialize, Serialize};

/// One intermediate hop: a currency held at an issuer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathHop {
    pub currency: String,
    pub issuer: String,
}

impl PathHop {
    pub fn new(currency: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            issuer: issuer.into(),
        }
    }
}

/// A candidate route for delivering `destination_amount`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathOption {
    pub id: String,
    pub paths: Vec<PathHop>,
    /// Native-asset amount to spend, six decimal places
    pub source_amount: String,
    pub destination_amount: String,
    pub rate: f64,
    pub network_fee: f64,
    /// Number of legs: intermediate hops + 1
    pub hop_count: u32,
    /// In [0, 1], higher is better
    pub quality: f64,
}

impl PathOption {
    /// Destination units received per source unit
    pub fn effective_rate(&self) -> Option<f64> {
        let source: f64 = self.source_amount.parse().ok()?;
        let destination: f64 = self.destination_amount.parse().ok()?;
        if source == 0.0 {
            return None;
        }
        Some(destination / source)
    }
}
