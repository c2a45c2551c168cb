use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAINNET_ENDPOINTS: &[&str] = &[
    "https://xrplcluster.com/",
    "https://s1.ripple.com:51234/",
    "https://s2.ripple.com:51234/",
];

const TESTNET_ENDPOINTS: &[&str] = &[
    "https://s.altnet.rippletest.net:51234/",
    "https://testnet.xrpl-labs.com/",
];

/// Which ledger network the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    Main,
    #[default]
    Test,
}

impl NetworkMode {
    /// Lowercase network name, as accepted by `XRPL_NETWORK`
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkMode::Main => "main",
            NetworkMode::Test => "test",
        }
    }

    /// True for the test network
    pub fn is_test(&self) -> bool {
        matches!(self, NetworkMode::Test)
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" | "mainnet" | "production" => Ok(NetworkMode::Main),
            "test" | "testnet" => Ok(NetworkMode::Test),
            other => Err(format!("unknown network mode: {}", other)),
        }
    }
}

/// A JSON-RPC server URL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    /// Wrap a server URL; it is used verbatim as the POST target
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The server URL
    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered endpoints for `mode`, primary first
pub fn list_endpoints(mode: NetworkMode) -> Vec<Endpoint> {
    let urls = match mode {
        NetworkMode::Main => MAINNET_ENDPOINTS,
        NetworkMode::Test => TESTNET_ENDPOINTS,
    };

    urls.iter().map(|url| Endpoint::new(*url)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_a_stable_non_empty_list() {
        for mode in [NetworkMode::Main, NetworkMode::Test] {
            let first = list_endpoints(mode);
            assert!(!first.is_empty());
            assert_eq!(first, list_endpoints(mode));
        }
    }

    #[test]
    fn primary_endpoint_comes_first() {
        assert_eq!(list_endpoints(NetworkMode::Main)[0].url(), "https://xrplcluster.com/");
        assert_eq!(list_endpoints(NetworkMode::Test)[0].url(), "https://s.altnet.rippletest.net:51234/");
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("mainnet".parse::<NetworkMode>().unwrap(), NetworkMode::Main);
        assert_eq!(" TEST ".parse::<NetworkMode>().unwrap(), NetworkMode::Test);
        assert!("devnet".parse::<NetworkMode>().is_err());
    }
}
