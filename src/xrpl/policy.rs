use serde::{Deserialize, Serialize};

/// How a domain operation treats the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Answer from synthesized data; never dispatch
    Synthesized,
    /// Dispatch, and substitute synthesized data on any failure
    LiveWithFallback,
}

/// Per-operation policy table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationPolicies {
    pub account_info: LookupPolicy,
    pub account_balance: LookupPolicy,
    pub payment_paths: LookupPolicy,
    pub transaction_history: LookupPolicy,
}

impl Default for OperationPolicies {
    // Only history is tried live by default
    fn default() -> Self {
        Self {
            account_info: LookupPolicy::Synthesized,
            account_balance: LookupPolicy::Synthesized,
            payment_paths: LookupPolicy::Synthesized,
            transaction_history: LookupPolicy::LiveWithFallback,
        }
    }
}

impl OperationPolicies {
    /// Every lookup goes to the network first
    pub fn live() -> Self {
        Self {
            account_info: LookupPolicy::LiveWithFallback,
            account_balance: LookupPolicy::LiveWithFallback,
            payment_paths: LookupPolicy::LiveWithFallback,
            transaction_history: LookupPolicy::LiveWithFallback,
        }
    }

    pub fn from_live_lookups(live_lookups: bool) -> Self {
        if live_lookups {
            Self::live()
        } else {
            Self::default()
        }
    }
}
