use serde::{Deserialize, Serialize};

use crate::models::PathHop;

/// A payment the caller wants submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub source: String,
    pub destination: String,
    pub amount: String,
    pub currency: String,
    /// Path set: each inner list is one alternative route of hops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<Vec<PathHop>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_max: Option<String>,
}

impl PaymentRequest {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        amount: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            amount: amount.into(),
            currency: currency.into(),
            paths: None,
            send_max: None,
        }
    }

    pub fn with_paths(mut self, paths: Vec<Vec<PathHop>>) -> Self {
        self.paths = Some(paths);
        self
    }

    pub fn with_send_max(mut self, send_max: impl Into<String>) -> Self {
        self.send_max = Some(send_max.into());
        self
    }
}

/// Transaction skeleton echoed back with a submission result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionJson {
    pub transaction_type: String,
    pub account: String,
    pub destination: String,
    pub amount: String,
    pub fee: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<Vec<PathHop>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_max: Option<String>,
    #[serde(rename = "hash")]
    pub hash: String,
}

/// Outcome of a payment submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSubmissionResult {
    pub engine_result: String,
    pub engine_result_code: i32,
    pub engine_result_message: String,
    pub tx_json: TransactionJson,
}

impl PaymentSubmissionResult {
    pub fn is_success(&self) -> bool {
        self.engine_result == "tesSUCCESS"
    }

    pub fn hash(&self) -> &str {
        &self.tx_json.hash
    }
}
