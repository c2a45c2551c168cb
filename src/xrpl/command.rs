use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::xrpl::error::RpcError;

/// A ledger API method plus its parameter object.
///
/// The request id is not part of the command; the dispatcher stamps one on
/// every transmission so ids are never reused across retries.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcCommand {
    method: String,
    params: Map<String, Value>,
}

impl RpcCommand {
    /// Command for `method` with no parameters
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Map::new(),
        }
    }

    /// Add a parameter (builder style)
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Ledger API method name, e.g. `account_info`
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Parameters added so far, without the request id
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Wire body: `{ "method": .., "params": [ { ..fields, "id": id } ] }`
    pub fn to_request_body(&self, id: u64) -> Value {
        let mut params = self.params.clone();
        params.insert("id".to_string(), json!(id));

        json!({
            "method": self.method,
            "params": [Value::Object(params)],
        })
    }
}

/// The JSON envelope returned by a ledger endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RpcResponse {
    /// The application-level error embedded in the body, if any.
    ///
    /// Checked at the top level first, then inside `result`; either one makes
    /// the exchange a failure even though HTTP succeeded.
    pub fn application_error(&self) -> Option<RpcError> {
        if let Some(code) = &self.error {
            let message = self.error_message.clone().unwrap_or_else(|| code.clone());
            return Some(RpcError::ApplicationError { code: code.clone(), message });
        }

        let code = self.result.get("error")?;
        let code = match code {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let message = self
            .result
            .get("error_message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| code.clone());

        Some(RpcError::ApplicationError { code, message })
    }
}
