//! Error types for ledger RPC access.
//!
//! [`RpcError`] covers everything that can go wrong between the client and an
//! endpoint. None of it is surfaced to end users: the domain operations in
//! [`crate::xrpl::XrplClient`] substitute synthesized data instead. The only
//! error a caller can observe is [`RequestError`], raised for malformed input.

use thiserror::Error;

/// Failure of a single RPC exchange or of a whole failover dispatch.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The round trip to one endpoint exceeded its deadline.
    #[error("request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    /// The HTTP exchange itself could not complete: DNS, connection refused,
    /// TLS, or a non-2xx status.
    #[error("endpoint {endpoint} unreachable: {reason}")]
    Unreachable { endpoint: String, reason: String },

    /// The endpoint answered but flagged an application-level error in the body.
    #[error("ledger error {code}: {message}")]
    ApplicationError { code: String, message: String },

    /// The body was not the JSON envelope the ledger API returns.
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    /// Every registered endpoint failed once within a single dispatch.
    #[error("all {attempts} endpoints failed, last error: {last}")]
    AllEndpointsFailed { attempts: usize, last: Box<RpcError> },
}

impl RpcError {
    /// Whether the failover dispatcher should move on to the next endpoint
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RpcError::AllEndpointsFailed { .. })
    }
}

/// Invalid caller input to a domain operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid amount: {value:?}")]
    InvalidAmount { value: String },
}
