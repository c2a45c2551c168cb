//! Synthesized responses used when a lookup is not (or cannot be) answered by
//! the network.

use chrono::Utc;

use crate::models::{AccountInfo, PaymentRequest, PaymentSubmissionResult, TransactionJson};

/// Balance reported for every account in demo mode, in XRP
pub const DEMO_BALANCE: f64 = 1250.32;

const DEMO_BALANCE_DROPS: u64 = 1_250_320_000;

/// Fee of a simulated payment, in drops
pub const DEMO_FEE_DROPS: &str = "12";

const PLACEHOLDER_HASH: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub fn account_info(address: &str) -> AccountInfo {
    AccountInfo {
        address: address.to_string(),
        balance: DEMO_BALANCE_DROPS.to_string(),
        sequence: 1,
        flags: 0,
        owner_count: 0,
        previous_txn_id: PLACEHOLDER_HASH.to_string(),
        previous_txn_lgr_seq: 0,
        ledger_current_index: 0,
        validated: true,
    }
}

/// A successful submission echoing `request`. `amount` is the delivered
/// amount as it goes on the wire: drops for XRP, the decimal string otherwise.
pub fn payment_result(request: &PaymentRequest, amount: String) -> PaymentSubmissionResult {
    PaymentSubmissionResult {
        engine_result: "tesSUCCESS".to_string(),
        engine_result_code: 0,
        engine_result_message: "The transaction was applied. Only final in a validated ledger.".to_string(),
        tx_json: TransactionJson {
            transaction_type: "Payment".to_string(),
            account: request.source.clone(),
            destination: request.destination.clone(),
            amount,
            fee: DEMO_FEE_DROPS.to_string(),
            paths: request.paths.clone(),
            send_max: request.send_max.clone(),
            hash: transaction_hash(),
        },
    }
}

/// 64 uppercase hex characters: millisecond timestamp, then random fill
pub fn transaction_hash() -> String {
    let mut hash = format!("{:016X}", Utc::now().timestamp_millis());
    while hash.len() < 64 {
        hash.push_str(&format!("{:016X}", fastrand::u64(..)));
    }
    hash.truncate(64);
    hash
}
