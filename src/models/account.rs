use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized read model of a ledger account root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: String,
    /// Balance in drops, as the ledger reports it
    pub balance: String,
    pub sequence: u64,
    pub flags: u64,
    pub owner_count: u64,
    pub previous_txn_id: String,
    pub previous_txn_lgr_seq: u64,
    pub ledger_current_index: u64,
    pub validated: bool,
}

impl AccountInfo {
    /// Build from an `account_info` result object. Returns `None` when
    /// `account_data` or its required fields are missing.
    pub fn from_ledger_result(result: &Value) -> Option<Self> {
        let data = result.get("account_data")?;

        let ledger_current_index = result
            .get("ledger_current_index")
            .or_else(|| result.get("ledger_index"))
            .and_then(Value::as_u64)
            .unwrap_or(0);

        Some(Self {
            address: data.get("Account")?.as_str()?.to_string(),
            balance: data.get("Balance")?.as_str()?.to_string(),
            sequence: data.get("Sequence")?.as_u64()?,
            flags: data.get("Flags").and_then(Value::as_u64).unwrap_or(0),
            owner_count: data.get("OwnerCount").and_then(Value::as_u64).unwrap_or(0),
            previous_txn_id: data
                .get("PreviousTxnID")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            previous_txn_lgr_seq: data.get("PreviousTxnLgrSeq").and_then(Value::as_u64).unwrap_or(0),
            ledger_current_index,
            validated: result.get("validated").and_then(Value::as_bool).unwrap_or(false),
        })
    }

    /// Balance in drops, if it parses
    pub fn balance_drops(&self) -> Option<u64> {
        self.balance.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_account_info_result() {
        let result = json!({
            "account_data": {
                "Account": "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH",
                "Balance": "99999988",
                "Flags": 1048576,
                "LedgerEntryType": "AccountRoot",
                "OwnerCount": 2,
                "PreviousTxnID": "ABCD",
                "PreviousTxnLgrSeq": 91,
                "Sequence": 7
            },
            "ledger_index": 1234,
            "validated": true
        });

        let info = AccountInfo::from_ledger_result(&result).unwrap();
        assert_eq!(info.address, "rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH");
        assert_eq!(info.balance_drops(), Some(99_999_988));
        assert_eq!(info.sequence, 7);
        assert_eq!(info.flags, 1_048_576);
        assert_eq!(info.owner_count, 2);
        assert_eq!(info.ledger_current_index, 1234);
        assert!(info.validated);
    }

    #[test]
    fn missing_account_data_is_none() {
        assert!(AccountInfo::from_ledger_result(&json!({ "status": "success" })).is_none());
        assert!(AccountInfo::from_ledger_result(&json!({ "account_data": { "Account": "r" } })).is_none());
    }
}
