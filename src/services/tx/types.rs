// services/tx/types.rs

use serde_json::Value;

/// 签名器返回的已签名交易，原样交给 broadcasttransaction
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub tx_id: String,
    pub payload: Value,
}

impl SignedTransaction {
    /// 从节点返回的交易 JSON 中取出 txID
    pub fn from_payload(payload: Value) -> Option<Self> {
        let tx_id = payload
            .get("txID")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())?
            .to_string();
        Some(Self { tx_id, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requires_a_transaction_id() {
        let signed = SignedTransaction::from_payload(json!({ "txID": "ab", "signature": ["00"] })).unwrap();
        assert_eq!(signed.tx_id, "ab");
        assert!(SignedTransaction::from_payload(json!({ "txID": "" })).is_none());
        assert!(SignedTransaction::from_payload(json!({})).is_none());
    }
}
