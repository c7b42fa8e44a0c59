use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// 出账请求：宿主为每笔提现/归集创建，构建器按值接收并返回更新后的副本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub to_address: String,
    pub amount: BigDecimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TransactionOptions>,
}

impl TransactionRequest {
    pub fn new(to_address: &str, amount: BigDecimal) -> Self {
        Self {
            to_address: to_address.to_string(),
            amount,
            currency_id: None,
            hash: None,
            options: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_limit: Option<u64>,
}

/// `create_address` 的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedAddress {
    pub address: String,
    pub secret: String,
}
