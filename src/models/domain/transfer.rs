use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            TransactionStatus::Success
        } else {
            TransactionStatus::Failed
        }
    }
}

/// 归一化后的转账记录，每个匹配币种一条
///
/// `txout` 是日志在交易回执中的下标，用来区分同一笔交易里的多次 token 转账；
/// 原生币/TRC10 每笔交易最多一次转账，固定为 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTransaction {
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_address: Option<String>,
    pub txout: u64,
    pub block_number: u64,
    pub currency_id: String,
    pub status: TransactionStatus,
}

impl CanonicalTransaction {
    pub fn transfer(
        hash: String,
        amount: BigDecimal,
        to_address: String,
        txout: u64,
        block_number: u64,
        currency_id: String,
        status: TransactionStatus,
    ) -> Self {
        Self {
            hash,
            amount: Some(amount),
            to_address: Some(to_address),
            txout,
            block_number,
            currency_id,
            status,
        }
    }

    /// 链上失败、金额未知的提现记录
    pub fn failure(hash: String, block_number: u64, currency_id: String) -> Self {
        Self {
            hash,
            amount: None,
            to_address: None,
            txout: 0,
            block_number,
            currency_id,
            status: TransactionStatus::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TransactionStatus::Success
    }
}
