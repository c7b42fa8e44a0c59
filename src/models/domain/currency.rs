use serde::{Deserialize, Serialize};

/// 原生币的默认币种代码
pub const NATIVE_CURRENCY_ID: &str = "trx";

/// 账本侧的币种配置（只读）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub id: String,
    pub base_factor: u64,
    #[serde(default)]
    pub options: CurrencyOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trc10_token_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trc20_contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_limit: Option<u64>,
}

/// 币种类型：配置阶段一次性解析，之后不再反复检查 options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyKind {
    NativeCoin,
    Trc10(String),
    Trc20(String),
}

impl CurrencyConfig {
    pub fn new(id: &str, base_factor: u64) -> Self {
        Self {
            id: id.to_string(),
            base_factor,
            options: CurrencyOptions::default(),
        }
    }

    pub fn trc10(id: &str, base_factor: u64, token_id: &str) -> Self {
        let mut currency = Self::new(id, base_factor);
        currency.options.trc10_token_id = Some(token_id.to_string());
        currency
    }

    pub fn trc20(id: &str, base_factor: u64, contract_address: &str) -> Self {
        let mut currency = Self::new(id, base_factor);
        currency.options.trc20_contract_address = Some(contract_address.to_string());
        currency
    }

    /// 优先级 trc10 > trc20 > native；空字符串视为未配置
    pub fn kind(&self) -> CurrencyKind {
        if let Some(token_id) = present(&self.options.trc10_token_id) {
            CurrencyKind::Trc10(token_id.to_string())
        } else if let Some(contract) = present(&self.options.trc20_contract_address) {
            CurrencyKind::Trc20(contract.to_string())
        } else {
            CurrencyKind::NativeCoin
        }
    }

    pub fn is_native(&self) -> bool {
        self.kind() == CurrencyKind::NativeCoin
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
