use crate::errors::error::AdapterError;
use crate::models::domain::currency::CurrencyConfig;
use serde::{Deserialize, Serialize};

/// 扫块侧的适配器配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockchainSettings {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub currencies: Vec<CurrencyConfig>,
}

impl BlockchainSettings {
    pub fn new(server: &str, currencies: Vec<CurrencyConfig>) -> Self {
        Self {
            server: Some(server.to_string()),
            currencies,
        }
    }

    pub fn server(&self) -> Result<&str, AdapterError> {
        required(self.server.as_deref(), "server")
    }
}

/// 热钱包凭证
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletCredentials {
    #[serde(default)]
    pub uri: Option<String>,
    pub address: String,
    #[serde(default)]
    pub secret: String,
}

impl WalletCredentials {
    pub fn uri(&self) -> Result<&str, AdapterError> {
        required(self.uri.as_deref(), "uri")
    }
}

/// 钱包侧的适配器配置：一个钱包对应一个币种
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletSettings {
    #[serde(default)]
    pub wallet: Option<WalletCredentials>,
    #[serde(default)]
    pub currency: Option<CurrencyConfig>,
}

impl WalletSettings {
    pub fn new(wallet: WalletCredentials, currency: CurrencyConfig) -> Self {
        Self {
            wallet: Some(wallet),
            currency: Some(currency),
        }
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, AdapterError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AdapterError::missing(key))
}

/// 扫块侧能力标识（账本据此决定地址比较方式）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockchainFeatures {
    pub case_sensitive: bool,
    pub cash_addr_format: bool,
}

impl Default for BlockchainFeatures {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            cash_addr_format: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletFeatures {
    pub skip_deposit_collection: bool,
}
