use crate::config::settings::{BlockchainSettings, WalletSettings};
use crate::models::domain::currency::CurrencyConfig;
use config::{ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub currencies: Vec<CurrencyConfig>,
    #[serde(default)]
    pub wallet: Option<WalletSettings>,
}

/// 节点连接配置
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub uri: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScannerConfig {
    /// 本地无进度时从这个高度开始
    pub init_height: u64,
    /// 落后链头的确认数
    pub confirmations: u64,
    pub poll_interval_secs: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            init_height: 0,
            confirmations: 19,
            poll_interval_secs: 3,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_base_delay_secs() -> u64 {
    1
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(Environment::with_prefix("TRON").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn blockchain_settings(&self) -> BlockchainSettings {
        BlockchainSettings::new(&self.server.uri, self.currencies.clone())
    }

    /// 钱包未单独配置 uri 时沿用节点地址
    pub fn wallet_settings(&self) -> Option<WalletSettings> {
        self.wallet.clone().map(|mut settings| {
            if let Some(wallet) = settings.wallet.as_mut() {
                if wallet.uri.is_none() {
                    wallet.uri = Some(self.server.uri.clone());
                }
            }
            settings
        })
    }
}
