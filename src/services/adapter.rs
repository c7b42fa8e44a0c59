use crate::config::settings::{BlockchainFeatures, BlockchainSettings, WalletFeatures, WalletSettings};
use crate::errors::error::Result;
use crate::models::domain::{Block, CurrencyConfig, GeneratedAddress, TransactionOptions, TransactionRequest};
use async_trait::async_trait;
use bigdecimal::BigDecimal;

/// 宿主（账本）侧使用的扫块接口
#[async_trait]
pub trait BlockchainAdapter: Send + Sync {
    /// 替换配置并丢弃缓存的节点连接
    fn configure(&self, settings: BlockchainSettings);

    fn features(&self) -> BlockchainFeatures;

    async fn fetch_block(&self, block_number: u64) -> Result<Block>;

    async fn latest_block_number(&self) -> Result<u64>;

    async fn load_balance_of_address(&self, address: &str, currency_id: &str) -> Result<BigDecimal>;
}

/// 宿主（账本）侧使用的钱包接口
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn configure(&self, settings: WalletSettings) -> Result<()>;

    fn features(&self) -> WalletFeatures;

    async fn create_address(&self) -> Result<GeneratedAddress>;

    async fn create_transaction(
        &self,
        request: TransactionRequest,
        options: TransactionOptions,
    ) -> Result<TransactionRequest>;

    async fn prepare_deposit_collection(
        &self,
        request: TransactionRequest,
        deposit_spread: &[TransactionRequest],
        deposit_currency: &CurrencyConfig,
    ) -> Result<Vec<TransactionRequest>>;

    async fn load_balance(&self) -> Result<BigDecimal>;
}
