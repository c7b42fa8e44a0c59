use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::config::config::ScannerConfig;
use crate::errors::error::Result;
use crate::infrastructure::provider::{
    HttpTransport, RetryAdapter, TransportFactory, TronTransport, http_transport_factory,
};
use crate::services::{BlockchainAdapter, TronBlockchain, TronWallet, WalletAdapter};
use crate::{log_error, log_info, log_warn};

/// 宿主进程：持有适配器实例，按确认数跟随链头扫块（无 HTTP API）
pub struct Application {
    pub blockchain: Arc<TronBlockchain>,
    pub wallet: Option<Arc<TronWallet>>,
    scanner: ScannerConfig,
}

/// 扫块用：HTTP 传输外面包一层重试，重试策略只在宿主这一层
fn retrying_transport_factory(config: &AppConfig) -> TransportFactory {
    let timeout = Duration::from_secs(config.server.timeout_secs);
    let max_retries = config.server.max_retries;
    let base_delay = Duration::from_secs(config.server.base_delay_secs);

    Arc::new(move |uri: &str| {
        let http = Arc::new(HttpTransport::with_timeout(uri, timeout)?);
        Ok(Arc::new(RetryAdapter::new(http, max_retries, base_delay)) as Arc<dyn TronTransport>)
    })
}

impl Application {
    pub async fn build(config: AppConfig) -> Result<Self> {
        let blockchain = Arc::new(TronBlockchain::with_transport_factory(
            retrying_transport_factory(&config),
        ));
        blockchain.configure(config.blockchain_settings());
        log_info!(
            "节点 {} 已配置，{} 个币种",
            config.server.uri,
            config.currencies.len()
        );

        let wallet = match config.wallet_settings() {
            Some(settings) => {
                // 出账不重试，失败交给宿主对账后再决定
                let factory = http_transport_factory(Duration::from_secs(config.server.timeout_secs));
                let wallet = Arc::new(TronWallet::with_transport_factory(factory));
                wallet.configure(settings)?;
                match wallet.load_balance().await {
                    Ok(balance) => log_info!("热钱包余额: {}", balance),
                    Err(e) => log_warn!("读取热钱包余额失败: {}", e),
                }
                Some(wallet)
            }
            None => None,
        };

        Ok(Self {
            blockchain,
            wallet,
            scanner: config.scanner,
        })
    }

    /// 扫到 `链头 - confirmations` 为止，追上后按 poll_interval 轮询
    pub async fn run(self) -> anyhow::Result<()> {
        let poll_interval = Duration::from_secs(self.scanner.poll_interval_secs);
        let mut next = self.scanner.init_height;

        log_info!("✔️ 开始扫块，起始高度 {}", next);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    log_info!("⚠️  Received shutdown signal, exiting...");
                    return Ok(());
                }
                advanced = self.scan_available(&mut next) => {
                    if !advanced {
                        tokio::time::sleep(poll_interval).await;
                    }
                }
            }
        }
    }

    /// 处理所有已确认的区块；没有新进度时返回 false
    async fn scan_available(&self, next: &mut u64) -> bool {
        let tip = match self.blockchain.latest_block_number().await {
            Ok(tip) => tip,
            Err(e) => {
                log_error!("获取最新区块失败: {}", e);
                return false;
            }
        };
        let Some(target) = tip.checked_sub(self.scanner.confirmations) else {
            return false;
        };
        let start = *next;

        while *next <= target {
            match self.blockchain.fetch_block(*next).await {
                Ok(block) => {
                    for tx in &block.transactions {
                        log_info!(
                            "[{}] {} {} → {:?} 金额 {:?} ({:?})",
                            block.number,
                            tx.currency_id,
                            tx.hash,
                            tx.to_address,
                            tx.amount,
                            tx.status
                        );
                    }
                    *next += 1;
                }
                Err(e) => {
                    log_error!("解析区块 {} 失败: {}", *next, e);
                    return *next > start;
                }
            }
        }
        *next > start
    }
}
