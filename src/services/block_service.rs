use crate::config::settings::{BlockchainFeatures, BlockchainSettings};
use crate::errors::error::{AdapterError, ClientError, Result};
use crate::infrastructure::codec::{AddressCodec, TronAddressCodec};
use crate::infrastructure::parser::{ScannedTransaction, TransactionClassifier};
use crate::infrastructure::provider::{TransportFactory, TronClient, http_transport_factory};
use crate::models::domain::{Block, CanonicalTransaction};
use crate::services::adapter::BlockchainAdapter;
use crate::services::balance_service::BalanceReader;
use crate::services::currency_router::CurrencyBuckets;
use crate::utils::check::{is_invalid_contract_call, is_invalid_transfer};
use crate::{log_debug, log_info};
use arc_swap::ArcSwap;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Duration;

/// 一次 configure 产生的不可变快照；节点连接在快照内懒加载，
/// 因此不会被两套不同的配置共用。
struct ChainState {
    settings: BlockchainSettings,
    buckets: CurrencyBuckets,
    client: OnceCell<Arc<TronClient>>,
}

impl ChainState {
    fn new(settings: BlockchainSettings) -> Self {
        let buckets = CurrencyBuckets::classify(&settings.currencies);
        Self {
            settings,
            buckets,
            client: OnceCell::new(),
        }
    }
}

pub struct TronBlockchain {
    features: BlockchainFeatures,
    codec: Arc<dyn AddressCodec>,
    transport_factory: TransportFactory,
    state: ArcSwap<ChainState>,
}

impl Default for TronBlockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl TronBlockchain {
    pub fn new() -> Self {
        Self::with_transport_factory(http_transport_factory(Duration::from_secs(30)))
    }

    pub fn with_transport_factory(transport_factory: TransportFactory) -> Self {
        Self {
            features: BlockchainFeatures::default(),
            codec: Arc::new(TronAddressCodec),
            transport_factory,
            state: ArcSwap::from_pointee(ChainState::new(BlockchainSettings::default())),
        }
    }

    pub fn with_features(mut self, features: BlockchainFeatures) -> Self {
        self.features = features;
        self
    }

    fn client(&self, state: &ChainState) -> Result<Arc<TronClient>> {
        state
            .client
            .get_or_try_init(|| {
                let server = state.settings.server()?;
                let transport = (self.transport_factory)(server)?;
                Ok::<_, AdapterError>(Arc::new(TronClient::new(transport)))
            })
            .cloned()
    }

    /// 拉取单笔交易并归一化；不做扫块时的日志过滤，用于确认某笔提现的链上结果
    pub async fn fetch_transaction(&self, tx_id: &str) -> Result<Vec<CanonicalTransaction>> {
        let state = self.state.load_full();
        let client = self.client(&state)?;

        let Some(info) = client.get_transaction_info(tx_id).await? else {
            return Ok(vec![]);
        };
        let block_number = info.block_number.unwrap_or_default();
        let classifier = TransactionClassifier::new(&state.buckets, self.codec.as_ref());
        Ok(classifier.classify(&ScannedTransaction::Contract(info), block_number)?)
    }
}

#[async_trait]
impl BlockchainAdapter for TronBlockchain {
    fn configure(&self, settings: BlockchainSettings) {
        let state = ChainState::new(settings);
        log_info!(
            "扫块配置已更新: {} 个原生币, {} 个 TRC10, {} 个 TRC20",
            state.buckets.native.len(),
            state.buckets.trc10.len(),
            state.buckets.trc20.len()
        );
        self.state.store(Arc::new(state));
    }

    fn features(&self) -> BlockchainFeatures {
        self.features
    }

    async fn fetch_block(&self, block_number: u64) -> Result<Block> {
        let state = self.state.load_full();
        let client = self.client(&state)?;
        let classifier = TransactionClassifier::new(&state.buckets, self.codec.as_ref());

        let block = client.get_block_by_num(block_number).await?;
        let mut transactions = Vec::new();
        let mut skipped = 0usize;

        for tx in block.transactions {
            let scanned = if tx.contract_type().is_direct_transfer() {
                if is_invalid_transfer(&tx) {
                    skipped += 1;
                    continue;
                }
                ScannedTransaction::Transfer(tx)
            } else {
                match client.get_transaction_info(&tx.tx_id).await? {
                    Some(info) if !is_invalid_contract_call(&info) => {
                        ScannedTransaction::Contract(info)
                    }
                    _ => {
                        skipped += 1;
                        continue;
                    }
                }
            };
            transactions.extend(classifier.classify(&scanned, block_number)?);
        }

        log_debug!(
            "区块 {} 解析完成: {} 条记录，跳过交易 {} 笔",
            block_number,
            transactions.len(),
            skipped
        );
        Ok(Block::new(block_number, transactions))
    }

    async fn latest_block_number(&self) -> Result<u64> {
        let state = self.state.load_full();
        let client = self.client(&state)?;

        let latest = client.get_latest_blocks(1).await?;
        latest
            .block
            .first()
            .and_then(|b| b.block_header.as_ref())
            .map(|h| h.raw_data.number)
            .ok_or_else(|| {
                ClientError::MalformedResponse("getblockbylatestnum returned no block".into()).into()
            })
    }

    async fn load_balance_of_address(&self, address: &str, currency_id: &str) -> Result<BigDecimal> {
        let state = self.state.load_full();
        let currency = state
            .buckets
            .find(currency_id)
            .ok_or_else(|| AdapterError::UndefinedCurrency(currency_id.to_string()))?;

        let client = self.client(&state)?;
        BalanceReader::new(&client, self.codec.as_ref())
            .balance_of(address, &currency.kind, currency.config.base_factor)
            .await
    }
}
