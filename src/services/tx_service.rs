// services/tx_service.rs
use crate::config::settings::{WalletCredentials, WalletFeatures, WalletSettings};
use crate::errors::error::{AdapterError, ClientError, Result};
use crate::infrastructure::codec::{AddressCodec, TronAddressCodec, strip_address_prefix};
use crate::infrastructure::provider::{TransportFactory, TronClient, http_transport_factory};
use crate::models::domain::{
    CurrencyConfig, CurrencyKind, GeneratedAddress, NATIVE_CURRENCY_ID, TransactionOptions,
    TransactionRequest,
};
use crate::services::adapter::WalletAdapter;
use crate::services::balance_service::BalanceReader;
use crate::services::tx::fee::{collection_fee, fee_limit};
use crate::services::tx::signer::{NodeSigner, TransactionSigner};
use crate::utils::convert::{to_base_units, to_chain_amount, to_display};
use crate::{log_info, log_warn};
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use ethers_core::types::U256;
use once_cell::sync::OnceCell;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

struct WalletState {
    wallet: WalletCredentials,
    currency: CurrencyConfig,
    kind: CurrencyKind,
    client: OnceCell<Arc<TronClient>>,
}

/// 钱包侧：构建、签名、广播出账交易，并规划归集手续费
pub struct TronWallet {
    features: WalletFeatures,
    codec: Arc<dyn AddressCodec>,
    signer: Arc<dyn TransactionSigner>,
    transport_factory: TransportFactory,
    state: ArcSwapOption<WalletState>,
}

impl Default for TronWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl TronWallet {
    pub fn new() -> Self {
        Self::with_transport_factory(http_transport_factory(Duration::from_secs(30)))
    }

    pub fn with_transport_factory(transport_factory: TransportFactory) -> Self {
        Self {
            features: WalletFeatures::default(),
            codec: Arc::new(TronAddressCodec),
            signer: Arc::new(NodeSigner),
            transport_factory,
            state: ArcSwapOption::empty(),
        }
    }

    pub fn with_signer(mut self, signer: Arc<dyn TransactionSigner>) -> Self {
        self.signer = signer;
        self
    }

    pub fn with_features(mut self, features: WalletFeatures) -> Self {
        self.features = features;
        self
    }

    fn state(&self) -> Result<Arc<WalletState>> {
        self.state
            .load_full()
            .ok_or_else(|| AdapterError::missing("wallet"))
    }

    fn client(&self, state: &WalletState) -> Result<Arc<TronClient>> {
        state
            .client
            .get_or_try_init(|| {
                let uri = state.wallet.uri()?;
                let transport = (self.transport_factory)(uri)?;
                Ok::<_, AdapterError>(Arc::new(TronClient::new(transport)))
            })
            .cloned()
    }

    fn decode(&self, address: &str) -> Result<String> {
        self.codec
            .decode_address(address)
            .map_err(|e| AdapterError::InvalidAddress(format!("{}: {}", address, e)))
    }

    fn withdrawal_failed(state: &WalletState, request: &TransactionRequest) -> AdapterError {
        ClientError::WithdrawalFailed {
            from: state.wallet.address.clone(),
            to: request.to_address.clone(),
        }
        .into()
    }

    async fn create_coin_transaction(
        &self,
        state: &WalletState,
        mut request: TransactionRequest,
        options: TransactionOptions,
    ) -> Result<TransactionRequest> {
        let base_factor = state.currency.base_factor;
        let amount = to_chain_amount(to_base_units(&request.amount, base_factor)?)?;
        let to_hex = self.decode(&request.to_address)?;

        let client = self.client(state)?;
        let response = client
            .easy_transfer_by_private(&state.wallet.secret, &to_hex, amount)
            .await?;
        let tx_id = response
            .tx_id()
            .ok_or_else(|| Self::withdrawal_failed(state, &request))?;

        request.hash = Some(self.codec.format_transaction_id(tx_id));
        request.amount = to_display(U256::from(amount), base_factor);
        if request.currency_id.as_deref().is_none_or(str::is_empty) {
            request.currency_id = Some(NATIVE_CURRENCY_ID.to_string());
        }
        request.options = Some(options);

        log_info!(
            "原生币转账已提交: {} → {} 金额 {} hash={:?}",
            state.wallet.address,
            request.to_address,
            request.amount,
            request.hash
        );
        Ok(request)
    }

    async fn create_trc10_transaction(
        &self,
        state: &WalletState,
        mut request: TransactionRequest,
        token_id: &str,
    ) -> Result<TransactionRequest> {
        let amount = to_chain_amount(to_base_units(&request.amount, state.currency.base_factor)?)?;
        let to_hex = self.decode(&request.to_address)?;

        let client = self.client(state)?;
        let response = client
            .easy_transfer_asset_by_private(&state.wallet.secret, &to_hex, token_id, amount)
            .await?;
        let tx_id = response
            .tx_id()
            .ok_or_else(|| Self::withdrawal_failed(state, &request))?;

        request.hash = Some(self.codec.format_transaction_id(tx_id));
        log_info!(
            "TRC10 {} 转账已提交: {} → {} hash={:?}",
            token_id,
            state.wallet.address,
            request.to_address,
            request.hash
        );
        Ok(request)
    }

    /// 构建 transfer(address,uint256) 调用 → 外部签名 → 广播
    async fn create_trc20_transaction(
        &self,
        state: &WalletState,
        mut request: TransactionRequest,
        contract: &str,
    ) -> Result<TransactionRequest> {
        let amount = to_base_units(&request.amount, state.currency.base_factor)?;
        let to_hex = self.decode(&request.to_address)?;
        let contract_hex = self.decode(contract)?;
        let owner_hex = self.decode(&state.wallet.address)?;
        let parameter = self
            .codec
            .encode_abi_parameters(&[strip_address_prefix(&to_hex), &format!("{:x}", amount)])
            .map_err(|e| AdapterError::InvalidAmount(e.to_string()))?;

        let client = self.client(state)?;
        let trigger = client
            .trigger_smart_contract(json!({
                "contract_address": contract_hex,
                "function_selector": "transfer(address,uint256)",
                "parameter": parameter,
                "fee_limit": fee_limit(&state.currency.options),
                "owner_address": owner_hex,
            }))
            .await?;
        let transaction = trigger.transaction.ok_or_else(|| {
            ClientError::MalformedResponse("triggersmartcontract returned no transaction".into())
        })?;

        let signed = self
            .signer
            .sign(&client, transaction, &state.wallet.secret)
            .await?;

        let response = client.broadcast_transaction(signed.payload.clone()).await?;
        if !response.result {
            log_warn!(
                "TRC20 广播失败 tx={} code={:?} message={:?}",
                signed.tx_id,
                response.code,
                response.message
            );
            return Err(Self::withdrawal_failed(state, &request));
        }

        request.hash = Some(self.codec.format_transaction_id(&signed.tx_id));
        log_info!(
            "TRC20 {} 转账已广播: {} → {} 金额 {} hash={:?}",
            contract,
            state.wallet.address,
            request.to_address,
            request.amount,
            request.hash
        );
        Ok(request)
    }
}

#[async_trait]
impl WalletAdapter for TronWallet {
    fn configure(&self, settings: WalletSettings) -> Result<()> {
        let wallet = settings.wallet.ok_or_else(|| AdapterError::missing("wallet"))?;
        let currency = settings
            .currency
            .ok_or_else(|| AdapterError::missing("currency"))?;

        let kind = currency.kind();
        log_info!("钱包配置已更新: {} ({:?})", currency.id, kind);
        self.state.store(Some(Arc::new(WalletState {
            wallet,
            currency,
            kind,
            client: OnceCell::new(),
        })));
        Ok(())
    }

    fn features(&self) -> WalletFeatures {
        self.features
    }

    async fn create_address(&self) -> Result<GeneratedAddress> {
        let state = self.state()?;
        let generated = self.client(&state)?.generate_address().await?;
        Ok(GeneratedAddress {
            address: generated.address,
            secret: generated.private_key,
        })
    }

    async fn create_transaction(
        &self,
        request: TransactionRequest,
        options: TransactionOptions,
    ) -> Result<TransactionRequest> {
        let state = self.state()?;
        match &state.kind {
            CurrencyKind::Trc10(token_id) => {
                self.create_trc10_transaction(&state, request, token_id).await
            }
            CurrencyKind::Trc20(contract) => {
                self.create_trc20_transaction(&state, request, contract).await
            }
            CurrencyKind::NativeCoin => self.create_coin_transaction(&state, request, options).await,
        }
    }

    async fn prepare_deposit_collection(
        &self,
        mut request: TransactionRequest,
        deposit_spread: &[TransactionRequest],
        deposit_currency: &CurrencyConfig,
    ) -> Result<Vec<TransactionRequest>> {
        // 原生币充值不需要预先打手续费
        if deposit_currency.is_native() || deposit_spread.is_empty() {
            return Ok(vec![]);
        }

        let state = self.state()?;
        request.amount = collection_fee(
            fee_limit(&deposit_currency.options),
            state.currency.base_factor,
            deposit_spread.len(),
        );
        log_info!(
            "{} 归集需预付手续费 {}（{} 个子钱包）",
            deposit_currency.id,
            request.amount,
            deposit_spread.len()
        );

        let funded = self
            .create_coin_transaction(&state, request, TransactionOptions::default())
            .await?;
        Ok(vec![funded])
    }

    async fn load_balance(&self) -> Result<BigDecimal> {
        let state = self.state()?;
        let client = self.client(&state)?;
        BalanceReader::new(&client, self.codec.as_ref())
            .balance_of(&state.wallet.address, &state.kind, state.currency.base_factor)
            .await
    }
}
