use super::tron_provider::TronTransport;
use crate::errors::error::TransportError;
use crate::models::rpc::{
    AccountResponse, BlockResponse, BroadcastResponse, EasyTransferResponse,
    GenerateAddressResponse, LatestBlocksResponse, TransactionInfo, TriggerResponse,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

/// 带类型的节点客户端：每个接口一个响应结构，缺字段时得到 Decode 错误
#[derive(Clone)]
pub struct TronClient {
    transport: Arc<dyn TronTransport>,
}

impl TronClient {
    pub fn new(transport: Arc<dyn TronTransport>) -> Self {
        Self { transport }
    }

    async fn request<T: DeserializeOwned>(&self, path: &str, params: Value) -> Result<T, TransportError> {
        let response = self.transport.call(path, params).await?;
        serde_json::from_value(response).map_err(|source| TransportError::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub async fn get_block_by_num(&self, number: u64) -> Result<BlockResponse, TransportError> {
        self.request("wallet/getblockbynum", json!({ "num": number }))
            .await
    }

    pub async fn get_latest_blocks(&self, count: u64) -> Result<LatestBlocksResponse, TransportError> {
        self.request("wallet/getblockbylatestnum", json!({ "num": count }))
            .await
    }

    /// 节点对未知交易返回 `{}`，这里映射为 None
    pub async fn get_transaction_info(&self, tx_id: &str) -> Result<Option<TransactionInfo>, TransportError> {
        let info: TransactionInfo = self
            .request("wallet/gettransactioninfobyid", json!({ "value": tx_id }))
            .await?;
        Ok((!info.is_empty()).then_some(info))
    }

    pub async fn get_account(&self, hex_address: &str) -> Result<AccountResponse, TransportError> {
        self.request("wallet/getaccount", json!({ "address": hex_address }))
            .await
    }

    pub async fn trigger_smart_contract(&self, params: Value) -> Result<TriggerResponse, TransportError> {
        self.request("wallet/triggersmartcontract", params).await
    }

    pub async fn easy_transfer_by_private(
        &self,
        private_key: &str,
        to_hex: &str,
        amount: u64,
    ) -> Result<EasyTransferResponse, TransportError> {
        self.request(
            "wallet/easytransferbyprivate",
            json!({ "privateKey": private_key, "toAddress": to_hex, "amount": amount }),
        )
        .await
    }

    pub async fn easy_transfer_asset_by_private(
        &self,
        private_key: &str,
        to_hex: &str,
        asset_id: &str,
        amount: u64,
    ) -> Result<EasyTransferResponse, TransportError> {
        self.request(
            "wallet/easytransferassetbyprivate",
            json!({
                "privateKey": private_key,
                "toAddress": to_hex,
                "assetId": asset_id,
                "amount": amount
            }),
        )
        .await
    }

    pub async fn get_transaction_sign(&self, transaction: Value, private_key: &str) -> Result<Value, TransportError> {
        self.transport
            .call(
                "wallet/gettransactionsign",
                json!({ "transaction": transaction, "privateKey": private_key }),
            )
            .await
    }

    pub async fn broadcast_transaction(&self, signed: Value) -> Result<BroadcastResponse, TransportError> {
        self.request("wallet/broadcasttransaction", signed).await
    }

    pub async fn generate_address(&self) -> Result<GenerateAddressResponse, TransportError> {
        self.request("wallet/generateaddress", json!({})).await
    }
}
