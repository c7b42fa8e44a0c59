//! 节点 HTTP API 的响应结构（按接口显式定义，入口处校验）

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RESULT_SUCCESS: &str = "SUCCESS";
pub const RESULT_REVERT: &str = "REVERT";

/// `wallet/getblockbynum`；空块时节点不返回 transactions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockResponse {
    #[serde(default)]
    pub block_header: Option<BlockHeader>,
    #[serde(default)]
    pub transactions: Vec<RawTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeader {
    pub raw_data: BlockHeaderRaw,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeaderRaw {
    #[serde(default)]
    pub number: u64,
}

/// `wallet/getblockbylatestnum`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestBlocksResponse {
    #[serde(default)]
    pub block: Vec<BlockResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "txID")]
    pub tx_id: String,
    pub raw_data: RawData,
    #[serde(default)]
    pub ret: Vec<ContractResult>,
}

impl RawTransaction {
    pub fn contract(&self) -> Option<&Contract> {
        self.raw_data.contract.first()
    }

    pub fn contract_type(&self) -> ContractType {
        self.contract()
            .map(|c| c.contract_type)
            .unwrap_or(ContractType::Other)
    }

    pub fn contract_ret(&self) -> Option<&str> {
        self.ret.first().and_then(|r| r.contract_ret.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawData {
    #[serde(default)]
    pub contract: Vec<Contract>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractResult {
    #[serde(rename = "contractRet", default)]
    pub contract_ret: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contract {
    #[serde(rename = "type", default)]
    pub contract_type: ContractType,
    pub parameter: ContractParameter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ContractType {
    TransferContract,
    TransferAssetContract,
    #[default]
    #[serde(other)]
    Other,
}

impl ContractType {
    /// 原生币/TRC10 转账：金额直接写在交易里，不需要再拉回执
    pub fn is_direct_transfer(self) -> bool {
        matches!(
            self,
            ContractType::TransferContract | ContractType::TransferAssetContract
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContractParameter {
    pub value: ContractValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractValue {
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(default)]
    pub to_address: Option<String>,
    #[serde(default)]
    pub asset_name: Option<String>,
}

/// `wallet/gettransactioninfobyid`；未知 id 时节点返回 `{}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionInfo {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "blockNumber", default)]
    pub block_number: Option<u64>,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub receipt: Receipt,
    #[serde(default)]
    pub log: Vec<LogEntry>,
}

impl TransactionInfo {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.receipt.result.as_deref() == Some(RESULT_SUCCESS)
    }

    pub fn contract_address(&self) -> Option<&str> {
        self.contract_address.as_deref().filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Receipt {
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: String,
}

/// `wallet/getaccount`；未激活账户返回 `{}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountResponse {
    #[serde(default)]
    pub balance: Option<u64>,
    #[serde(rename = "assetV2", default)]
    pub asset_v2: Vec<AssetBalance>,
}

impl AccountResponse {
    pub fn asset_balance(&self, token_id: &str) -> u64 {
        self.asset_v2
            .iter()
            .find(|a| a.key == token_id)
            .map(|a| a.value)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetBalance {
    pub key: String,
    #[serde(default)]
    pub value: u64,
}

/// `wallet/triggersmartcontract`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerResponse {
    #[serde(default)]
    pub constant_result: Vec<String>,
    #[serde(default)]
    pub transaction: Option<Value>,
}

/// `wallet/easytransferbyprivate` / `wallet/easytransferassetbyprivate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EasyTransferResponse {
    #[serde(default)]
    pub transaction: Option<TransactionId>,
}

impl EasyTransferResponse {
    pub fn tx_id(&self) -> Option<&str> {
        self.transaction
            .as_ref()
            .and_then(|t| t.tx_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionId {
    #[serde(rename = "txID", default)]
    pub tx_id: Option<String>,
}

/// `wallet/broadcasttransaction`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BroadcastResponse {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `wallet/generateaddress`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateAddressResponse {
    pub address: String,
    #[serde(rename = "privateKey")]
    pub private_key: String,
}
