use crate::errors::error::ClientError;
use crate::infrastructure::codec::{ADDRESS_PREFIX, AddressCodec};
use crate::{log_debug, log_warn};
use crate::models::domain::currency::CurrencyConfig;
use crate::models::domain::transfer::{CanonicalTransaction, TransactionStatus};
use crate::models::rpc::{ContractType, LogEntry, RawTransaction, TransactionInfo};
use crate::services::currency_router::{CurrencyBuckets, TokenKind};
use crate::utils::convert::{hex_to_u256, to_display};
use crate::utils::format::decode_hex_string;
use ethers_core::types::U256;
use ethers_core::utils::keccak256;
use lazy_static::lazy_static;

lazy_static! {
    /// keccak256("Transfer(address,address,uint256)")，即 ddf252ad...b3ef
    pub static ref TRANSFER_EVENT_TOPIC: String =
        hex::encode(keccak256("Transfer(address,address,uint256)"));
}

/// 进入分类器的链上交易：直接转账，或已拉取回执的合约调用
#[derive(Debug, Clone)]
pub enum ScannedTransaction {
    Transfer(RawTransaction),
    Contract(TransactionInfo),
}

/// 把一笔链上交易归一化为零到多条 CanonicalTransaction（纯函数，不访问网络）
pub struct TransactionClassifier<'a> {
    buckets: &'a CurrencyBuckets,
    codec: &'a dyn AddressCodec,
}

impl<'a> TransactionClassifier<'a> {
    pub fn new(buckets: &'a CurrencyBuckets, codec: &'a dyn AddressCodec) -> Self {
        Self { buckets, codec }
    }

    pub fn classify(
        &self,
        tx: &ScannedTransaction,
        block_number: u64,
    ) -> Result<Vec<CanonicalTransaction>, ClientError> {
        match tx {
            ScannedTransaction::Contract(info) => self.build_trc20_transactions(info, block_number),
            ScannedTransaction::Transfer(raw) => match raw.contract_type() {
                ContractType::TransferContract => self.build_coin_transactions(raw, block_number),
                ContractType::TransferAssetContract => {
                    self.build_trc10_transactions(raw, block_number)
                }
                _ => Ok(vec![]),
            },
        }
    }

    fn build_coin_transactions(
        &self,
        raw: &RawTransaction,
        block_number: u64,
    ) -> Result<Vec<CanonicalTransaction>, ClientError> {
        let currencies = self.buckets.match_token(TokenKind::Native, "");
        self.build_direct_transfers(raw, &currencies, block_number)
    }

    fn build_trc10_transactions(
        &self,
        raw: &RawTransaction,
        block_number: u64,
    ) -> Result<Vec<CanonicalTransaction>, ClientError> {
        let Some(asset_name) = raw.contract().and_then(|c| c.parameter.value.asset_name.as_deref())
        else {
            return Ok(vec![]);
        };
        // 节点以 hex 返回 asset_name；visible 模式下已经是明文
        let token_id = decode_hex_string(asset_name).unwrap_or_else(|| asset_name.to_string());
        let currencies = self.buckets.match_token(TokenKind::Trc10, &token_id);
        self.build_direct_transfers(raw, &currencies, block_number)
    }

    fn build_direct_transfers(
        &self,
        raw: &RawTransaction,
        currencies: &[&CurrencyConfig],
        block_number: u64,
    ) -> Result<Vec<CanonicalTransaction>, ClientError> {
        if currencies.is_empty() {
            return Ok(vec![]);
        }
        let value = raw
            .contract()
            .map(|c| &c.parameter.value)
            .ok_or_else(|| ClientError::MalformedResponse(format!("{} has no contract", raw.tx_id)))?;
        let to_hex = value.to_address.as_deref().ok_or_else(|| {
            ClientError::MalformedResponse(format!("{} has no to_address", raw.tx_id))
        })?;
        let to_address = self.encode(to_hex)?;
        let amount = U256::from(value.amount.unwrap_or(0));
        let hash = self.codec.format_transaction_id(&raw.tx_id);

        Ok(currencies
            .iter()
            .map(|currency| {
                CanonicalTransaction::transfer(
                    hash.clone(),
                    to_display(amount, currency.base_factor),
                    to_address.clone(),
                    0,
                    block_number,
                    currency.id.clone(),
                    TransactionStatus::Success,
                )
            })
            .collect())
    }

    fn build_trc20_transactions(
        &self,
        info: &TransactionInfo,
        block_number: u64,
    ) -> Result<Vec<CanonicalTransaction>, ClientError> {
        let status = TransactionStatus::from_success(info.is_success());

        // 链上回滚的提现也要回报给账本
        if status == TransactionStatus::Failed && info.log.is_empty() {
            return self.build_invalid_trc20_transactions(info, block_number);
        }

        let hash = self.codec.format_transaction_id(&info.id);
        let mut formatted = Vec::new();
        for (index, log) in info.log.iter().enumerate() {
            if !is_transfer_event(log) {
                continue;
            }

            let contract = match self.encode(&with_prefix(&log.address)) {
                Ok(contract) => contract,
                Err(e) => {
                    log_warn!("跳过无法解析的日志 (tx {} #{}): {}", hash, index, e);
                    continue;
                }
            };
            let currencies = self.buckets.match_token(TokenKind::Trc20, &contract);
            if currencies.is_empty() {
                log_debug!("跳过未跟踪的 TRC20 合约 {} (tx {})", contract, hash);
                continue;
            }

            // 非标准 Transfer（参数未 indexed 等）只丢弃这一条日志，不影响整个区块
            let decoded = self.destination(log).and_then(|to| {
                hex_to_u256(&log.data)
                    .map(|amount| (to, amount))
                    .map_err(ClientError::MalformedResponse)
            });
            let (to_address, amount) = match decoded {
                Ok(decoded) => decoded,
                Err(e) => {
                    log_warn!("跳过 {} 的异常 Transfer 日志 (tx {} #{}): {}", contract, hash, index, e);
                    continue;
                }
            };

            for currency in currencies {
                formatted.push(CanonicalTransaction::transfer(
                    hash.clone(),
                    to_display(amount, currency.base_factor),
                    to_address.clone(),
                    index as u64,
                    block_number,
                    currency.id.clone(),
                    status,
                ));
            }
        }
        Ok(formatted)
    }

    fn build_invalid_trc20_transactions(
        &self,
        info: &TransactionInfo,
        block_number: u64,
    ) -> Result<Vec<CanonicalTransaction>, ClientError> {
        let Some(contract_hex) = info.contract_address() else {
            return Ok(vec![]);
        };
        let contract = self.encode(contract_hex)?;
        let hash = self.codec.format_transaction_id(&info.id);

        Ok(self
            .buckets
            .match_token(TokenKind::Trc20, &contract)
            .into_iter()
            .map(|currency| {
                CanonicalTransaction::failure(hash.clone(), block_number, currency.id.clone())
            })
            .collect())
    }

    /// 最后一个 topic 的末 20 字节是收款地址
    fn destination(&self, log: &LogEntry) -> Result<String, ClientError> {
        let topic = log.topics.last().map(String::as_str).unwrap_or_default();
        if topic.len() < 40 {
            return Err(ClientError::MalformedResponse(format!(
                "transfer topic too short: {}",
                topic
            )));
        }
        self.encode(&with_prefix(&topic[topic.len() - 40..]))
    }

    fn encode(&self, hex_address: &str) -> Result<String, ClientError> {
        self.codec
            .encode_address(hex_address)
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}

pub fn is_transfer_event(log: &LogEntry) -> bool {
    log.topics
        .first()
        .is_some_and(|topic| topic.trim_start_matches("0x") == TRANSFER_EVENT_TOPIC.as_str())
}

fn with_prefix(address: &str) -> String {
    if address.len() == 40 {
        format!("{}{}", ADDRESS_PREFIX, address)
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::codec::TronAddressCodec;
    use bigdecimal::BigDecimal;
    use serde_json::json;
    use std::str::FromStr;

    const USDT_HEX: &str = "a614f803b6fd780986a42c78ec9c7f77e6ded13c";
    const USDT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";
    const RECEIVER_HEX: &str = "1111111111111111111111111111111111111111";

    fn buckets() -> CurrencyBuckets {
        CurrencyBuckets::classify(&[
            CurrencyConfig::new("trx", 1_000_000),
            CurrencyConfig::trc10("btt", 1_000, "1002000"),
            CurrencyConfig::trc20("usdt", 1_000_000, USDT),
        ])
    }

    fn transfer_log(amount_hex: &str) -> serde_json::Value {
        json!({
            "address": USDT_HEX,
            "topics": [
                TRANSFER_EVENT_TOPIC.as_str(),
                format!("000000000000000000000000{}", "22".repeat(20)),
                format!("000000000000000000000000{}", RECEIVER_HEX),
            ],
            "data": format!("{:0>64}", amount_hex),
        })
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn receiver() -> String {
        TronAddressCodec
            .encode_address(&format!("41{}", RECEIVER_HEX))
            .unwrap()
    }

    #[test]
    fn transfer_topic_matches_erc20_signature() {
        assert_eq!(
            TRANSFER_EVENT_TOPIC.as_str(),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn native_transfer_yields_one_record_per_native_currency() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "txID": "AB01",
            "raw_data": { "contract": [{
                "type": "TransferContract",
                "parameter": { "value": { "amount": 2_500_000, "to_address": format!("41{}", RECEIVER_HEX) } }
            }]},
            "ret": [{ "contractRet": "SUCCESS" }]
        }))
        .unwrap();

        let buckets = buckets();
        let records = TransactionClassifier::new(&buckets, &TronAddressCodec)
            .classify(&ScannedTransaction::Transfer(raw), 100)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hash, "ab01");
        assert_eq!(records[0].amount, Some(dec("2.5")));
        assert_eq!(records[0].to_address, Some(receiver()));
        assert_eq!(records[0].txout, 0);
        assert_eq!(records[0].block_number, 100);
        assert_eq!(records[0].currency_id, "trx");
        assert!(records[0].is_success());
    }

    #[test]
    fn trc10_transfer_matches_decoded_asset_id() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "txID": "cd02",
            "raw_data": { "contract": [{
                "type": "TransferAssetContract",
                "parameter": { "value": {
                    "amount": 1500,
                    "asset_name": hex::encode("1002000"),
                    "to_address": format!("41{}", RECEIVER_HEX)
                } }
            }]}
        }))
        .unwrap();

        let buckets = buckets();
        let records = TransactionClassifier::new(&buckets, &TronAddressCodec)
            .classify(&ScannedTransaction::Transfer(raw), 5)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].currency_id, "btt");
        assert_eq!(records[0].amount, Some(dec("1.5")));
    }

    #[test]
    fn trc10_transfer_of_untracked_asset_is_ignored() {
        let raw: RawTransaction = serde_json::from_value(json!({
            "txID": "cd03",
            "raw_data": { "contract": [{
                "type": "TransferAssetContract",
                "parameter": { "value": { "amount": 1, "asset_name": hex::encode("1000001"), "to_address": format!("41{}", RECEIVER_HEX) } }
            }]}
        }))
        .unwrap();

        let buckets = buckets();
        let records = TransactionClassifier::new(&buckets, &TronAddressCodec)
            .classify(&ScannedTransaction::Transfer(raw), 5)
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn failed_trc20_without_logs_yields_failure_records() {
        let info: TransactionInfo = serde_json::from_value(json!({
            "id": "ef03",
            "contract_address": format!("41{}", USDT_HEX),
            "receipt": { "result": "FAILED" },
        }))
        .unwrap();

        let buckets = CurrencyBuckets::classify(&[
            CurrencyConfig::trc20("usdt", 1_000_000, USDT),
            CurrencyConfig::trc20("usdt-2", 1_000_000, USDT),
        ]);
        let records = TransactionClassifier::new(&buckets, &TronAddressCodec)
            .classify(&ScannedTransaction::Contract(info), 9)
            .unwrap();

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.status, TransactionStatus::Failed);
            assert!(record.amount.is_none());
            assert_eq!(record.block_number, 9);
        }
    }

    #[test]
    fn each_transfer_log_becomes_its_own_record() {
        let info: TransactionInfo = serde_json::from_value(json!({
            "id": "ef04",
            "contract_address": format!("41{}", USDT_HEX),
            "receipt": { "result": "SUCCESS" },
            "log": [transfer_log("f4240"), transfer_log("1e8480")],
        }))
        .unwrap();

        let buckets = buckets();
        let records = TransactionClassifier::new(&buckets, &TronAddressCodec)
            .classify(&ScannedTransaction::Contract(info), 11)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].txout, 0);
        assert_eq!(records[0].amount, Some(dec("1")));
        assert_eq!(records[1].txout, 1);
        assert_eq!(records[1].amount, Some(dec("2")));
        assert_eq!(records[1].to_address, Some(receiver()));
        assert!(records.iter().all(|r| r.currency_id == "usdt" && r.is_success()));
    }

    #[test]
    fn skips_foreign_events_and_untracked_contracts() {
        let mut untracked = transfer_log("1");
        untracked["address"] = json!("3333333333333333333333333333333333333333");
        let approval = json!({
            "address": USDT_HEX,
            "topics": ["8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925"],
            "data": "00"
        });
        let empty_topics = json!({ "address": USDT_HEX, "topics": [], "data": "01" });

        let info: TransactionInfo = serde_json::from_value(json!({
            "id": "ef05",
            "contract_address": format!("41{}", USDT_HEX),
            "receipt": { "result": "SUCCESS" },
            "log": [approval, untracked, empty_topics, transfer_log("3")],
        }))
        .unwrap();

        let buckets = buckets();
        let records = TransactionClassifier::new(&buckets, &TronAddressCodec)
            .classify(&ScannedTransaction::Contract(info), 1)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].txout, 3);
        assert_eq!(records[0].amount, Some(dec("0.000003")));
    }

    #[test]
    fn reverted_trc20_with_logs_reports_failed_status() {
        let info: TransactionInfo = serde_json::from_value(json!({
            "id": "ef06",
            "contract_address": format!("41{}", USDT_HEX),
            "receipt": { "result": "OUT_OF_ENERGY" },
            "log": [transfer_log("a")],
        }))
        .unwrap();

        let buckets = buckets();
        let records = TransactionClassifier::new(&buckets, &TronAddressCodec)
            .classify(&ScannedTransaction::Contract(info), 1)
            .unwrap();
        assert_eq!(records[0].status, TransactionStatus::Failed);
        assert!(records[0].amount.is_some());
    }

    #[test]
    fn malformed_transfer_log_is_skipped_not_fatal() {
        // 参数全部放在 data 里的 Transfer：没有收款 topic，data 超过 32 字节
        let unindexed = json!({
            "address": USDT_HEX,
            "topics": [TRANSFER_EVENT_TOPIC.as_str()],
            "data": "00".repeat(96),
        });
        let mut oversized = transfer_log("1");
        oversized["data"] = json!("ff".repeat(40));

        let info: TransactionInfo = serde_json::from_value(json!({
            "id": "ef06",
            "contract_address": format!("41{}", USDT_HEX),
            "receipt": { "result": "SUCCESS" },
            "log": [unindexed, oversized, transfer_log("f4240")],
        }))
        .unwrap();

        let buckets = buckets();
        let records = TransactionClassifier::new(&buckets, &TronAddressCodec)
            .classify(&ScannedTransaction::Contract(info), 3)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].txout, 2);
        assert_eq!(records[0].amount, Some(dec("1")));
    }
}
