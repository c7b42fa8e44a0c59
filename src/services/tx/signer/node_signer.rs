// services/tx/signer/node_signer.rs

use crate::errors::error::{ClientError, Result};
use crate::infrastructure::provider::TronClient;
use crate::services::tx::signer::TransactionSigner;
use crate::services::tx::types::SignedTransaction;
use async_trait::async_trait;
use serde_json::Value;

/// 通过节点的 `wallet/gettransactionsign` 签名
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeSigner;

#[async_trait]
impl TransactionSigner for NodeSigner {
    async fn sign(
        &self,
        client: &TronClient,
        transaction: Value,
        private_key: &str,
    ) -> Result<SignedTransaction> {
        let signed = client.get_transaction_sign(transaction, private_key).await?;
        SignedTransaction::from_payload(signed).ok_or_else(|| {
            ClientError::MalformedResponse("gettransactionsign returned no txID".into()).into()
        })
    }
}
