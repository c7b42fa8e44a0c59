use crate::errors::error::Result;
use crate::infrastructure::provider::TronClient;
use crate::services::tx::types::SignedTransaction;
use async_trait::async_trait;
use serde_json::Value;

/// 外部签名器：接收私钥和节点构建好的交易，返回已签名交易
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign(
        &self,
        client: &TronClient,
        transaction: Value,
        private_key: &str,
    ) -> Result<SignedTransaction>;
}
