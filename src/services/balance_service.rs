use crate::errors::error::{AdapterError, ClientError};
use crate::infrastructure::codec::{AddressCodec, strip_address_prefix};
use crate::infrastructure::provider::TronClient;
use crate::models::domain::currency::CurrencyKind;
use crate::utils::convert::{hex_to_u256, to_display};
use bigdecimal::BigDecimal;
use ethers_core::types::U256;
use serde_json::json;

/// 查询地址在某个币种上的余额，三种币种最终都走 `to_display`
pub struct BalanceReader<'a> {
    client: &'a TronClient,
    codec: &'a dyn AddressCodec,
}

impl<'a> BalanceReader<'a> {
    pub fn new(client: &'a TronClient, codec: &'a dyn AddressCodec) -> Self {
        Self { client, codec }
    }

    pub async fn balance_of(
        &self,
        address: &str,
        kind: &CurrencyKind,
        base_factor: u64,
    ) -> Result<BigDecimal, AdapterError> {
        let owner = self
            .codec
            .decode_address(address)
            .map_err(|e| AdapterError::InvalidAddress(e.to_string()))?;

        let amount = match kind {
            CurrencyKind::NativeCoin => {
                U256::from(self.client.get_account(&owner).await?.balance.unwrap_or(0))
            }
            CurrencyKind::Trc10(token_id) => {
                U256::from(self.client.get_account(&owner).await?.asset_balance(token_id))
            }
            CurrencyKind::Trc20(contract) => self.trc20_balance(&owner, contract).await?,
        };
        Ok(to_display(amount, base_factor))
    }

    async fn trc20_balance(&self, owner: &str, contract: &str) -> Result<U256, AdapterError> {
        let contract_hex = self
            .codec
            .decode_address(contract)
            .map_err(|e| AdapterError::InvalidAddress(e.to_string()))?;
        let parameter = self
            .codec
            .encode_abi_parameters(&[strip_address_prefix(owner)])
            .map_err(|e| AdapterError::InvalidAddress(e.to_string()))?;

        let response = self
            .client
            .trigger_smart_contract(json!({
                "owner_address": owner,
                "contract_address": contract_hex,
                "function_selector": "balanceOf(address)",
                "parameter": parameter,
            }))
            .await?;

        let raw = response.constant_result.first().ok_or_else(|| {
            ClientError::MalformedResponse(format!("balanceOf on {} returned no result", contract))
        })?;
        Ok(hex_to_u256(raw).map_err(ClientError::MalformedResponse)?)
    }
}
