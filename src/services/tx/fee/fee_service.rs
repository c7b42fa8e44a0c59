// services/tx/fee/fee_service.rs

use crate::models::domain::currency::CurrencyOptions;
use crate::utils::convert::to_display;
use bigdecimal::BigDecimal;
use ethers_core::types::U256;

/// 未配置 fee_limit 时的默认能量费上限（最小单位）
pub const DEFAULT_FEE_LIMIT: u64 = 1_000_000;

pub fn fee_limit(options: &CurrencyOptions) -> u64 {
    options.fee_limit.unwrap_or(DEFAULT_FEE_LIMIT)
}

/// 归集 token 前，每个分散充值的子钱包都要先打一份手续费
///
/// 返回的是原生币的展示金额：`fee_limit / base_factor * spread`
pub fn collection_fee(fee_limit: u64, base_factor: u64, spread: usize) -> BigDecimal {
    to_display(U256::from(fee_limit), base_factor) * BigDecimal::from(spread as u64)
}
