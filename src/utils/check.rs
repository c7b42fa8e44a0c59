use crate::models::rpc::{RESULT_REVERT, RawTransaction, TransactionInfo};

/// 原生币/TRC10 转账：金额为 0 或执行结果为 REVERT 视为没有发生
pub fn is_invalid_transfer(tx: &RawTransaction) -> bool {
    let amount = tx
        .contract()
        .and_then(|c| c.parameter.value.amount)
        .unwrap_or(0);
    amount == 0 || tx.contract_ret() == Some(RESULT_REVERT)
}

/// 合约调用：没有合约地址或没有事件日志，不是本适配器关心的资金事件
pub fn is_invalid_contract_call(info: &TransactionInfo) -> bool {
    info.contract_address().is_none() || info.log.is_empty()
}
