use bigdecimal::BigDecimal;
use ethers_core::types::U256;
use std::str::FromStr;

/// 将U256 转 BigDecimal
pub fn u256_to_bigdecimal(value: U256) -> BigDecimal {
    // 先转字符串再转 BigDecimal (处理大数最稳)
    let s = value.to_string();
    BigDecimal::from_str(&s).unwrap_or_else(|_| BigDecimal::from(0))
}

/// 节点把 TRC10 asset_name 以 hex 形式返回，这里还原成 token id
pub fn decode_hex_string(value: &str) -> Option<String> {
    let bytes = hex::decode(value.trim_start_matches("0x")).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_asset_names() {
        assert_eq!(decode_hex_string("31303030303031").as_deref(), Some("1000001"));
        assert_eq!(decode_hex_string("not-hex"), None);
    }
}
