use crate::errors::error::AdapterError;
use crate::utils::format::u256_to_bigdecimal;
use bigdecimal::BigDecimal;
use ethers_core::types::U256;

/// 最小单位 → 展示金额：`base_units / base_factor`（任意精度，无浮点误差）
pub fn to_display(base_units: U256, base_factor: u64) -> BigDecimal {
    u256_to_bigdecimal(base_units) / BigDecimal::from(base_factor)
}

/// 展示金额 → 最小单位
///
/// 乘积必须是整数；否则说明金额精度超过了币种支持的精度，直接拒绝而不是截断。
pub fn to_base_units(display: &BigDecimal, base_factor: u64) -> Result<U256, AdapterError> {
    if *display < BigDecimal::from(0) {
        return Err(AdapterError::InvalidAmount(format!(
            "negative amount {}",
            display
        )));
    }

    let product = display * BigDecimal::from(base_factor);
    let integral = product.with_scale(0);
    if integral != product {
        return Err(AdapterError::Precision {
            value: display.to_string(),
            base_factor,
        });
    }

    // BigInt 的 Display 永远是纯十进制数字
    let (digits, _) = integral.into_bigint_and_exponent();
    U256::from_dec_str(&digits.to_string())
        .map_err(|e| AdapterError::InvalidAmount(format!("{} overflows uint256: {}", display, e)))
}

/// 原生币/TRC10 转账接口的金额是 int64
pub fn to_chain_amount(base_units: U256) -> Result<u64, AdapterError> {
    if base_units > U256::from(i64::MAX as u64) {
        return Err(AdapterError::InvalidAmount(format!(
            "{} exceeds the int64 transfer limit",
            base_units
        )));
    }
    Ok(base_units.as_u64())
}

/// 解析节点返回的十六进制整数（可带 0x 前缀，空串视为 0）
pub fn hex_to_u256(value: &str) -> Result<U256, String> {
    let digits = value.trim().trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_str_radix(digits, 16).map_err(|e| format!("invalid hex integer '{}': {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn converts_base_units_to_display() {
        assert_eq!(to_display(U256::from(1_500_000u64), 1_000_000), dec("1.5"));
        assert_eq!(to_display(U256::zero(), 1_000_000), dec("0"));
        assert_eq!(
            to_display(U256::from_dec_str("123456789012345678901").unwrap(), 1_000_000_000_000_000_000),
            dec("123.456789012345678901")
        );
    }

    #[test]
    fn round_trips_exact_amounts() {
        for (display, factor) in [("1.5", 1_000_000u64), ("0.000001", 1_000_000), ("42", 1), ("3.0", 1_000_000)] {
            let base = to_base_units(&dec(display), factor).unwrap();
            assert_eq!(to_display(base, factor), dec(display), "{} / {}", display, factor);
        }
    }

    #[test]
    fn rejects_lossy_conversion() {
        let err = to_base_units(&dec("1.0000000001"), 1_000_000).unwrap_err();
        assert!(matches!(err, AdapterError::Precision { base_factor: 1_000_000, .. }));
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(matches!(
            to_base_units(&dec("-1"), 1_000_000),
            Err(AdapterError::InvalidAmount(_))
        ));
    }

    #[test]
    fn chain_amounts_fit_int64() {
        assert_eq!(to_chain_amount(U256::from(5u64)).unwrap(), 5);
        assert!(to_chain_amount(U256::from(u64::MAX)).is_err());
    }

    #[test]
    fn parses_hex_integers() {
        assert_eq!(hex_to_u256("0x3e8").unwrap(), U256::from(1000u64));
        assert_eq!(
            hex_to_u256("00000000000000000000000000000000000000000000000000000000000f4240").unwrap(),
            U256::from(1_000_000u64)
        );
        assert_eq!(hex_to_u256("").unwrap(), U256::zero());
        assert!(hex_to_u256("zz").is_err());
    }
}
