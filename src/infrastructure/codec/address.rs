use crate::errors::error::CodecError;
use ethers_core::abi::{Token, encode};
use ethers_core::types::U256;
use sha2::{Digest, Sha256};

/// 主网地址前缀字节
pub const ADDRESS_PREFIX: &str = "41";
const ADDRESS_BYTES: usize = 21;
const CHECKSUM_BYTES: usize = 4;

/// 地址与 ABI 参数编解码（无状态，纯函数）
pub trait AddressCodec: Send + Sync {
    /// base58check 地址 → `41` 开头的 hex 地址
    fn decode_address(&self, address: &str) -> Result<String, CodecError>;

    /// `41` 开头的 hex 地址 → base58check 地址
    fn encode_address(&self, hex_address: &str) -> Result<String, CodecError>;

    /// 每个 hex 片段左补零为一个 32 字节的 ABI word 后拼接
    fn encode_abi_parameters(&self, fragments: &[&str]) -> Result<String, CodecError>;

    fn format_transaction_id(&self, raw_id: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TronAddressCodec;

impl AddressCodec for TronAddressCodec {
    fn decode_address(&self, address: &str) -> Result<String, CodecError> {
        let decoded = bs58::decode(address.trim())
            .into_vec()
            .map_err(|e| CodecError::Base58(format!("{}: {}", address, e)))?;

        if decoded.len() != ADDRESS_BYTES + CHECKSUM_BYTES {
            return Err(CodecError::Length(decoded.len()));
        }

        let (body, checksum) = decoded.split_at(ADDRESS_BYTES);
        if checksum != &double_sha256(body)[..CHECKSUM_BYTES] {
            return Err(CodecError::Checksum(address.to_string()));
        }
        Ok(hex::encode(body))
    }

    fn encode_address(&self, hex_address: &str) -> Result<String, CodecError> {
        let bytes = hex::decode(hex_address.trim().trim_start_matches("0x"))
            .map_err(|e| CodecError::Hex(format!("{}: {}", hex_address, e)))?;

        if bytes.len() != ADDRESS_BYTES {
            return Err(CodecError::Length(bytes.len()));
        }

        let mut full = bytes.clone();
        full.extend_from_slice(&double_sha256(&bytes)[..CHECKSUM_BYTES]);
        Ok(bs58::encode(full).into_string())
    }

    fn encode_abi_parameters(&self, fragments: &[&str]) -> Result<String, CodecError> {
        let tokens = fragments
            .iter()
            .map(|fragment| {
                let digits = fragment.trim_start_matches("0x");
                if digits.len() > 64 {
                    return Err(CodecError::AbiOverflow(fragment.to_string()));
                }
                if digits.is_empty() {
                    return Ok(Token::Uint(U256::zero()));
                }
                U256::from_str_radix(digits, 16)
                    .map(Token::Uint)
                    .map_err(|e| CodecError::Hex(format!("{}: {}", fragment, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(hex::encode(encode(&tokens)))
    }

    fn format_transaction_id(&self, raw_id: &str) -> String {
        raw_id.trim().trim_start_matches("0x").to_lowercase()
    }
}

/// 去掉 `41` 前缀，得到 ABI 参数用的 20 字节地址
pub fn strip_address_prefix(hex_address: &str) -> &str {
    hex_address
        .strip_prefix(ADDRESS_PREFIX)
        .unwrap_or(hex_address)
}

fn double_sha256(data: &[u8]) -> Vec<u8> {
    let first = Sha256::digest(data);
    Sha256::digest(first).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDT_BASE58: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";
    const USDT_HEX: &str = "41a614f803b6fd780986a42c78ec9c7f77e6ded13c";

    #[test]
    fn decodes_known_contract_address() {
        assert_eq!(TronAddressCodec.decode_address(USDT_BASE58).unwrap(), USDT_HEX);
        assert_eq!(TronAddressCodec.encode_address(USDT_HEX).unwrap(), USDT_BASE58);
    }

    #[test]
    fn round_trips_arbitrary_addresses() {
        let codec = TronAddressCodec;
        for tail in ["00", "11", "ab", "ff"] {
            let hex_address = format!("41{}", tail.repeat(20));
            let display = codec.encode_address(&hex_address).unwrap();
            assert!(display.starts_with('T'));
            assert_eq!(codec.decode_address(&display).unwrap(), hex_address);
        }
    }

    #[test]
    fn rejects_bad_checksum_and_length() {
        let codec = TronAddressCodec;
        let mut tampered = USDT_BASE58.to_string();
        tampered.replace_range(33..34, if tampered.ends_with('t') { "u" } else { "t" });
        assert!(codec.decode_address(&tampered).is_err());
        assert_eq!(codec.encode_address("41"), Err(CodecError::Length(1)));
        assert!(codec.decode_address("0OIl").is_err());
    }

    #[test]
    fn encodes_abi_words() {
        let encoded = TronAddressCodec
            .encode_abi_parameters(&[strip_address_prefix(USDT_HEX), "3e8"])
            .unwrap();
        assert_eq!(encoded.len(), 128);
        assert_eq!(
            &encoded[..64],
            "000000000000000000000000a614f803b6fd780986a42c78ec9c7f77e6ded13c"
        );
        assert!(encoded[64..].ends_with("00000003e8"));
        assert!(
            TronAddressCodec
                .encode_abi_parameters(&[&"f".repeat(65)])
                .is_err()
        );
    }

    #[test]
    fn formats_transaction_ids() {
        assert_eq!(TronAddressCodec.format_transaction_id("0xABC123"), "abc123");
        assert_eq!(TronAddressCodec.format_transaction_id("abc123"), "abc123");
    }
}
