//! Minimal ABI encoding and decoding.
//!
//! Covers exactly what Streamboard needs: four-byte selectors, single-word
//! argument encoding, and 256-bit quantity decoding. Full ABI support is
//! deliberately out of scope.

use sha3::{Digest, Keccak256};

use streamboard_core::constants::TOKEN_DECIMALS;
use streamboard_core::error::{Result, StreamboardError};
use streamboard_core::types::is_hex_address;

/// Computes the four-byte function selector for a signature like `"cap()"`.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Encodes an Ethereum address as a left-padded 32-byte word.
pub fn encode_address(address: &str) -> Result<[u8; 32]> {
    if !is_hex_address(address) {
        return Err(StreamboardError::InvalidAddress(address.into()));
    }
    let bytes = hex::decode(&address[2..])?;

    let mut word = [0u8; 32];
    word[12..].copy_from_slice(&bytes);
    Ok(word)
}

/// Encodes an unsigned integer as a big-endian 32-byte word.
pub fn encode_uint(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encodes a bool as a 32-byte word (0 or 1).
pub fn encode_bool(value: bool) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[31] = value as u8;
    word
}

/// Decodes `eth_call` return data holding a single unsigned quantity.
///
/// Accepts 0x-prefixed hex of any word-aligned length; values wider than
/// 128 bits are rejected rather than truncated.
pub fn decode_quantity(hex_data: &str) -> Result<u128> {
    let data = hex_data.strip_prefix("0x").unwrap_or(hex_data);
    if data.is_empty() {
        return Err(StreamboardError::RpcError("empty return data".into()));
    }

    let bytes = hex::decode(data)?;
    let split = bytes.len().saturating_sub(16);
    if bytes[..split].iter().any(|&b| b != 0) {
        return Err(StreamboardError::InvalidAmount(
            "quantity exceeds 128 bits".into(),
        ));
    }

    let mut value: u128 = 0;
    for &byte in &bytes[split..] {
        value = (value << 8) | byte as u128;
    }
    Ok(value)
}

/// Parses a decimal token amount (e.g. `"1.5"`) into raw 18-decimal units.
///
/// Rejects non-decimal input, more than 18 fractional digits, and amounts
/// that overflow 128 bits.
pub fn parse_token_amount(amount: &str) -> Result<u128> {
    let trimmed = amount.trim();
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(StreamboardError::InvalidAmount(format!(
            "not a decimal number: {amount:?}"
        )));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(StreamboardError::InvalidAmount(format!(
            "not a decimal number: {amount:?}"
        )));
    }
    if frac_part.len() > TOKEN_DECIMALS as usize {
        return Err(StreamboardError::InvalidAmount(format!(
            "more than {TOKEN_DECIMALS} fractional digits: {amount:?}"
        )));
    }

    let overflow =
        || StreamboardError::InvalidAmount(format!("amount overflows 128 bits: {amount:?}"));

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| overflow())?
    };

    let mut raw = int_value
        .checked_mul(10u128.pow(TOKEN_DECIMALS))
        .ok_or_else(overflow)?;

    if !frac_part.is_empty() {
        let scale = 10u128.pow(TOKEN_DECIMALS - frac_part.len() as u32);
        let frac_value: u128 = frac_part.parse().map_err(|_| overflow())?;
        raw = raw.checked_add(frac_value * scale).ok_or_else(overflow)?;
    }

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamboard_core::constants::RAW_PER_TOKEN;
    use test_case::test_case;

    #[test]
    fn test_known_selectors() {
        // ERC-20 transfer(address,uint256) is the canonical reference vector
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        // cap() as implemented by ERC20Capped and the stream contract
        assert_eq!(selector("cap()"), [0x35, 0x52, 0x74, 0xea]);
    }

    #[test]
    fn test_encode_address() {
        let word = encode_address("0x1111111111111111111111111111111111111111").unwrap();
        assert_eq!(word[..12], [0u8; 12]);
        assert_eq!(word[12..], [0x11u8; 20]);

        assert!(encode_address("0x1111").is_err());
        assert!(encode_address("garbage").is_err());
    }

    #[test]
    fn test_encode_uint() {
        let word = encode_uint(1);
        assert_eq!(word[31], 1);
        assert_eq!(word[..31], [0u8; 31]);

        let max = encode_uint(u128::MAX);
        assert_eq!(max[..16], [0u8; 16]);
        assert_eq!(max[16..], [0xffu8; 16]);
    }

    #[test]
    fn test_encode_bool() {
        assert_eq!(encode_bool(true)[31], 1);
        assert_eq!(encode_bool(false), [0u8; 32]);
    }

    #[test]
    fn test_decode_quantity() {
        let one_token = format!("0x{:064x}", RAW_PER_TOKEN);
        assert_eq!(decode_quantity(&one_token).unwrap(), RAW_PER_TOKEN);

        assert_eq!(decode_quantity("0x00").unwrap(), 0);
        assert_eq!(decode_quantity("0x0a").unwrap(), 10);
    }

    #[test]
    fn test_decode_quantity_rejects_bad_input() {
        assert!(decode_quantity("0x").is_err());
        assert!(decode_quantity("0xzz").is_err());

        // 2^128, one past the supported width
        let too_wide = format!("0x{}01{}", "0".repeat(30), "0".repeat(32));
        assert!(matches!(
            decode_quantity(&too_wide),
            Err(StreamboardError::InvalidAmount(_))
        ));
    }

    #[test_case("1", RAW_PER_TOKEN; "whole token")]
    #[test_case("0.5", RAW_PER_TOKEN / 2; "half token")]
    #[test_case("1.5", RAW_PER_TOKEN + RAW_PER_TOKEN / 2; "token and a half")]
    #[test_case(".25", RAW_PER_TOKEN / 4; "bare fraction")]
    #[test_case("0.000000000000000001", 1; "one raw unit")]
    #[test_case(" 2 ", 2 * RAW_PER_TOKEN; "surrounding whitespace")]
    fn test_parse_token_amount(input: &str, expected: u128) {
        assert_eq!(parse_token_amount(input).unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("."; "lone dot")]
    #[test_case("abc"; "letters")]
    #[test_case("1..2"; "double dot")]
    #[test_case("-1"; "negative")]
    #[test_case("1.0000000000000000001"; "nineteen fractional digits")]
    #[test_case("400000000000000000000000"; "overflows raw units")]
    fn test_parse_token_amount_rejects(input: &str) {
        assert!(matches!(
            parse_token_amount(input),
            Err(StreamboardError::InvalidAmount(_))
        ));
    }
}
