//! Unit conversion helpers.

use alloy::primitives::U256;

use crate::error::{AppError, Result};

/// Format a U256 value with decimals to a human-readable string.
pub fn format_units(value: U256, decimals: u8) -> String {
    // Handle zero case explicitly
    if value == U256::ZERO {
        return "0".to_string();
    }

    let value_str = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return value_str;
    }

    let len = value_str.len();
    if len <= decimals {
        // Value is less than 1, pad with zeros
        let zeros = decimals - len;
        let decimal_part = value_str.trim_end_matches('0');
        if decimal_part.is_empty() {
            "0".to_string()
        } else {
            format!("0.{}{}", "0".repeat(zeros), decimal_part)
        }
    } else {
        // Split into integer and decimal parts
        let (integer, decimal) = value_str.split_at(len - decimals);
        let decimal = decimal.trim_end_matches('0');
        if decimal.is_empty() {
            integer.to_string()
        } else {
            format!("{}.{}", integer, decimal)
        }
    }
}

/// Convert a decimal cost string into the token's smallest unit.
///
/// The integer and fractional digits are concatenated and scaled by
/// `10^(decimals - fractional_digit_count)`; an integral input behaves as if
/// `.00` were appended. Costs with more fractional digits than the token
/// supports are rejected rather than rounded.
pub fn cost_to_token_amount(cost: &str, decimals: u8) -> Result<U256> {
    let cost = cost.trim();

    if cost.is_empty() {
        return Err(AppError::Parse("medical cost cannot be empty".into()));
    }
    if cost.starts_with('-') {
        return Err(AppError::Parse("medical cost cannot be negative".into()));
    }

    let (integer, fraction) = match cost.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (cost, "00"),
    };

    if !integer.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(AppError::Parse(format!("invalid medical cost: {}", cost)));
    }

    if fraction.len() > decimals as usize {
        return Err(AppError::Parse(format!(
            "medical cost {} has more fractional digits than the token's {} decimals",
            cost, decimals
        )));
    }

    let digits = format!("{}{}", integer, fraction);
    let amount = digits
        .parse::<U256>()
        .map_err(|_| AppError::Parse(format!("invalid medical cost: {}", cost)))?;

    let exponent = decimals as usize - fraction.len();
    Ok(amount * U256::from(10).pow(U256::from(exponent)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // format_units Tests
    // ========================================================================

    #[test]
    fn test_format_units() {
        // 1 ETH = 10^18 wei
        let one_eth = U256::from(1_000_000_000_000_000_000u64);
        assert_eq!(format_units(one_eth, 18), "1");

        // 0.5 ETH
        let half_eth = U256::from(500_000_000_000_000_000u64);
        assert_eq!(format_units(half_eth, 18), "0.5");
    }

    #[test]
    fn test_format_units_zero() {
        assert_eq!(format_units(U256::ZERO, 18), "0");
        assert_eq!(format_units(U256::ZERO, 0), "0");
    }

    #[test]
    fn test_format_units_small_values() {
        // 1 wei
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
        // 100 wei
        assert_eq!(format_units(U256::from(100u64), 18), "0.0000000000000001");
    }

    #[test]
    fn test_format_units_trailing_zeros_removed() {
        let value = U256::from(1_500_000_000_000_000_000u64);
        assert_eq!(format_units(value, 18), "1.5");
    }

    #[test]
    fn test_format_units_no_decimals() {
        assert_eq!(format_units(U256::from(12345u64), 0), "12345");
    }

    // ========================================================================
    // cost_to_token_amount Tests
    // ========================================================================

    #[test]
    fn test_cost_with_fraction() {
        // "12.34" @ 6 decimals = 1234 * 10^(6-2)
        let amount = cost_to_token_amount("12.34", 6).unwrap();
        assert_eq!(amount, U256::from(12_340_000u64));
    }

    #[test]
    fn test_cost_integral_input() {
        // Integral input behaves as "5.00"
        let amount = cost_to_token_amount("5", 6).unwrap();
        assert_eq!(amount, U256::from(5_000_000u64));
    }

    #[test]
    fn test_cost_fraction_only() {
        let amount = cost_to_token_amount("0.5", 6).unwrap();
        assert_eq!(amount, U256::from(500_000u64));
    }

    #[test]
    fn test_cost_eighteen_decimals() {
        let amount = cost_to_token_amount("1.5", 18).unwrap();
        assert_eq!(amount, U256::from(1_500_000_000_000_000_000u64));
    }

    #[test]
    fn test_cost_fraction_at_precision_limit() {
        let amount = cost_to_token_amount("0.123456", 6).unwrap();
        assert_eq!(amount, U256::from(123_456u64));
    }

    #[test]
    fn test_cost_excess_fraction_rejected() {
        let result = cost_to_token_amount("1.1234567", 6);
        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[test]
    fn test_cost_negative_rejected() {
        assert!(cost_to_token_amount("-1", 6).is_err());
        assert!(cost_to_token_amount("-0.5", 6).is_err());
    }

    #[test]
    fn test_cost_empty_rejected() {
        assert!(cost_to_token_amount("", 6).is_err());
        assert!(cost_to_token_amount("   ", 6).is_err());
        assert!(cost_to_token_amount(".", 6).is_err());
    }

    #[test]
    fn test_cost_invalid_format_rejected() {
        assert!(cost_to_token_amount("1.2.3", 6).is_err());
        assert!(cost_to_token_amount("12a.4", 6).is_err());
        assert!(cost_to_token_amount("12,4", 6).is_err());
    }

    #[test]
    fn test_cost_whitespace_trimmed() {
        let amount = cost_to_token_amount("  12.34  ", 6).unwrap();
        assert_eq!(amount, U256::from(12_340_000u64));
    }
}
