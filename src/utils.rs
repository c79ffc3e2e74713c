use anyhow::{anyhow, Result};

/// Ellipsis placed between the kept prefix and suffix of a shortened string
pub const ELLIPSIS: &str = "…";

/// Shorten `text` to its first `pre_len` and last `suf_len` characters.
///
/// Strings shorter than `pre_len + suf_len` are returned unchanged.
pub fn to_short(text: &str, pre_len: usize, suf_len: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < pre_len + suf_len {
        return text.to_string();
    }
    let prefix: String = chars[..pre_len].iter().collect();
    let suffix: String = chars[chars.len() - suf_len..].iter().collect();
    format!("{}{}{}", prefix, ELLIPSIS, suffix)
}

/// Shorten a transaction hash for notifications: `0x12345678…abcdef`
pub fn short_hash(hash: &str) -> String {
    if hash.len() > 18 && hash.is_ascii() {
        format!("{}{}{}", &hash[..10], ELLIPSIS, &hash[hash.len() - 6..])
    } else {
        hash.to_string()
    }
}

/// Split a backend fee string ("<amount> <token>") into its two parts.
///
/// A missing token yields an empty token part.
pub fn split_fee_string(fee_string: &str) -> (&str, &str) {
    match fee_string.trim().split_once(' ') {
        Some((amount, token)) => (amount, token.trim()),
        None => (fee_string.trim(), ""),
    }
}

/// Total cost line of the withdrawal screen: "<amount> <token> + <fee string>"
pub fn total_cost_string(amount: &str, token: &str, fee_string: &str) -> String {
    format!("{} {} + {}", amount, token, fee_string)
}

/// Format a non-negative decimal string shifted left by `decimals` places.
///
/// Works on the digits directly so chain base units (planck, wei) never go
/// through a float. Trailing fractional zeros are dropped.
///
/// # Errors
/// Returns an error if the value is empty or not a plain decimal number
pub fn format_balance(value: &str, decimals: u32) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Balance cannot be empty"));
    }

    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !is_digits(int_part) || !is_digits(frac_part) {
        return Err(anyhow!("Invalid balance '{}'", trimmed));
    }

    let digits = format!("{}{}", int_part, frac_part);
    let point = int_part.len() as i64 - i64::from(decimals);
    let (whole, fraction) = if point <= 0 {
        (String::new(), format!("{}{}", "0".repeat((-point) as usize), digits))
    } else {
        let point = point as usize;
        (digits[..point].to_string(), digits[point..].to_string())
    };

    let whole = match whole.trim_start_matches('0') {
        "" => "0",
        w => w,
    };
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        Ok(whole.to_string())
    } else {
        Ok(format!("{}.{}", whole, fraction))
    }
}

/// Format a fiat amount with thousands separators: 1234.5 -> "1,234.50"
pub fn format_fiat(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}.{}", grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== to_short tests ====================

    #[test]
    fn test_to_short_polkadot_address() {
        let address = "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5";
        assert_eq!(to_short(address, 10, 10), "15oF4uVJwm…bjMNHr6Sp5");
    }

    #[test]
    fn test_to_short_keeps_prefix_and_suffix() {
        let address = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
        let short = to_short(address, 10, 10);
        assert_eq!(short, format!("{}{}{}", &address[..10], ELLIPSIS, &address[address.len() - 10..]));
    }

    #[test]
    fn test_to_short_exactly_twenty_chars() {
        let text = "abcdefghij0123456789";
        assert_eq!(to_short(text, 10, 10), "abcdefghij…0123456789");
    }

    #[test]
    fn test_to_short_short_text_unchanged() {
        assert_eq!(to_short("alice", 10, 10), "alice");
        assert_eq!(to_short("", 10, 10), "");
    }

    #[test]
    fn test_short_hash() {
        let hash = "0x9f2c1d3e4b5a69788766554433221100ffeeddccbbaa99887766554433221100";
        assert_eq!(short_hash(hash), "0x9f2c1d3e…221100");
        assert!(short_hash(hash).contains(ELLIPSIS));
        assert_eq!(short_hash("0x1234"), "0x1234");
    }

    // ==================== fee / total tests ====================

    #[test]
    fn test_split_fee_string() {
        assert_eq!(split_fee_string("0.015 DOT"), ("0.015", "DOT"));
        assert_eq!(split_fee_string("0.015"), ("0.015", ""));
        assert_eq!(split_fee_string(""), ("", ""));
    }

    #[test]
    fn test_total_cost_string() {
        assert_eq!(total_cost_string("5", "DOT", "0.015 DOT"), "5 DOT + 0.015 DOT");
    }

    // ==================== format_balance tests ====================

    #[test]
    fn test_format_balance_no_shift() {
        assert_eq!(format_balance("5", 0).unwrap(), "5");
        assert_eq!(format_balance("0.015", 0).unwrap(), "0.015");
    }

    #[test]
    fn test_format_balance_planck_to_dot() {
        assert_eq!(format_balance("15000000000", 10).unwrap(), "1.5");
        assert_eq!(format_balance("10000000000", 10).unwrap(), "1");
    }

    #[test]
    fn test_format_balance_smaller_than_one_unit() {
        assert_eq!(format_balance("150000000", 10).unwrap(), "0.015");
        assert_eq!(format_balance("1", 12).unwrap(), "0.000000000001");
    }

    #[test]
    fn test_format_balance_leading_fraction() {
        assert_eq!(format_balance(".5", 0).unwrap(), "0.5");
        assert_eq!(format_balance("007", 0).unwrap(), "7");
    }

    #[test]
    fn test_format_balance_invalid() {
        assert!(format_balance("", 0).is_err());
        assert!(format_balance(".", 0).is_err());
        assert!(format_balance("-1", 0).is_err());
        assert!(format_balance("1.2.3", 0).is_err());
        assert!(format_balance("abc", 0).unwrap_err().to_string().contains("Invalid"));
    }

    // ==================== format_fiat tests ====================

    #[test]
    fn test_format_fiat() {
        assert_eq!(format_fiat(0.0), "0.00");
        assert_eq!(format_fiat(12.3), "12.30");
        assert_eq!(format_fiat(1234.5), "1,234.50");
        assert_eq!(format_fiat(1234567.891), "1,234,567.89");
        assert_eq!(format_fiat(-3.1), "3.10");
    }
}
