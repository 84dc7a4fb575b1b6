//! Size expressions such as `512`, `10K`, `1Mi` or `0x400`

use crate::error::ConfigError;

/// Scale suffixes. Binary forms come first so `Ki` is not read as `K`.
const SUFFIXES: [(&str, u64); 8] = [
    ("Ki", 1 << 10),
    ("Mi", 1 << 20),
    ("Gi", 1 << 30),
    ("Ti", 1 << 40),
    ("K", 1_000),
    ("M", 1_000_000),
    ("G", 1_000_000_000),
    ("T", 1_000_000_000_000),
];

/// Parse a byte count with an optional scale suffix.
///
/// `K`, `M`, `G` and `T` scale by powers of 1000; `Ki`, `Mi`, `Gi` and `Ti`
/// by powers of 1024. The number itself may use a `0x`, `0o` or `0b` prefix,
/// a leading `0` for octal, and `_` between digits.
pub fn parse_size(value: &str) -> Result<u64, ConfigError> {
    let (number, scale) = SUFFIXES
        .iter()
        .find_map(|(suffix, scale)| value.strip_suffix(suffix).map(|rest| (rest, *scale)))
        .unwrap_or((value, 1));

    let invalid = |reason: &str| ConfigError::InvalidSize {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let count = parse_integer(number.trim()).map_err(|reason| invalid(&reason))?;
    count
        .checked_mul(scale)
        .ok_or_else(|| invalid("value is too large"))
}

fn parse_integer(text: &str) -> Result<u64, String> {
    let unsigned = match text.as_bytes().first() {
        Some(b'-') => return Err("size cannot be negative".to_string()),
        Some(b'+') => &text[1..],
        Some(_) => text,
        None => return Err("missing number".to_string()),
    };

    let (digits, radix) = split_radix(unsigned);
    if digits.is_empty() {
        return Err("missing digits after prefix".to_string());
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err("'_' must separate digits".to_string());
    }

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    u64::from_str_radix(&digits, radix).map_err(|e| e.to_string())
}

fn split_radix(text: &str) -> (&str, u32) {
    let lower = text.get(..2).map(str::to_ascii_lowercase);
    match lower.as_deref() {
        Some("0x") => (&text[2..], 16),
        Some("0o") => (&text[2..], 8),
        Some("0b") => (&text[2..], 2),
        _ if text.len() > 1 && text.starts_with('0') => (&text[1..], 8),
        _ => (text, 10),
    }
}
