use crate::store::KvNode;
use crate::{InventoryError, Result};

/// Text of a property that must be a terminal key.
pub(crate) fn leaf_value(node: &KvNode) -> Result<&str> {
    if node.is_dir() {
        return Err(InventoryError::InvalidShape {
            key: node.key.clone(),
            reason: "expected a key, found a directory".to_string(),
        });
    }
    Ok(node.value_or_empty())
}

/// Unsigned values are plain base-10 digits; `FromStr` alone would also take
/// a leading `+`.
fn check_unsigned(key: &str, raw: &str) -> Result<()> {
    match raw.as_bytes().first() {
        Some(first) if !first.is_ascii_digit() => Err(InventoryError::malformed(
            key,
            raw,
            "expected an unsigned base-10 integer",
        )),
        _ => Ok(()),
    }
}

/// 32-bit unsigned, widened for storage.
pub(crate) fn parse_u32(key: &str, raw: &str) -> Result<usize> {
    check_unsigned(key, raw)?;
    raw.parse::<u32>()
        .map(|value| value as usize)
        .map_err(|error| InventoryError::malformed(key, raw, error))
}

pub(crate) fn parse_u64(key: &str, raw: &str) -> Result<u64> {
    check_unsigned(key, raw)?;
    raw.parse::<u64>()
        .map_err(|error| InventoryError::malformed(key, raw, error))
}

pub(crate) fn parse_f64(key: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|error| InventoryError::malformed(key, raw, error))
}

/// Accepts `true`/`false` and the `1`/`0` form lsblk reports.
pub(crate) fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(InventoryError::malformed(
            key,
            raw,
            "expected one of true, false, 1, 0",
        )),
    }
}
