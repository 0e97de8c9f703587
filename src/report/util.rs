use rust_decimal::Decimal;

use crate::calc::ROUNDING;

/// Format an amount with thousand separators and at most 2 decimal places,
/// dropping trailing zeros. e.g. `27534` → `"$27,534"`, `12.50` → `"$12.5"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs().round_dp_with_strategy(2, ROUNDING).normalize();
    let formatted = abs.to_string();
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next();

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO && !abs.is_zero() { "-" } else { "" };
    match dec_part {
        Some(d) => format!("{sign}${with_commas}.{d}"),
        None => format!("{sign}${with_commas}"),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}
