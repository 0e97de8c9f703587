#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("TELEPHONY", 20), "TELEPHONY");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("SECURITY CAMERAS", 8), "SECURIT…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("Telefonía IP", 10), "Telefonía…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_whole() {
    assert_eq!(format_amount(dec!(27534)), "$27,534");
    assert_eq!(format_amount(dec!(250)), "$250");
    assert_eq!(format_amount(dec!(1000000)), "$1,000,000");
}

#[test]
fn test_format_amount_drops_trailing_zeros() {
    assert_eq!(format_amount(dec!(3250.00)), "$3,250");
    assert_eq!(format_amount(dec!(12.50)), "$12.5");
    assert_eq!(format_amount(dec!(12.35)), "$12.35");
}

#[test]
fn test_format_amount_rounds_to_cents() {
    assert_eq!(format_amount(dec!(0.005)), "$0.01");
    assert_eq!(format_amount(dec!(999999.999)), "$1,000,000");
}

#[test]
fn test_format_amount_zero_and_negative() {
    assert_eq!(format_amount(Decimal::ZERO), "$0");
    assert_eq!(format_amount(dec!(-1234.5)), "-$1,234.5");
    assert_eq!(format_amount(dec!(-0.001)), "$0");
}
