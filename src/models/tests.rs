#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::ValidationError;

// ── ItemStatus ────────────────────────────────────────────────

#[test]
fn test_status_parse() {
    assert_eq!(ItemStatus::parse("pending").unwrap(), ItemStatus::Pending);
    assert_eq!(ItemStatus::parse("in-progress").unwrap(), ItemStatus::InProgress);
    assert_eq!(ItemStatus::parse("completed").unwrap(), ItemStatus::Completed);
}

#[test]
fn test_status_parse_is_strict() {
    for bad in ["Pending", "in_progress", "done", "", " pending"] {
        assert_eq!(
            ItemStatus::parse(bad),
            Err(ValidationError::InvalidStatus(bad.to_string())),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_status_from_stored_falls_back_to_pending() {
    assert_eq!(ItemStatus::from_stored("completed"), ItemStatus::Completed);
    assert_eq!(ItemStatus::from_stored(""), ItemStatus::Pending);
    assert_eq!(ItemStatus::from_stored("archived"), ItemStatus::Pending);
}

#[test]
fn test_status_roundtrip() {
    for s in ItemStatus::all() {
        assert_eq!(ItemStatus::parse(s.as_str()).unwrap(), *s);
        assert_eq!(format!("{s}"), s.as_str());
    }
}

#[test]
fn test_status_serde_names() {
    assert_eq!(
        serde_json::to_string(&ItemStatus::InProgress).unwrap(),
        "\"in-progress\""
    );
}

// ── MonthIndex ────────────────────────────────────────────────

#[test]
fn test_month_index_bounds() {
    assert_eq!(MonthIndex::try_from(0).unwrap().get(), 0);
    assert_eq!(MonthIndex::try_from(11).unwrap().get(), 11);
    assert!(MonthIndex::try_from(-1).is_err());
    assert!(MonthIndex::try_from(12).is_err());
}

#[test]
fn test_month_number_rejects_non_integers() {
    assert_eq!(MonthIndex::from_month_number(" 3 ").unwrap().get(), 2);
    for bad in ["1.5", "abc", "", "-1", "13", "1e1"] {
        assert!(MonthIndex::from_month_number(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn test_month_number_is_one_based() {
    assert_eq!(MonthIndex::from_month_number("1").unwrap().get(), 0);
    assert_eq!(MonthIndex::from_month_number("12").unwrap().get(), 11);
    assert_eq!(
        MonthIndex::from_month_number("13"),
        Err(ValidationError::InvalidMonthIndex("13".into()))
    );
    assert!(MonthIndex::from_month_number("0").is_err());
}

#[test]
fn test_month_labels() {
    assert_eq!(MonthIndex::try_from(0).unwrap().label(), "Jan");
    assert_eq!(MonthIndex::try_from(11).unwrap().label(), "Dec");
    assert_eq!(MonthIndex::labels().len(), MONTHS);
}

// ── BudgetItem / BudgetCategory ───────────────────────────────

#[test]
fn test_blank_item() {
    let item = BudgetItem::blank("x".into());
    assert_eq!(item.id, "x");
    assert!(item.description.is_empty());
    assert_eq!(item.status, ItemStatus::Pending);
    assert_eq!(item.monthly_costs, [Decimal::ZERO; MONTHS]);
    assert_eq!(item.total, Decimal::ZERO);
}

#[test]
fn test_new_category_defaults() {
    let cat = BudgetCategory::new("c".into(), "Telephony".into());
    assert!(cat.items.is_empty());
    assert_eq!(cat.total, Decimal::ZERO);
    assert_eq!(cat.percentage, "0%");
    assert_eq!(format!("{cat}"), "Telephony");
}

#[test]
fn test_category_lookup() {
    let mut a = BudgetCategory::new("a".into(), "A".into());
    a.items.push(BudgetItem::blank("a-1".into()));
    let mut b = BudgetCategory::new("b".into(), "B".into());
    b.items.push(BudgetItem::blank("b-1".into()));
    let cats = vec![a, b];

    assert_eq!(BudgetCategory::find_by_id(&cats, "b").unwrap().title, "B");
    assert!(BudgetCategory::find_by_id(&cats, "z").is_none());
    assert_eq!(BudgetCategory::owner_of(&cats, "b-1").unwrap().id, "b");
    assert!(BudgetCategory::owner_of(&cats, "z-1").is_none());
}

#[test]
fn test_item_serializes_in_persisted_shape() {
    let mut item = BudgetItem::blank("i".into());
    item.monthly_costs[11] = dec!(12.35);
    item.total = dec!(12.35);
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["monthlyCosts"][11], "12.35");
    assert_eq!(json["total"], "12.35");
    assert_eq!(json["status"], "pending");
}
