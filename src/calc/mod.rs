//! Pure aggregation over the budget tree.
//!
//! Item totals feed category totals, category totals feed the grand total,
//! and the grand total feeds every category's percentage. Nothing here
//! touches storage; callers pass the current state in and get new state back.

mod validate;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{BudgetCategory, BudgetItem, MonthlyCosts, MONTHS};

pub(crate) use validate::{validate_cost, validate_text, MAX_COST};

/// Ties round away from zero, i.e. half-up for the non-negative amounts we handle.
pub(crate) const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

pub(crate) fn item_total(monthly_costs: &MonthlyCosts) -> Decimal {
    monthly_costs.iter().sum()
}

/// Sums the stored `total` of each item. Item totals must already be current.
pub(crate) fn category_total(items: &[BudgetItem]) -> Decimal {
    items.iter().map(|i| i.total).sum()
}

/// Integer share of `grand_total` with a trailing `%`, or `"0%"` when there is
/// nothing to share. Shares are rounded independently and need not sum to 100.
pub(crate) fn category_percentage(category_total: Decimal, grand_total: Decimal) -> String {
    if grand_total <= Decimal::ZERO {
        return "0%".to_string();
    }
    let share = (category_total / grand_total * Decimal::ONE_HUNDRED).round_dp_with_strategy(0, ROUNDING);
    format!("{share}%")
}

pub(crate) fn grand_total(categories: &[BudgetCategory]) -> Decimal {
    categories.iter().map(|c| c.total).sum()
}

pub(crate) fn monthly_totals(categories: &[BudgetCategory]) -> MonthlyCosts {
    let mut totals = [Decimal::ZERO; MONTHS];
    for category in categories {
        add_item_costs(&mut totals, &category.items);
    }
    totals
}

/// Month-by-month subtotal of a single category.
pub(crate) fn category_monthly_totals(category: &BudgetCategory) -> MonthlyCosts {
    let mut totals = [Decimal::ZERO; MONTHS];
    add_item_costs(&mut totals, &category.items);
    totals
}

fn add_item_costs(totals: &mut MonthlyCosts, items: &[BudgetItem]) {
    for item in items {
        for (slot, cost) in totals.iter_mut().zip(item.monthly_costs.iter()) {
            *slot += *cost;
        }
    }
}

/// Recompute every derived field: item totals, then category totals, then
/// percentages against the new grand total. Idempotent.
pub(crate) fn recalculate_all(mut categories: Vec<BudgetCategory>) -> Vec<BudgetCategory> {
    for category in &mut categories {
        for item in &mut category.items {
            item.total = item_total(&item.monthly_costs);
        }
    }

    for category in &mut categories {
        category.total = category_total(&category.items);
    }

    let grand = grand_total(&categories);
    for category in &mut categories {
        category.percentage = category_percentage(category.total, grand);
    }

    categories
}
