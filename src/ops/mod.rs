//! Validated edits to the budget, each followed by whatever recalculation
//! its scope needs.
//!
//! Every operation takes the store explicitly. Input is validated before the
//! store is touched, so a rejected call has no side effects. The primary
//! write and the recalculation that follows are separate steps: if the
//! second fails the first stands, and the failure is logged and reported in
//! [`Outcome::totals_stale`] rather than rolled back.

use crate::calc;
use crate::db::{BudgetStore, CategoryPatch, ItemPatch};
use crate::error::BudgetError;
use crate::models::{BudgetCategory, BudgetItem, ItemStatus, MonthIndex};

type Result<T> = std::result::Result<T, BudgetError>;

/// Result of a successful primary write.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Outcome<T> {
    pub(crate) value: T,
    /// Set when the follow-up recalculation failed; derived totals may lag
    /// until the next successful write or an explicit [`recalculate`].
    pub(crate) totals_stale: Option<String>,
}

impl<T> Outcome<T> {
    fn fresh(value: T) -> Self {
        Self { value, totals_stale: None }
    }
}

fn persistence(err: anyhow::Error) -> BudgetError {
    BudgetError::Persistence(err)
}

/// Read path: every category with derived fields recomputed from the raw costs.
pub(crate) fn load_budget<S: BudgetStore>(store: &S) -> Result<Vec<BudgetCategory>> {
    let categories = store.fetch_all_categories().map_err(persistence)?;
    Ok(calc::recalculate_all(categories))
}

/// Recompute all derived fields and write back the ones that drifted.
/// Returns how many rows were rewritten.
pub(crate) fn recalculate<S: BudgetStore>(store: &mut S) -> Result<usize> {
    let stored = store.fetch_all_categories().map_err(persistence)?;
    let fresh = calc::recalculate_all(stored.clone());
    let mut written = 0;

    for (old, new) in stored.iter().zip(fresh.iter()) {
        for (old_item, new_item) in old.items.iter().zip(new.items.iter()) {
            if old_item.total != new_item.total {
                let patch = ItemPatch {
                    total: Some(new_item.total),
                    ..ItemPatch::default()
                };
                store.update_item(&new_item.id, &patch).map_err(persistence)?;
                written += 1;
            }
        }

        if old.total != new.total || old.percentage != new.percentage {
            let patch = CategoryPatch {
                total: Some(new.total),
                percentage: Some(new.percentage.clone()),
                ..CategoryPatch::default()
            };
            store.update_category(&new.id, &patch).map_err(persistence)?;
            written += 1;
        }
    }

    tracing::debug!(written, "recalculated budget");
    Ok(written)
}

/// Follow-up pass after a write that changed amounts. Never fails the caller.
fn recalculate_after_write<S: BudgetStore, T>(store: &mut S, value: T) -> Outcome<T> {
    match recalculate(store) {
        Ok(_) => Outcome::fresh(value),
        Err(e) => {
            tracing::error!(error = %e, "recalculation failed after write; totals may be stale");
            Outcome {
                value,
                totals_stale: Some(e.to_string()),
            }
        }
    }
}

pub(crate) fn set_item_status<S: BudgetStore>(
    store: &mut S,
    item_id: &str,
    status: &str,
) -> Result<Outcome<ItemStatus>> {
    let status = ItemStatus::parse(status).inspect_err(|e| {
        tracing::warn!(item = item_id, error = %e, "rejected status change");
    })?;

    let patch = ItemPatch {
        status: Some(status),
        ..ItemPatch::default()
    };
    if !store.update_item(item_id, &patch).map_err(persistence)? {
        return Err(BudgetError::ItemNotFound(item_id.to_string()));
    }

    tracing::info!(item = item_id, %status, "updated item status");
    Ok(Outcome::fresh(status))
}

/// Overwrite one month of an item's schedule. `cost` is raw user input.
/// Returns the item as stored, with its new total.
pub(crate) fn set_item_monthly_cost<S: BudgetStore>(
    store: &mut S,
    item_id: &str,
    month_index: i64,
    cost: &str,
) -> Result<Outcome<BudgetItem>> {
    let (month, cost) = MonthIndex::try_from(month_index)
        .and_then(|month| calc::validate_cost(cost).map(|cost| (month, cost)))
        .inspect_err(|e| {
            tracing::warn!(item = item_id, month_index, error = %e, "rejected cost change");
        })?;

    let Some((_, mut item)) = store.find_item(item_id).map_err(persistence)? else {
        return Err(BudgetError::ItemNotFound(item_id.to_string()));
    };

    item.monthly_costs[month.get()] = cost;
    item.total = calc::item_total(&item.monthly_costs);

    let patch = ItemPatch {
        monthly_costs: Some(item.monthly_costs),
        total: Some(item.total),
        ..ItemPatch::default()
    };
    if !store.update_item(item_id, &patch).map_err(persistence)? {
        // deleted between the read and the write
        return Err(BudgetError::ItemNotFound(item_id.to_string()));
    }

    tracing::info!(item = item_id, month = month.label(), %cost, total = %item.total, "updated monthly cost");
    Ok(recalculate_after_write(store, item))
}

pub(crate) fn set_item_description<S: BudgetStore>(
    store: &mut S,
    item_id: &str,
    description: &str,
) -> Result<Outcome<String>> {
    let description = calc::validate_text(description, "Description")?;

    let patch = ItemPatch {
        description: Some(description.clone()),
        ..ItemPatch::default()
    };
    if !store.update_item(item_id, &patch).map_err(persistence)? {
        return Err(BudgetError::ItemNotFound(item_id.to_string()));
    }

    tracing::info!(item = item_id, "updated item description");
    Ok(Outcome::fresh(description))
}

pub(crate) fn set_category_title<S: BudgetStore>(
    store: &mut S,
    category_id: &str,
    title: &str,
) -> Result<Outcome<String>> {
    let title = calc::validate_text(title, "Title")?;

    let patch = CategoryPatch {
        title: Some(title.clone()),
        ..CategoryPatch::default()
    };
    if !store.update_category(category_id, &patch).map_err(persistence)? {
        return Err(BudgetError::CategoryNotFound(category_id.to_string()));
    }

    tracing::info!(category = category_id, "updated category title");
    Ok(Outcome::fresh(title))
}

/// Append a blank item to the category. Returns the new item.
pub(crate) fn add_item<S: BudgetStore>(store: &mut S, category_id: &str) -> Result<Outcome<BudgetItem>> {
    let item = BudgetItem::blank(uuid::Uuid::new_v4().to_string());

    if !store.create_item(category_id, &item).map_err(persistence)? {
        return Err(BudgetError::CategoryNotFound(category_id.to_string()));
    }

    tracing::info!(category = category_id, item = %item.id, "added item");
    Ok(recalculate_after_write(store, item))
}

/// Remove an item. Returns the removed item as it was stored.
pub(crate) fn delete_item<S: BudgetStore>(store: &mut S, item_id: &str) -> Result<Outcome<BudgetItem>> {
    let Some((category_id, item)) = store.find_item(item_id).map_err(persistence)? else {
        return Err(BudgetError::ItemNotFound(item_id.to_string()));
    };

    if !store.delete_item(item_id).map_err(persistence)? {
        return Err(BudgetError::ItemNotFound(item_id.to_string()));
    }

    tracing::info!(category = %category_id, item = item_id, total = %item.total, "deleted item");
    Ok(recalculate_after_write(store, item))
}
