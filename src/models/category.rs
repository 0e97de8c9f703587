use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BudgetItem;

/// A named spending domain that owns its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: String,
    pub title: String,
    pub total: Decimal,
    /// Share of the grand total, e.g. `"22%"`.
    pub percentage: String,
    pub items: Vec<BudgetItem>,
}

impl BudgetCategory {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            total: Decimal::ZERO,
            percentage: "0%".to_string(),
            items: Vec::new(),
        }
    }

    pub fn find_by_id<'a>(categories: &'a [BudgetCategory], id: &str) -> Option<&'a BudgetCategory> {
        categories.iter().find(|c| c.id == id)
    }

    /// Find the category owning `item_id`.
    pub fn owner_of<'a>(categories: &'a [BudgetCategory], item_id: &str) -> Option<&'a BudgetCategory> {
        categories
            .iter()
            .find(|c| BudgetItem::find_by_id(&c.items, item_id).is_some())
    }
}

impl std::fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
