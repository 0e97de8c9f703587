use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MonthlyCosts;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Strict parse for user input. Only the three wire names are accepted.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::InvalidStatus(other.to_string())),
        }
    }

    /// Lenient parse for stored rows. Rows written before statuses existed
    /// (or with a value we no longer know) are read back as pending.
    pub fn from_stored(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|_| {
            tracing::warn!(stored = s, "unknown stored item status, treating as pending");
            Self::Pending
        })
    }

    pub fn all() -> &'static [ItemStatus] {
        &[Self::Pending, Self::InProgress, Self::Completed]
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One budget line with its 12-month cost schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: String,
    pub description: String,
    pub status: ItemStatus,
    pub monthly_costs: MonthlyCosts,
    /// Derived: sum of `monthly_costs`.
    pub total: Decimal,
}

impl BudgetItem {
    /// A freshly added line: blank description, pending, all months zero.
    pub fn blank(id: String) -> Self {
        Self {
            id,
            description: String::new(),
            status: ItemStatus::Pending,
            monthly_costs: [Decimal::ZERO; super::MONTHS],
            total: Decimal::ZERO,
        }
    }

    pub fn find_by_id<'a>(items: &'a [BudgetItem], id: &str) -> Option<&'a BudgetItem> {
        items.iter().find(|i| i.id == id)
    }
}
