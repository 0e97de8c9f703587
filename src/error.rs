use thiserror::Error;

/// Malformed input, rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid status value: {0}")]
    InvalidStatus(String),
    #[error("{0} cannot be empty")]
    EmptyText(&'static str),
    #[error("Invalid month index: {0}")]
    InvalidMonthIndex(String),
    #[error("Cost is not a number: {0}")]
    NotANumber(String),
    #[error("Cost cannot be negative")]
    NegativeCost,
    #[error("Cost cannot exceed {max}")]
    CostTooLarge { max: rust_decimal::Decimal },
}

/// Failure result of a mutation. Carries a human-readable message via `Display`.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Storage failure: {0:#}")]
    Persistence(anyhow::Error),
}
