mod category;
mod item;
mod month;

use rust_decimal::Decimal;

pub use category::BudgetCategory;
pub use item::{BudgetItem, ItemStatus};
pub use month::MonthIndex;

/// Months in the fiscal year.
pub const MONTHS: usize = 12;

/// Costs per month, index 0 = first month of the fiscal year.
pub type MonthlyCosts = [Decimal; MONTHS];

#[cfg(test)]
mod tests;
