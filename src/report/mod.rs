//! Read-only renderings of a loaded budget: text tables for the terminal,
//! CSV for spreadsheets and JSON in the persisted shape.

mod util;

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::io::Write;

use crate::calc;
use crate::models::{BudgetCategory, ItemStatus, MonthIndex};

pub(crate) use util::{format_amount, truncate};

const TITLE_WIDTH: usize = 44;
const DESC_WIDTH: usize = 30;
const MONTH_WIDTH: usize = 9;
const TOTAL_WIDTH: usize = 11;

/// Number of items in each status, in `ItemStatus::all()` order.
pub(crate) fn status_counts(categories: &[BudgetCategory]) -> Vec<(ItemStatus, usize)> {
    ItemStatus::all()
        .iter()
        .map(|status| {
            let n = categories
                .iter()
                .flat_map(|c| c.items.iter())
                .filter(|i| i.status == *status)
                .count();
            (*status, n)
        })
        .collect()
}

/// Executive summary: one row per category with its total and share.
pub(crate) fn summary(categories: &[BudgetCategory]) -> String {
    let mut out = String::new();
    let rule = "─".repeat(TITLE_WIDTH + TOTAL_WIDTH + 8);

    let _ = writeln!(out, "{:<TITLE_WIDTH$} {:>TOTAL_WIDTH$} {:>6}", "Category", "Total", "Share");
    let _ = writeln!(out, "{rule}");
    for cat in categories {
        let _ = writeln!(
            out,
            "{:<TITLE_WIDTH$} {:>TOTAL_WIDTH$} {:>6}",
            truncate(&cat.title, TITLE_WIDTH),
            format_amount(cat.total),
            cat.percentage
        );
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<TITLE_WIDTH$} {:>TOTAL_WIDTH$}",
        "Grand total",
        format_amount(calc::grand_total(categories))
    );

    let item_count: usize = categories.iter().map(|c| c.items.len()).sum();
    let by_status = status_counts(categories)
        .iter()
        .map(|(status, n)| format!("{status} {n}"))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Items: {item_count} ({by_status})");
    out
}

/// Month-by-month table for every category, with subtotals and a final
/// row of monthly totals. Empty months show as `—`.
pub(crate) fn breakdown(categories: &[BudgetCategory]) -> String {
    let mut out = String::new();
    let header = month_header("Description");

    for cat in categories {
        let _ = writeln!(out, "{}  [{}]", cat.title, cat.id);
        let _ = writeln!(out, "{header}");
        for item in &cat.items {
            let description = if item.description.is_empty() {
                format!("({})", item.id)
            } else {
                item.description.clone()
            };
            let _ = writeln!(
                out,
                "{}",
                month_row(&description, &item.monthly_costs, item.total)
            );
        }
        let _ = writeln!(
            out,
            "{}",
            month_row("Subtotal", &calc::category_monthly_totals(cat), cat.total)
        );
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", month_header("MONTHLY TOTALS"));
    let _ = writeln!(
        out,
        "{}",
        month_row(
            "All categories",
            &calc::monthly_totals(categories),
            calc::grand_total(categories)
        )
    );
    out
}

fn month_header(first: &str) -> String {
    let mut line = format!("{first:<DESC_WIDTH$}");
    for label in MonthIndex::labels() {
        let _ = write!(line, " {label:>MONTH_WIDTH$}");
    }
    let _ = write!(line, " {:>TOTAL_WIDTH$}", "Total");
    line
}

fn month_row(label: &str, costs: &crate::models::MonthlyCosts, total: rust_decimal::Decimal) -> String {
    let mut line = format!("{:<DESC_WIDTH$}", truncate(label, DESC_WIDTH));
    for cost in costs {
        let cell = if cost.is_zero() {
            "—".to_string()
        } else {
            format_amount(*cost)
        };
        let _ = write!(line, " {cell:>MONTH_WIDTH$}");
    }
    let _ = write!(line, " {:>TOTAL_WIDTH$}", format_amount(total));
    line
}

/// One CSV row per item. Amounts are written as plain decimals.
/// Returns the number of item rows written.
pub(crate) fn write_csv<W: Write>(categories: &[BudgetCategory], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["category_id", "category", "item_id", "description", "status"];
    header.extend(MonthIndex::labels().iter().copied());
    header.push("total");
    wtr.write_record(&header).context("Failed to write CSV header")?;

    let mut count = 0;
    for cat in categories {
        for item in &cat.items {
            let mut record = vec![
                cat.id.clone(),
                cat.title.clone(),
                item.id.clone(),
                item.description.clone(),
                item.status.as_str().to_string(),
            ];
            record.extend(item.monthly_costs.iter().map(|c| c.to_string()));
            record.push(item.total.to_string());
            wtr.write_record(&record)
                .with_context(|| format!("Failed to write CSV row for item {}", item.id))?;
            count += 1;
        }
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(count)
}

/// The persisted shape: categories with their items, amounts as decimal strings.
pub(crate) fn to_json(categories: &[BudgetCategory]) -> Result<String> {
    serde_json::to_string_pretty(categories).context("Failed to encode budget as JSON")
}


#[cfg(test)]
mod util_tests;
