use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;

use crate::db::Database;
use crate::calc;
use crate::models::{BudgetCategory, MonthIndex};
use crate::ops::{self, Outcome};
use crate::report::{self, format_amount};
use crate::seed;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    let Some(command) = args.get(1) else {
        return cli_summary(db);
    };
    match command.as_str() {
        "summary" | "s" => cli_summary(db),
        "show" => cli_show(&args[2..], db),
        "monthly" | "m" => cli_monthly(db),
        "status" => cli_status(&args[2..], db),
        "cost" => cli_cost(&args[2..], db),
        "describe" => cli_describe(&args[2..], db),
        "title" => cli_title(&args[2..], db),
        "add" => cli_add(&args[2..], db),
        "delete" | "rm" => cli_delete(&args[2..], db),
        "recalc" => cli_recalc(db),
        "reset" => cli_reset(db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("itbudget {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("itbudget — annual IT budget plan");
    println!();
    println!("Usage: itbudget [command]");
    println!();
    println!("Commands:");
    println!("  summary                       Category totals and shares (default)");
    println!("  show [category|item]          Month-by-month breakdown");
    println!("  monthly                       Totals for each month across all categories");
    println!("  status <item> <status>        Set status: pending, in-progress, completed");
    println!("  cost <item> <month> <amount>  Set the cost for month 1-12 (0 to {})", format_amount(calc::MAX_COST));
    println!("  describe <item> <text…>       Set an item's description");
    println!("  title <category> <text…>      Set a category's title");
    println!("  add <category>                Append a blank item");
    println!("  delete <item>                 Remove an item");
    println!("  recalc                        Recompute and store all totals");
    println!("  reset                         Replace the budget with the {} plan", seed::PLAN_YEAR);
    println!("  export [path]                 Export items to CSV");
    println!("    --json                      Export the full budget as JSON instead");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment: ITBUDGET_DB (database path), ITBUDGET_LOG (log filter)");
}

fn required<'a>(args: &'a [String], idx: usize, what: &str) -> Result<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("Missing {what}. See `itbudget help`."))
}

fn rest(args: &[String], from: usize, what: &str) -> Result<String> {
    if args.len() <= from {
        anyhow::bail!("Missing {what}. See `itbudget help`.");
    }
    Ok(args[from..].join(" "))
}

fn warn_if_stale<T>(outcome: &Outcome<T>) {
    if let Some(reason) = &outcome.totals_stale {
        eprintln!("Warning: saved, but totals could not be refreshed ({reason}).");
        eprintln!("Run `itbudget recalc` to bring them up to date.");
    }
}

fn cli_summary(db: &mut Database) -> Result<()> {
    let categories = ops::load_budget(db)?;
    println!(
        "IT Budget {} — {}",
        seed::PLAN_YEAR,
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    println!();
    print!("{}", report::summary(&categories));
    Ok(())
}

/// `show` takes an optional category or item id; an item id shows its category.
fn cli_show(args: &[String], db: &mut Database) -> Result<()> {
    let categories = ops::load_budget(db)?;
    let Some(filter) = args.first() else {
        print!("{}", report::breakdown(&categories));
        return Ok(());
    };

    let category = BudgetCategory::find_by_id(&categories, filter)
        .or_else(|| BudgetCategory::owner_of(&categories, filter))
        .ok_or_else(|| anyhow::anyhow!("No category or item with id {filter}"))?;
    print!("{}", report::breakdown(std::slice::from_ref(category)));
    Ok(())
}

fn cli_monthly(db: &mut Database) -> Result<()> {
    let categories = ops::load_budget(db)?;
    let totals = calc::monthly_totals(&categories);

    println!("{:<6} {:>12}", "Month", "Total");
    println!("{}", "─".repeat(19));
    for (label, total) in MonthIndex::labels().iter().zip(totals.iter()) {
        println!("{label:<6} {:>12}", format_amount(*total));
    }
    println!("{}", "─".repeat(19));
    println!("{:<6} {:>12}", "Year", format_amount(calc::grand_total(&categories)));
    Ok(())
}

fn cli_status(args: &[String], db: &mut Database) -> Result<()> {
    let item_id = required(args, 0, "item id")?;
    let status = required(args, 1, "status")?;

    let outcome = ops::set_item_status(db, item_id, status)?;
    println!("{item_id}: {}", outcome.value);
    warn_if_stale(&outcome);
    Ok(())
}

fn cli_cost(args: &[String], db: &mut Database) -> Result<()> {
    let item_id = required(args, 0, "item id")?;
    let month = MonthIndex::from_month_number(required(args, 1, "month (1-12)")?)?;
    let amount = required(args, 2, "amount")?;

    let month_index = i64::try_from(month.get()).context("Month index out of range")?;
    let outcome = ops::set_item_monthly_cost(db, item_id, month_index, amount)?;
    let item = &outcome.value;
    println!(
        "{item_id}: {} = {} (item total {})",
        month.label(),
        format_amount(item.monthly_costs[month.get()]),
        format_amount(item.total)
    );
    warn_if_stale(&outcome);
    Ok(())
}

fn cli_describe(args: &[String], db: &mut Database) -> Result<()> {
    let item_id = required(args, 0, "item id")?;
    let text = rest(args, 1, "description")?;

    let outcome = ops::set_item_description(db, item_id, &text)?;
    println!("{item_id}: {}", outcome.value);
    warn_if_stale(&outcome);
    Ok(())
}

fn cli_title(args: &[String], db: &mut Database) -> Result<()> {
    let category_id = required(args, 0, "category id")?;
    let text = rest(args, 1, "title")?;

    let outcome = ops::set_category_title(db, category_id, &text)?;
    println!("{category_id}: {}", outcome.value);
    warn_if_stale(&outcome);
    Ok(())
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    let category_id = required(args, 0, "category id")?;

    let outcome = ops::add_item(db, category_id)?;
    println!("Added item {} to {category_id}", outcome.value.id);
    println!("Set its description with `itbudget describe {} <text>`", outcome.value.id);
    warn_if_stale(&outcome);
    Ok(())
}

fn cli_delete(args: &[String], db: &mut Database) -> Result<()> {
    let item_id = required(args, 0, "item id")?;

    let outcome = ops::delete_item(db, item_id)?;
    let item = &outcome.value;
    println!(
        "Deleted {item_id} ({}, {}, {})",
        if item.description.is_empty() { "no description" } else { item.description.as_str() },
        format_amount(item.total),
        item.status
    );
    warn_if_stale(&outcome);
    Ok(())
}

fn cli_recalc(db: &mut Database) -> Result<()> {
    let written = ops::recalculate(db)?;
    if written == 0 {
        println!("All totals up to date");
    } else {
        println!("Updated {written} stored totals");
    }
    Ok(())
}

fn cli_reset(db: &mut Database) -> Result<()> {
    let plan = seed::plan();
    db.replace_all(&plan)?;
    let items: usize = plan.iter().map(|c| c.items.len()).sum();
    println!(
        "Restored the {} plan: {} categories, {items} items, {}",
        seed::PLAN_YEAR,
        plan.len(),
        format_amount(calc::grand_total(&plan))
    );
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let json = args.iter().any(|a| a == "--json");
    let ext = if json { "json" } else { "csv" };

    // Output path is the first non-flag argument
    let output_path = args
        .iter()
        .find(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/itbudget-{}.{ext}", seed::PLAN_YEAR)
        });

    let categories = ops::load_budget(db)?;
    if json {
        let body = report::to_json(&categories)?;
        std::fs::write(&output_path, body)
            .with_context(|| format!("Failed to write {output_path}"))?;
        println!("Exported {} categories to {output_path}", categories.len());
    } else {
        let file = File::create(&output_path)
            .with_context(|| format!("Failed to create {output_path}"))?;
        let count = report::write_csv(&categories, BufWriter::new(file))?;
        if count == 0 {
            println!("No items to export");
        } else {
            println!("Exported {count} items to {output_path}");
        }
    }
    tracing::debug!(path = %output_path, json, "exported budget");
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
