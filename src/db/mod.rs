mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

/// Partial update of an item row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ItemPatch {
    pub(crate) description: Option<String>,
    pub(crate) status: Option<ItemStatus>,
    pub(crate) monthly_costs: Option<MonthlyCosts>,
    pub(crate) total: Option<Decimal>,
}

/// Partial update of a category row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CategoryPatch {
    pub(crate) title: Option<String>,
    pub(crate) total: Option<Decimal>,
    pub(crate) percentage: Option<String>,
}

/// Record store behind the mutation operations.
///
/// Writes become visible to the next read. There is no locking or
/// versioning: concurrent writers get last-write-wins per column.
pub(crate) trait BudgetStore {
    /// All categories with their items, in display order.
    fn fetch_all_categories(&self) -> Result<Vec<BudgetCategory>>;

    /// The item and the id of the category that owns it.
    fn find_item(&self, id: &str) -> Result<Option<(String, BudgetItem)>>;

    /// Returns `false` if no item has this id.
    fn update_item(&mut self, id: &str, patch: &ItemPatch) -> Result<bool>;

    /// Appends `item` to the category. Returns `false` if the category does not exist.
    fn create_item(&mut self, category_id: &str, item: &BudgetItem) -> Result<bool>;

    /// Returns `false` if no item has this id.
    fn delete_item(&mut self, id: &str) -> Result<bool>;

    /// Returns `false` if no category has this id.
    fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> Result<bool>;
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_if_empty(&crate::seed::plan())?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_if_empty(&crate::seed::plan())?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::debug!(version = schema::CURRENT_VERSION, "created schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()
            .context("Failed to read schema version")?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute_batch("DELETE FROM schema_version")?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// Load `plan` on first run. A database that already has categories is left alone.
    pub(crate) fn seed_if_empty(&mut self, plan: &[BudgetCategory]) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(false);
        }
        self.replace_all(plan)?;
        tracing::info!(categories = plan.len(), "seeded budget plan");
        Ok(true)
    }

    /// Drop every category and item and load `plan` in their place, atomically.
    pub(crate) fn replace_all(&mut self, plan: &[BudgetCategory]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM items", [])?;
        tx.execute("DELETE FROM categories", [])?;
        for (cat_pos, cat) in plan.iter().enumerate() {
            tx.execute(
                "INSERT INTO categories (id, title, position, total, percentage)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    cat.id,
                    cat.title,
                    cat_pos as i64,
                    cat.total.to_string(),
                    cat.percentage,
                ],
            )?;
            for (item_pos, item) in cat.items.iter().enumerate() {
                insert_item(&tx, &cat.id, item_pos as i64, item)?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl BudgetStore for Database {
    fn fetch_all_categories(&self) -> Result<Vec<BudgetCategory>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, total, percentage FROM categories ORDER BY position, rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(BudgetCategory {
                id: row.get(0)?,
                title: row.get(1)?,
                total: decimal_from_row(row, 2)?,
                percentage: row.get(3)?,
                items: Vec::new(),
            })
        })?;
        let mut categories = rows.collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT category_id, id, description, status, monthly_costs, total
             FROM items ORDER BY position, rowid",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, item_from_row(row, 1)?)))?;
        for row in rows {
            let (category_id, item) = row?;
            match categories.iter_mut().find(|c| c.id == category_id) {
                Some(cat) => cat.items.push(item),
                None => tracing::warn!(item = %item.id, category = %category_id, "orphaned item skipped"),
            }
        }

        Ok(categories)
    }

    fn find_item(&self, id: &str) -> Result<Option<(String, BudgetItem)>> {
        let found = self
            .conn
            .query_row(
                "SELECT category_id, id, description, status, monthly_costs, total
                 FROM items WHERE id = ?1",
                params![id],
                |row| Ok((row.get::<_, String>(0)?, item_from_row(row, 1)?)),
            )
            .optional()?;
        Ok(found)
    }

    fn update_item(&mut self, id: &str, patch: &ItemPatch) -> Result<bool> {
        let mut sets: Vec<String> = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(description) = &patch.description {
            param_values.push(Box::new(description.clone()));
            sets.push(format!("description = ?{}", param_values.len()));
        }
        if let Some(status) = patch.status {
            param_values.push(Box::new(status.as_str()));
            sets.push(format!("status = ?{}", param_values.len()));
        }
        if let Some(costs) = &patch.monthly_costs {
            param_values.push(Box::new(costs_to_json(costs)?));
            sets.push(format!("monthly_costs = ?{}", param_values.len()));
        }
        if let Some(total) = patch.total {
            param_values.push(Box::new(total.to_string()));
            sets.push(format!("total = ?{}", param_values.len()));
        }

        if sets.is_empty() {
            return Ok(self.find_item(id)?.is_some());
        }

        param_values.push(Box::new(id.to_string()));
        let sql = format!(
            "UPDATE items SET {} WHERE id = ?{}",
            sets.join(", "),
            param_values.len()
        );
        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let changed = self.conn.execute(&sql, params_ref.as_slice())?;
        Ok(changed > 0)
    }

    fn create_item(&mut self, category_id: &str, item: &BudgetItem) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let next_position: Option<i64> = tx
            .query_row(
                "SELECT (SELECT COALESCE(MAX(position) + 1, 0) FROM items WHERE category_id = ?1)
                 FROM categories WHERE id = ?1",
                params![category_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(position) = next_position else {
            return Ok(false);
        };
        insert_item(&tx, category_id, position, item)?;
        tx.commit()?;
        Ok(true)
    }

    fn delete_item(&mut self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> Result<bool> {
        let mut sets: Vec<String> = Vec::new();
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(title) = &patch.title {
            param_values.push(Box::new(title.clone()));
            sets.push(format!("title = ?{}", param_values.len()));
        }
        if let Some(total) = patch.total {
            param_values.push(Box::new(total.to_string()));
            sets.push(format!("total = ?{}", param_values.len()));
        }
        if let Some(percentage) = &patch.percentage {
            param_values.push(Box::new(percentage.clone()));
            sets.push(format!("percentage = ?{}", param_values.len()));
        }

        if sets.is_empty() {
            let exists: bool = self.conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )?;
            return Ok(exists);
        }

        param_values.push(Box::new(id.to_string()));
        let sql = format!(
            "UPDATE categories SET {} WHERE id = ?{}",
            sets.join(", "),
            param_values.len()
        );
        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let changed = self.conn.execute(&sql, params_ref.as_slice())?;
        Ok(changed > 0)
    }
}

fn insert_item(conn: &Connection, category_id: &str, position: i64, item: &BudgetItem) -> Result<()> {
    conn.execute(
        "INSERT INTO items (id, category_id, position, description, status, monthly_costs, total)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            item.id,
            category_id,
            position,
            item.description,
            item.status.as_str(),
            costs_to_json(&item.monthly_costs)?,
            item.total.to_string(),
        ],
    )?;
    Ok(())
}

fn costs_to_json(costs: &MonthlyCosts) -> Result<String> {
    serde_json::to_string(costs).context("Failed to encode monthly costs")
}

/// Reads `id, description, status, monthly_costs, total` starting at column `first`.
fn item_from_row(row: &Row<'_>, first: usize) -> rusqlite::Result<BudgetItem> {
    let status: String = row.get(first + 2)?;
    let costs: String = row.get(first + 3)?;
    let monthly_costs: MonthlyCosts = serde_json::from_str(&costs).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(first + 3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(BudgetItem {
        id: row.get(first)?,
        description: row.get(first + 1)?,
        status: ItemStatus::from_stored(&status),
        monthly_costs,
        total: decimal_from_row(row, first + 4)?,
    })
}

fn decimal_from_row(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
