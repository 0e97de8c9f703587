pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    position    INTEGER NOT NULL DEFAULT 0,
    total       TEXT NOT NULL DEFAULT '0',
    percentage  TEXT NOT NULL DEFAULT '0%'
);

CREATE TABLE IF NOT EXISTS items (
    id             TEXT PRIMARY KEY,
    category_id    TEXT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
    position       INTEGER NOT NULL DEFAULT 0,
    description    TEXT NOT NULL DEFAULT '',
    status         TEXT NOT NULL DEFAULT 'pending',
    monthly_costs  TEXT NOT NULL,
    total          TEXT NOT NULL DEFAULT '0'
);

CREATE INDEX IF NOT EXISTS idx_items_category ON items(category_id, position);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
