use anyhow::{Context, Result};
use std::path::PathBuf;

const DB_ENV: &str = "ITBUDGET_DB";
const LOG_ENV: &str = "ITBUDGET_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"itbudget=debug"`.
    pub(crate) log_filter: String,
}

impl Config {
    /// `ITBUDGET_DB` overrides the database location; `ITBUDGET_LOG` (or
    /// `RUST_LOG`) sets the log filter.
    pub(crate) fn from_env() -> Result<Self> {
        Self::resolve(
            std::env::var(DB_ENV).ok(),
            std::env::var(LOG_ENV).ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn resolve(
        db_override: Option<String>,
        log: Option<String>,
        rust_log: Option<String>,
    ) -> Result<Self> {
        let db_path = match db_override.filter(|p| !p.trim().is_empty()) {
            Some(p) => PathBuf::from(crate::run::shellexpand(&p)),
            None => default_db_path()?,
        };
        let log_filter = log
            .or(rust_log)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Ok(Self { db_path, log_filter })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "itbudget", "ITBudget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("itbudget.db"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_db_override() {
        let cfg = Config::resolve(Some("/tmp/plan.db".into()), None, None).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/plan.db"));
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn test_log_filter_precedence() {
        let cfg = Config::resolve(
            Some("/tmp/plan.db".into()),
            Some("itbudget=debug".into()),
            Some("info".into()),
        )
        .unwrap();
        assert_eq!(cfg.log_filter, "itbudget=debug");

        let cfg = Config::resolve(Some("/tmp/plan.db".into()), None, Some("info".into())).unwrap();
        assert_eq!(cfg.log_filter, "info");

        let cfg = Config::resolve(Some("/tmp/plan.db".into()), Some("  ".into()), None).unwrap();
        assert_eq!(cfg.log_filter, "warn");
    }
}
