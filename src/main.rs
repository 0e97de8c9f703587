mod calc;
mod config;
mod db;
mod error;
mod models;
mod ops;
mod report;
mod run;
mod seed;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    init_tracing(&config.log_filter);

    tracing::debug!(db = %config.db_path.display(), "opening database");
    let mut db = db::Database::open(&config.db_path)?;
    run::as_cli(&args, &mut db)
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter {filter:?} ({e}); using \"warn\"");
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
