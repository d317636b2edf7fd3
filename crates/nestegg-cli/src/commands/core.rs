//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the ledger database
//! - `cmd_init` - Create the ledger, optionally with sample data

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use nestegg_core::{db::Database, demo::demo_snapshot};

/// Open (and migrate) the ledger database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path, demo: bool) -> Result<()> {
    println!("🔧 Initializing ledger at {}...", db_path.display());

    let db = open_db(db_path)?;

    if demo {
        let existing = db.snapshot()?;
        if !existing.accounts.is_empty() || !existing.transactions.is_empty() {
            anyhow::bail!(
                "Ledger at {} already has data; refusing to overwrite it with the demo ledger",
                db_path.display()
            );
        }

        let snapshot = demo_snapshot(Utc::now()).context("Failed to build demo ledger")?;
        db.replace_with(&snapshot)
            .context("Failed to load demo ledger")?;
        println!(
            "   Loaded demo ledger: {} accounts, {} transactions, {} budgets",
            snapshot.accounts.len(),
            snapshot.transactions.len(),
            snapshot.budgets.len()
        );
    }

    println!("✅ Ledger initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. See where you stand: nestegg dashboard");
    println!("  2. Record spending: nestegg transactions add 4.25 \"Coffee\" --category Dining");
    println!("  3. Look ahead: nestegg forecast --demo-schedule");

    Ok(())
}
