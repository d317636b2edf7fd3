//! Snapshot export/import command implementations

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use nestegg_core::{db::Database, ImportStats};

fn print_stats(stats: &ImportStats) {
    println!("   Accounts: {}", stats.accounts);
    println!("   Transactions: {}", stats.transactions);
    println!("   Budgets: {}", stats.budgets);
    println!("   Investments: {}", stats.investments);
    println!("   Insights: {}", stats.insights);
}

/// Export the whole ledger to a JSON snapshot
pub fn cmd_export(db: &Database, output: &Path) -> Result<()> {
    if output.exists() {
        anyhow::bail!(
            "Output file already exists: {}\nUse a different filename or remove the existing file.",
            output.display()
        );
    }

    println!("📦 Exporting ledger snapshot...");

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let stats = db
        .export_snapshot(BufWriter::new(file))
        .context("Failed to write snapshot")?;

    println!("✅ Snapshot exported to: {}", output.display());
    print_stats(&stats);

    Ok(())
}

/// Replace the ledger with the contents of a JSON snapshot.
///
/// The snapshot is validated in full before anything is written; a bad
/// snapshot leaves the current ledger untouched.
pub fn cmd_import(db: &Database, input: &Path) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Snapshot file not found: {}", input.display());
    }

    println!("📦 Importing snapshot from: {}", input.display());

    let file = File::open(input)
        .with_context(|| format!("Failed to open snapshot file: {}", input.display()))?;
    let stats = db
        .import_snapshot(BufReader::new(file))
        .context("Failed to import snapshot")?;

    println!("✅ Ledger replaced");
    print_stats(&stats);

    Ok(())
}
