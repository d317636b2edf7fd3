//! Snapshot export and import
//!
//! A snapshot is the whole ledger as pretty-printed JSON, using the same
//! camelCase field names as the domain models. Imports are validated before
//! anything is written.

use std::io::{Read, Write};

use serde::Serialize;
use tracing::info;

use crate::db::Database;
use crate::error::Result;
use crate::models::LedgerSnapshot;

/// Counts of entities written by an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub accounts: usize,
    pub transactions: usize,
    pub budgets: usize,
    pub investments: usize,
    pub insights: usize,
}

impl From<&LedgerSnapshot> for ImportStats {
    fn from(snapshot: &LedgerSnapshot) -> Self {
        Self {
            accounts: snapshot.accounts.len(),
            transactions: snapshot.transactions.len(),
            budgets: snapshot.budgets.len(),
            investments: snapshot.investments.len(),
            insights: snapshot.insights.len(),
        }
    }
}

/// Write `snapshot` as pretty JSON
pub fn write_snapshot<W: Write>(snapshot: &LedgerSnapshot, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Read and validate a snapshot. The first invalid entity aborts the read.
pub fn read_snapshot<R: Read>(reader: R) -> Result<LedgerSnapshot> {
    let snapshot: LedgerSnapshot = serde_json::from_reader(reader)?;
    snapshot.validate()?;
    Ok(snapshot)
}

impl Database {
    /// Export the current ledger
    pub fn export_snapshot<W: Write>(&self, writer: W) -> Result<ImportStats> {
        let snapshot = self.snapshot()?;
        write_snapshot(&snapshot, writer)?;

        let stats = ImportStats::from(&snapshot);
        info!(?stats, "Ledger exported");
        Ok(stats)
    }

    /// Replace the ledger with a snapshot read from `reader`
    pub fn import_snapshot<R: Read>(&self, reader: R) -> Result<ImportStats> {
        let snapshot = read_snapshot(reader)?;
        self.replace_with(&snapshot)?;
        Ok(ImportStats::from(&snapshot))
    }
}
