//! Ledger store with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `accounts` - Bank, card and brokerage accounts
//! - `transactions` - Transaction CRUD and round-up crediting
//! - `budgets` - Category budgets
//! - `investments` - Investment holdings
//! - `insights` - Financial insights and read state
//! - `settings` - Key-value user preferences
//!
//! Amounts are stored as TEXT decimals and timestamps as RFC 3339 TEXT so
//! nothing is lost to floating point.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Type;
use tracing::info;

use crate::error::Result;
use crate::models::LedgerSnapshot;

mod accounts;
mod budgets;
mod insights;
mod investments;
mod settings;
mod transactions;

pub use settings::{ROUND_UP_ENABLED_KEY, ROUND_UP_MULTIPLIER_KEY};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Format a timestamp for storage. Fixed width, so TEXT order is time order.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a TEXT column into any `FromStr` type, reporting the column on failure
pub(crate) fn parse_column<T>(idx: usize, value: &str) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("Invalid value '{}': {}", value, e).into(),
        )
    })
}

/// Parse an optional TEXT column
pub(crate) fn parse_optional_column<T>(idx: usize, value: Option<String>) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map(|v| parse_column(idx, &v)).transpose()
}

/// Ledger database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the ledger at `path` and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a unique temporary file rather than `:memory:` because each
    /// pooled connection would otherwise see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "nestegg_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Delete every ledger entity. Settings are preserved.
    pub fn clear(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
            DELETE FROM transactions;
            DELETE FROM accounts;
            DELETE FROM budgets;
            DELETE FROM investments;
            DELETE FROM insights;
            "#,
        )?;

        info!("Ledger cleared");
        Ok(())
    }

    /// Consistent read view of the whole ledger.
    ///
    /// All tables are read inside one SQL transaction on one connection, so a
    /// concurrent write is either fully visible or not at all.
    pub fn snapshot(&self) -> Result<LedgerSnapshot> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let snapshot = LedgerSnapshot {
            accounts: accounts::list_accounts(&tx)?,
            transactions: transactions::list_transactions(&tx)?,
            budgets: budgets::list_budgets(&tx)?,
            investments: investments::list_investments(&tx)?,
            insights: insights::list_insights(&tx)?,
        };

        tx.commit()?;
        Ok(snapshot)
    }

    /// Replace the ledger contents with `snapshot` in a single SQL transaction.
    ///
    /// The snapshot is validated first; nothing is written if any entity is
    /// invalid.
    pub fn replace_with(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        snapshot.validate()?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute_batch(
            r#"
            DELETE FROM transactions;
            DELETE FROM accounts;
            DELETE FROM budgets;
            DELETE FROM investments;
            DELETE FROM insights;
            "#,
        )?;

        for account in &snapshot.accounts {
            accounts::insert_account(&tx, account)?;
        }
        for transaction in &snapshot.transactions {
            transactions::insert_transaction(&tx, transaction)?;
        }
        for budget in &snapshot.budgets {
            budgets::insert_budget(&tx, budget)?;
        }
        for investment in &snapshot.investments {
            investments::insert_investment(&tx, investment)?;
        }
        for insight in &snapshot.insights {
            insights::insert_insight(&tx, insight)?;
        }

        tx.commit()?;

        info!(
            accounts = snapshot.accounts.len(),
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            investments = snapshot.investments.len(),
            insights = snapshot.insights.len(),
            "Ledger replaced from snapshot"
        );
        Ok(())
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block writers
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                account_type TEXT NOT NULL,
                balance TEXT NOT NULL,                -- decimal
                currency TEXT NOT NULL,
                last_four TEXT,
                institution TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_accounts_type ON accounts(account_type);

            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                amount TEXT NOT NULL,                 -- decimal, negative for outflows
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,                   -- RFC 3339, UTC
                transaction_type TEXT NOT NULL,
                merchant TEXT,
                round_up TEXT,                        -- recorded once at creation
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
            CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);
            CREATE INDEX IF NOT EXISTS idx_transactions_type ON transactions(transaction_type);

            CREATE TABLE IF NOT EXISTS budgets (
                id TEXT PRIMARY KEY,
                category TEXT NOT NULL,
                allocated TEXT NOT NULL,
                spent TEXT NOT NULL,
                period TEXT NOT NULL,
                color TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_budgets_category ON budgets(category);

            CREATE TABLE IF NOT EXISTS investments (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                value TEXT NOT NULL,
                initial_value TEXT NOT NULL,
                growth TEXT NOT NULL,
                investment_type TEXT NOT NULL,
                last_updated TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- At most one round-up target
            CREATE UNIQUE INDEX IF NOT EXISTS idx_investments_roundups
                ON investments(investment_type) WHERE investment_type = 'roundups';

            CREATE TABLE IF NOT EXISTS insights (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                insight_type TEXT NOT NULL,
                priority TEXT NOT NULL,
                date TEXT NOT NULL,
                read BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_insights_read ON insights(read, date);

            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
