//! Nestegg Core Library
//!
//! Personal finance engine for the Nestegg tool:
//! - Ledger aggregation (balances, debt, cash flow, category spending)
//! - Budget progress tracking
//! - Round-up allocation of spare change
//! - Balance forecasting with injectable randomness
//! - Insight ranking and read state
//! - SQLite ledger store with snapshot export/import
//! - Layered TOML configuration

pub mod aggregate;
pub mod budget;
pub mod config;
pub mod db;
pub mod demo;
pub mod error;
pub mod export;
pub mod forecast;
pub mod ids;
pub mod insights;
pub mod models;
pub mod roundup;

pub use aggregate::{aggregate, AggregateTotals, DateGroup, PortfolioSummary};
pub use budget::{budget_status, BudgetOverview, BudgetProgress, BudgetStatus};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use export::{read_snapshot, write_snapshot, ImportStats};
pub use forecast::{
    forecast, FixedSpending, ForecastSummary, RandomSpending, SpendingSource,
};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use insights::{mark_insight_read, rank_insights};
pub use models::*;
pub use roundup::{round_up_for, total_round_ups, RoundUpMultiplier, RoundUpSettings};
