//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Ledger setup (init) and shared utilities (open_db)
//! - `dashboard` - Dashboard and spending-by-category summaries
//! - `accounts` - Account management (list, add, update, delete)
//! - `transactions` - Transaction commands (list, add, update, delete)
//! - `budgets` - Budget progress and budget edits
//! - `investments` - Portfolio view and new investments
//! - `roundups` - Round-up totals and settings
//! - `forecast` - Balance projection
//! - `insights` - Insight listing and read state
//! - `import` - Snapshot export/import

pub mod accounts;
pub mod budgets;
pub mod core;
pub mod dashboard;
pub mod forecast;
pub mod import;
pub mod insights;
pub mod investments;
pub mod roundups;
pub mod transactions;

// Re-export command functions for main.rs
pub use accounts::*;
pub use budgets::*;
pub use core::*;
pub use dashboard::*;
pub use forecast::*;
pub use import::*;
pub use insights::*;
pub use investments::*;
pub use roundups::*;
pub use transactions::*;

use rust_decimal::Decimal;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount for display: `-$12.50` for USD, `-12.50 EUR` otherwise
pub fn money(amount: Decimal, currency: &str) -> String {
    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    let magnitude = amount.abs().round_dp(2);
    if currency.eq_ignore_ascii_case("USD") {
        format!("{}${:.2}", sign, magnitude)
    } else {
        format!("{}{:.2} {}", sign, magnitude, currency)
    }
}

/// Red for money going out, green (with a `+`) for money coming in
pub fn colored_amount(amount: Decimal, currency: &str) -> String {
    if amount < Decimal::ZERO {
        format!("\x1b[31m{}\x1b[0m", money(amount, currency))
    } else {
        format!("\x1b[32m+{}\x1b[0m", money(amount, currency))
    }
}
