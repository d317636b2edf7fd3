//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nestegg_core::models::{AccountType, BudgetPeriod, InvestmentType, TransactionType};
use rust_decimal::Decimal;

/// Nestegg - Track spending, round up spare change, see what's coming
#[derive(Parser)]
#[command(name = "nestegg")]
#[command(about = "Personal finance tracker with round-up investing", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "nestegg.db", global = true)]
    pub db: PathBuf,

    /// Config file (defaults to ~/.local/share/nestegg/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the ledger
    Init {
        /// Load the sample ledger
        #[arg(long)]
        demo: bool,
    },

    /// Show dashboard summary
    Dashboard,

    /// Manage accounts (list, add, update, delete)
    Accounts {
        #[command(subcommand)]
        action: Option<AccountsAction>,
    },

    /// Manage transactions (list, add, update, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Show spending by category
    Spending,

    /// Manage budgets (list, set)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Show the investment portfolio
    Investments {
        #[command(subcommand)]
        action: Option<InvestmentsAction>,
    },

    /// Show round-up totals and change round-up settings
    Roundups {
        /// Round-up multiplier: 1, 2 or 3
        #[arg(short, long)]
        multiplier: Option<u8>,

        /// Turn round-ups on
        #[arg(long, conflicts_with = "disable")]
        enable: bool,

        /// Turn round-ups off
        #[arg(long)]
        disable: bool,
    },

    /// Project the balance over the coming days
    Forecast {
        /// Number of days to project
        #[arg(short, long)]
        days: Option<u32>,

        /// Maximum random spend per day
        #[arg(long)]
        max_spend: Option<Decimal>,

        /// Starting balance (defaults to the sum of checking accounts)
        #[arg(long, allow_negative_numbers = true)]
        balance: Option<Decimal>,

        /// Seed for reproducible projections
        #[arg(long)]
        seed: Option<u64>,

        /// Include the sample schedule of bills and salary
        #[arg(long)]
        demo_schedule: bool,

        /// Print the projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// List insights, or mark one as read
    Insights {
        #[command(subcommand)]
        action: Option<InsightsAction>,

        /// Only show unread insights
        #[arg(long)]
        unread: bool,

        /// Number of insights to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Order by priority instead of date
        #[arg(long)]
        priority: bool,
    },

    /// Export the ledger to a JSON snapshot
    Export {
        /// Output file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Replace the ledger with a JSON snapshot
    Import {
        /// Snapshot file
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum AccountsAction {
    /// List accounts
    List,

    /// Add an account
    Add {
        /// Account name
        name: String,

        /// Account type: checking, savings, investment, credit
        #[arg(short = 't', long = "type")]
        account_type: AccountType,

        /// Current balance (negative for credit card debt)
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        balance: Decimal,

        /// Three-letter currency code
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Last four digits of the card or account number
        #[arg(long)]
        last_four: Option<String>,

        /// Bank or brokerage
        #[arg(long)]
        institution: Option<String>,
    },

    /// Update an account
    Update {
        /// Account ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long, allow_negative_numbers = true)]
        balance: Option<Decimal>,

        #[arg(long)]
        institution: Option<String>,
    },

    /// Delete an account
    Delete {
        /// Account ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List recent transactions grouped by day
    List {
        /// Only show this type: income, expense, transfer, investment
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,

        /// Only show this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record a transaction
    ///
    /// Expenses are stored as negative amounts and income as positive,
    /// whatever sign is given.
    Add {
        /// Amount
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,

        /// Description
        description: String,

        /// Category
        #[arg(short, long, default_value = "Uncategorized")]
        category: String,

        /// Transaction type: income, expense, transfer, investment
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: TransactionType,

        /// Merchant name
        #[arg(short, long)]
        merchant: Option<String>,

        /// Date (YYYY-MM-DD or RFC 3339, defaults to now)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Update a transaction (its round-up never changes)
    Update {
        /// Transaction ID
        id: String,

        #[arg(short, long, allow_negative_numbers = true)]
        amount: Option<Decimal>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        merchant: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets, most used first
    List,

    /// Create or update the budget for a category
    Set {
        /// Category name (matched case-insensitively)
        category: String,

        /// Amount allocated for the period
        allocated: Decimal,

        /// Amount spent so far
        #[arg(short, long)]
        spent: Option<Decimal>,

        /// Budget period: daily, weekly, monthly
        #[arg(short, long, default_value = "monthly")]
        period: BudgetPeriod,

        /// Display color
        #[arg(long)]
        color: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum InvestmentsAction {
    /// Show the portfolio
    List {
        /// Only show this type: stock, etf, crypto, roundups
        #[arg(short = 't', long = "type")]
        investment_type: Option<InvestmentType>,
    },

    /// Add an investment
    Add {
        /// Investment name
        name: String,

        /// Investment type: stock, etf, crypto, roundups
        #[arg(short = 't', long = "type")]
        investment_type: InvestmentType,

        /// Current value
        #[arg(long)]
        value: Decimal,

        /// Amount originally invested (defaults to the current value)
        #[arg(long)]
        initial: Option<Decimal>,
    },
}

#[derive(Subcommand)]
pub enum InsightsAction {
    /// Mark an insight as read
    Read {
        /// Insight ID
        id: String,
    },
}
