//! Nestegg CLI - Personal finance tracker with round-up investing
//!
//! Usage:
//!   nestegg init --demo               Create a ledger with sample data
//!   nestegg dashboard                 Balances, cash flow, recent activity
//!   nestegg transactions add 4.25 Bagel --category Dining
//!   nestegg forecast --days 30        Project the balance forward

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use nestegg_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;

    let db = || commands::open_db(&cli.db);

    match cli.command {
        Commands::Init { demo } => commands::cmd_init(&cli.db, demo),
        Commands::Dashboard => commands::cmd_dashboard(&db()?, &config),
        Commands::Accounts { action } => match action {
            None | Some(AccountsAction::List) => commands::cmd_accounts_list(&db()?, &config),
            Some(AccountsAction::Add {
                name,
                account_type,
                balance,
                currency,
                last_four,
                institution,
            }) => commands::cmd_accounts_add(
                &db()?,
                nestegg_core::NewAccount {
                    name,
                    account_type,
                    balance,
                    currency,
                    last_four,
                    institution,
                },
            ),
            Some(AccountsAction::Update {
                id,
                name,
                balance,
                institution,
            }) => commands::cmd_accounts_update(
                &db()?,
                &id,
                nestegg_core::AccountUpdate {
                    name,
                    balance,
                    institution: institution.map(Some),
                    ..Default::default()
                },
            ),
            Some(AccountsAction::Delete { id }) => commands::cmd_accounts_delete(&db()?, &id),
        },
        Commands::Transactions { action } => match action {
            None => commands::cmd_transactions_list(&db()?, &config, None, None, 20),
            Some(TransactionsAction::List {
                transaction_type,
                category,
                limit,
            }) => commands::cmd_transactions_list(
                &db()?,
                &config,
                transaction_type,
                category.as_deref(),
                limit,
            ),
            Some(TransactionsAction::Add {
                amount,
                description,
                category,
                transaction_type,
                merchant,
                date,
            }) => commands::cmd_transactions_add(
                &db()?,
                &config,
                commands::TransactionArgs {
                    amount,
                    description,
                    category,
                    transaction_type,
                    merchant,
                    date,
                },
            ),
            Some(TransactionsAction::Update {
                id,
                amount,
                description,
                category,
                merchant,
            }) => commands::cmd_transactions_update(
                &db()?,
                &id,
                nestegg_core::TransactionUpdate {
                    amount,
                    description,
                    category,
                    merchant: merchant.map(Some),
                    ..Default::default()
                },
            ),
            Some(TransactionsAction::Delete { id }) => {
                commands::cmd_transactions_delete(&db()?, &id)
            }
        },
        Commands::Spending => commands::cmd_spending(&db()?, &config),
        Commands::Budgets { action } => match action {
            None | Some(BudgetsAction::List) => commands::cmd_budgets_list(&db()?, &config),
            Some(BudgetsAction::Set {
                category,
                allocated,
                spent,
                period,
                color,
            }) => commands::cmd_budgets_set(&db()?, &category, allocated, spent, period, color),
        },
        Commands::Investments { action } => match action {
            None => commands::cmd_investments_list(&db()?, &config, None),
            Some(InvestmentsAction::List { investment_type }) => {
                commands::cmd_investments_list(&db()?, &config, investment_type)
            }
            Some(InvestmentsAction::Add {
                name,
                investment_type,
                value,
                initial,
            }) => commands::cmd_investments_add(&db()?, &name, investment_type, value, initial),
        },
        Commands::Roundups {
            multiplier,
            enable,
            disable,
        } => {
            let enabled = match (enable, disable) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::cmd_roundups(&db()?, &config, multiplier, enabled)
        }
        Commands::Forecast {
            days,
            max_spend,
            balance,
            seed,
            demo_schedule,
            json,
        } => commands::cmd_forecast(
            &db()?,
            &config,
            commands::ForecastArgs {
                days,
                max_spend,
                balance,
                seed,
                demo_schedule,
                json,
            },
        ),
        Commands::Insights {
            action,
            unread,
            limit,
            priority,
        } => match action {
            Some(InsightsAction::Read { id }) => commands::cmd_insights_read(&db()?, &id),
            None => commands::cmd_insights_list(&db()?, unread, limit, priority),
        },
        Commands::Export { file } => commands::cmd_export(&db()?, &file),
        Commands::Import { file } => commands::cmd_import(&db()?, &file),
    }
}
