//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use nestegg_core::{
    aggregate::{self, groups_newest_first},
    db::Database,
    models::{NewTransaction, Transaction, TransactionType, TransactionUpdate},
    Config, UuidIds,
};
use rust_decimal::Decimal;

use super::{colored_amount, money, truncate};

/// Arguments for `transactions add`
#[derive(Debug, Clone)]
pub struct TransactionArgs {
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub transaction_type: TransactionType,
    pub merchant: Option<String>,
    pub date: Option<String>,
}

/// Expenses are stored negative and income positive, whatever sign was typed
pub fn normalize_amount(amount: Decimal, transaction_type: TransactionType) -> Decimal {
    match transaction_type {
        TransactionType::Expense => -amount.abs(),
        TransactionType::Income => amount.abs(),
        TransactionType::Transfer | TransactionType::Investment => amount,
    }
}

/// Parse `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = day
            .and_hms_opt(0, 0, 0)
            .context("Invalid date")?;
        return Ok(midnight.and_utc());
    }
    DateTime::parse_from_rfc3339(input)
        .map(|d| d.with_timezone(&Utc))
        .with_context(|| format!("Invalid date '{}': use YYYY-MM-DD or RFC 3339", input))
}

/// Apply the `list` filters, then keep the `limit` newest
pub fn select_transactions(
    transactions: &[Transaction],
    transaction_type: Option<TransactionType>,
    category: Option<&str>,
    limit: usize,
) -> Vec<Transaction> {
    let mut selected = transactions.to_vec();
    if let Some(t) = transaction_type {
        selected = aggregate::filter_by_type(&selected, t);
    }
    if let Some(category) = category {
        selected = aggregate::transactions_by_category(&selected, category);
    }
    aggregate::recent_transactions(&selected, limit)
}

pub fn cmd_transactions_list(
    db: &Database,
    config: &Config,
    transaction_type: Option<TransactionType>,
    category: Option<&str>,
    limit: usize,
) -> Result<()> {
    let transactions = select_transactions(&db.list_transactions()?, transaction_type, category, limit);

    if transactions.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  nestegg transactions add 4.25 \"Coffee\" --category Dining");
        return Ok(());
    }

    let currency = &config.display.currency;

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    let groups = aggregate::group_by_date(&transactions);
    for group in groups_newest_first(&groups) {
        println!();
        println!(
            "   {}  (day total {})",
            group.date.format("%a %b %d, %Y"),
            money(group.daily_total, currency)
        );
        for tx in &group.transactions {
            let round_up = match tx.round_up {
                Some(r) if r > Decimal::ZERO => format!("  🌱 +{}", money(r, currency)),
                _ => String::new(),
            };
            println!(
                "   {:>20} │ {:<14} │ {}{}",
                colored_amount(tx.amount, currency),
                truncate(&tx.category, 14),
                truncate(&tx.description, 32),
                round_up
            );
        }
    }

    Ok(())
}

pub fn cmd_transactions_add(db: &Database, config: &Config, args: TransactionArgs) -> Result<()> {
    let date = match args.date.as_deref() {
        Some(input) => parse_date(input)?,
        None => Utc::now(),
    };
    let settings = db.round_up_settings(&config.round_ups)?;

    let new = NewTransaction {
        amount: normalize_amount(args.amount, args.transaction_type),
        description: args.description,
        category: args.category,
        date,
        transaction_type: args.transaction_type,
        merchant: args.merchant,
    };

    let tx = db
        .add_transaction(new, &settings, &UuidIds)
        .context("Failed to add transaction")?;

    let currency = &config.display.currency;
    println!(
        "✅ Recorded {} {} '{}'",
        tx.transaction_type,
        money(tx.amount, currency),
        tx.description
    );
    match tx.round_up {
        Some(r) if r > Decimal::ZERO => {
            println!(
                "   🌱 Rounded up {} ({}) into your round-up investment",
                money(r, currency),
                settings.multiplier
            );
        }
        Some(_) => println!("   Whole amount, nothing to round up"),
        None => {}
    }
    println!("   id: {}", tx.id);

    Ok(())
}

pub fn cmd_transactions_update(db: &Database, id: &str, update: TransactionUpdate) -> Result<()> {
    let tx = db
        .update_transaction(id, update)
        .with_context(|| format!("Failed to update transaction {}", id))?;

    println!(
        "✅ Updated transaction '{}' ({})",
        tx.description, tx.amount
    );

    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, id: &str) -> Result<()> {
    db.delete_transaction(id)
        .with_context(|| format!("Failed to delete transaction {}", id))?;
    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}
