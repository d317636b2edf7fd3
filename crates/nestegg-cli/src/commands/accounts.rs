//! Account command implementations

use anyhow::{Context, Result};
use nestegg_core::{
    aggregate,
    db::Database,
    models::{AccountUpdate, NewAccount},
    Config, UuidIds,
};

use super::{money, truncate};

pub fn cmd_accounts_list(db: &Database, config: &Config) -> Result<()> {
    let accounts = db.list_accounts()?;

    if accounts.is_empty() {
        println!("No accounts found. Add one with:");
        println!("  nestegg accounts add \"Everyday Checking\" --type checking --balance 1200");
        return Ok(());
    }

    println!();
    println!("🏦 Accounts");
    println!("   ─────────────────────────────────────────────────────────────");

    for account in &accounts {
        let card = account
            .last_four
            .as_deref()
            .map(|l| format!(" ••{}", l))
            .unwrap_or_default();
        let institution = account.institution.as_deref().unwrap_or("-");
        println!(
            "   {:<24} {:<10} {:>14}  {}{}",
            truncate(&account.name, 24),
            account.account_type,
            money(account.balance, &account.currency),
            truncate(institution, 20),
            card
        );
        println!("      id: {}", account.id);
    }

    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Total balance: {}",
        money(aggregate::total_balance(&accounts), &config.display.currency)
    );
    let debt = aggregate::total_debt(&accounts);
    if !debt.is_zero() {
        println!(
            "   Card debt:     {}",
            money(debt, &config.display.currency)
        );
    }

    Ok(())
}

pub fn cmd_accounts_add(db: &Database, new: NewAccount) -> Result<()> {
    let account = db
        .add_account(new, &UuidIds)
        .context("Failed to add account")?;

    println!(
        "✅ Added {} account '{}' ({})",
        account.account_type,
        account.name,
        money(account.balance, &account.currency)
    );
    println!("   id: {}", account.id);

    Ok(())
}

pub fn cmd_accounts_update(db: &Database, id: &str, update: AccountUpdate) -> Result<()> {
    let account = db
        .update_account(id, update)
        .with_context(|| format!("Failed to update account {}", id))?;

    println!(
        "✅ Updated account '{}' ({})",
        account.name,
        money(account.balance, &account.currency)
    );

    Ok(())
}

pub fn cmd_accounts_delete(db: &Database, id: &str) -> Result<()> {
    db.delete_account(id)
        .with_context(|| format!("Failed to delete account {}", id))?;
    println!("🗑️  Deleted account {}", id);
    Ok(())
}
