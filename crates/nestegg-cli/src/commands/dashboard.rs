//! Dashboard and spending summaries

use anyhow::Result;
use nestegg_core::{
    aggregate::{self, groups_newest_first},
    budget,
    db::Database,
    insights,
    roundup, Config,
};
use rust_decimal::Decimal;

use super::{colored_amount, money, truncate};

pub fn cmd_dashboard(db: &Database, config: &Config) -> Result<()> {
    let snapshot = db.snapshot()?;
    let currency = &config.display.currency;
    let totals = aggregate::aggregate(&snapshot.transactions, &snapshot.accounts);
    let portfolio = aggregate::portfolio_summary(&snapshot.investments);
    let overview = budget::budget_overview(&snapshot.budgets);

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│          🪺 Nestegg Dashboard           │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Total Balance:   {}", money(totals.total_balance, currency));
    if totals.total_debt > Decimal::ZERO {
        println!("  💳 Card Debt:     {}", money(totals.total_debt, currency));
    }
    println!();
    println!("  Income:          {}", money(totals.total_income, currency));
    println!("  Expenses:        {}", money(totals.total_expenses, currency));
    println!(
        "  Net Cash Flow:   {}",
        colored_amount(totals.net_cash_flow, currency)
    );
    println!();
    println!(
        "  🌱 Round-ups:     {} ({} in portfolio)",
        money(roundup::total_round_ups(&snapshot.transactions), currency),
        money(portfolio.round_up_value, currency)
    );
    println!(
        "  📈 Portfolio:     {} ({:+.2}%)",
        money(portfolio.total_value, currency),
        portfolio.total_growth.round_dp(2)
    );
    if !snapshot.budgets.is_empty() {
        println!(
            "  🎯 Budgets:       {:.0}% used ({})",
            overview.overall_progress.round_dp(0),
            overview.status
        );
    }

    let recent =
        aggregate::recent_transactions(&snapshot.transactions, config.display.recent_count);
    if !recent.is_empty() {
        println!();
        println!("  Recent Activity");
        println!("  ─────────────────────────────────────────");
        for tx in &recent {
            println!(
                "  {} │ {:>20} │ {}",
                tx.day(),
                colored_amount(tx.amount, currency),
                truncate(&tx.description, 28)
            );
        }
    }

    if let Some(today) = groups_newest_first(&totals.groups).first() {
        println!();
        println!(
            "  Latest day ({}): {} across {} transactions",
            today.date,
            money(today.daily_total, currency),
            today.transactions.len()
        );
    }

    if !totals.skipped.is_empty() {
        println!();
        println!(
            "  ⚠️  Skipped {} invalid records: {}",
            totals.skipped.len(),
            totals.skipped.join(", ")
        );
    }

    let unread = insights::unread_insights(&snapshot.insights);
    if !unread.is_empty() {
        println!();
        println!(
            "  💡 {} unread insights. Run 'nestegg insights --unread' to see them.",
            unread.len()
        );
    }
    println!();

    Ok(())
}

pub fn cmd_spending(db: &Database, config: &Config) -> Result<()> {
    let transactions = db.list_transactions()?;
    let by_category = aggregate::spending_by_category(&transactions);
    let currency = &config.display.currency;

    if by_category.is_empty() {
        println!("No spending recorded yet. Add some with:");
        println!("  nestegg transactions add 4.25 \"Coffee\" --category Dining");
        return Ok(());
    }

    let total = aggregate::total_expenses(&transactions);

    let mut categories: Vec<_> = by_category.into_iter().collect();
    categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!();
    println!("💸 Spending by Category");
    println!("   ─────────────────────────────────────────────────────────────");

    for (category, amount) in &categories {
        let share = if total.is_zero() {
            Decimal::ZERO
        } else {
            *amount / total * Decimal::ONE_HUNDRED
        };
        println!(
            "   {:<20} {:>12}  {:>5.1}%",
            truncate(category, 20),
            money(*amount, currency),
            share.round_dp(1)
        );
    }

    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:<20} {:>12}", "Total", money(total, currency));

    Ok(())
}
