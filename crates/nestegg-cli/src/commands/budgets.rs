//! Budget command implementations

use anyhow::{Context, Result};
use nestegg_core::{
    budget::{self, BudgetStatus},
    db::Database,
    models::{BudgetPeriod, BudgetUpdate, NewBudget},
    Config, UuidIds,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{money, truncate};

const BAR_WIDTH: usize = 20;

/// Progress bar capped at full width
fn progress_bar(progress: Decimal) -> String {
    let filled = (progress.min(Decimal::ONE_HUNDRED) / Decimal::ONE_HUNDRED
        * Decimal::from(BAR_WIDTH as u64))
    .round();
    let filled = filled.to_usize().unwrap_or(0).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn status_icon(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Good => "🟢",
        BudgetStatus::Warning => "🟡",
        BudgetStatus::Over => "🔴",
    }
}

pub fn cmd_budgets_list(db: &Database, config: &Config) -> Result<()> {
    let budgets = db.list_budgets()?;

    if budgets.is_empty() {
        println!("No budgets set. Create one with:");
        println!("  nestegg budgets set Dining 300");
        return Ok(());
    }

    let currency = &config.display.currency;

    println!();
    println!("🎯 Budgets");
    println!("   ─────────────────────────────────────────────────────────────");

    for b in budget::sort_by_progress(&budgets) {
        let progress = budget::budget_status(&b)?;
        println!(
            "   {} {:<16} {} {:>4.0}%  {} of {} ({})",
            status_icon(progress.status),
            truncate(&b.category, 16),
            progress_bar(progress.progress),
            progress.progress.round_dp(0),
            money(b.spent, currency),
            money(b.allocated, currency),
            b.period
        );
        println!(
            "      remaining: {}",
            budget::remaining_label(progress.remaining)
        );
    }

    let overview = budget::budget_overview(&budgets);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {} Overall: {} of {} spent ({:.0}%), {} left",
        status_icon(overview.status),
        money(overview.total_spent, currency),
        money(overview.total_allocated, currency),
        overview.overall_progress.round_dp(0),
        budget::remaining_label(overview.remaining)
    );

    Ok(())
}

/// Create the budget for `category`, or update it if one already exists
pub fn cmd_budgets_set(
    db: &Database,
    category: &str,
    allocated: Decimal,
    spent: Option<Decimal>,
    period: BudgetPeriod,
    color: Option<String>,
) -> Result<()> {
    let budgets = db.list_budgets()?;

    let saved = match budget::budget_for_category(&budgets, category) {
        Some(existing) => db
            .update_budget(
                &existing.id,
                BudgetUpdate {
                    allocated: Some(allocated),
                    spent,
                    period: Some(period),
                    color: color.map(Some),
                    ..Default::default()
                },
            )
            .with_context(|| format!("Failed to update budget for {}", category))?,
        None => db
            .add_budget(
                NewBudget {
                    category: category.to_string(),
                    allocated,
                    spent: spent.unwrap_or_default(),
                    period,
                    color,
                },
                &UuidIds,
            )
            .with_context(|| format!("Failed to add budget for {}", category))?,
    };

    let progress = budget::budget_status(&saved)?;
    println!(
        "✅ {} budget: {} spent of {} {} ({:.0}%, {})",
        saved.category,
        saved.spent.round_dp(2),
        saved.allocated.round_dp(2),
        saved.period,
        progress.progress.round_dp(0),
        progress.status
    );

    Ok(())
}
