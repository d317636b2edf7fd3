//! Investment command implementations

use anyhow::{Context, Result};
use nestegg_core::{
    aggregate,
    db::Database,
    models::{InvestmentType, NewInvestment},
    Config, UuidIds,
};
use rust_decimal::Decimal;

use super::{money, truncate};

pub fn cmd_investments_list(
    db: &Database,
    config: &Config,
    investment_type: Option<InvestmentType>,
) -> Result<()> {
    let mut investments = db.list_investments()?;
    if let Some(t) = investment_type {
        investments = aggregate::investments_by_type(&investments, t);
    }

    if investments.is_empty() && investment_type.is_some() {
        println!("No investments of that type.");
        return Ok(());
    }
    if investments.is_empty() {
        println!("No investments yet. Add one with:");
        println!("  nestegg investments add \"Index Fund\" --type etf --value 1000");
        return Ok(());
    }

    let currency = &config.display.currency;

    println!();
    println!("📈 Portfolio");
    println!("   ─────────────────────────────────────────────────────────────");

    for inv in &investments {
        let marker = if inv.investment_type == InvestmentType::Roundups {
            " 🌱"
        } else {
            ""
        };
        println!(
            "   {:<24} {:<9} {:>12}  {:+.2}%{}",
            truncate(&inv.name, 24),
            inv.investment_type,
            money(inv.value, currency),
            aggregate::investment_growth(inv).round_dp(2),
            marker
        );
    }

    let summary = aggregate::portfolio_summary(&investments);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Total value:   {} (invested {})",
        money(summary.total_value, currency),
        money(summary.total_initial, currency)
    );
    println!(
        "   Total growth:  {} ({:+.2}%)",
        money(summary.total_value - summary.total_initial, currency),
        summary.total_growth.round_dp(2)
    );
    if summary.round_up_value > Decimal::ZERO {
        println!(
            "   From round-ups: {}",
            money(summary.round_up_value, currency)
        );
    }

    Ok(())
}

pub fn cmd_investments_add(
    db: &Database,
    name: &str,
    investment_type: InvestmentType,
    value: Decimal,
    initial: Option<Decimal>,
) -> Result<()> {
    let investment = db
        .add_investment(
            NewInvestment {
                name: name.to_string(),
                value,
                initial_value: initial.unwrap_or(value),
                investment_type,
            },
            &UuidIds,
        )
        .context("Failed to add investment")?;

    println!(
        "✅ Added {} '{}' worth {} ({:+.2}%)",
        investment.investment_type,
        investment.name,
        investment.value.round_dp(2),
        investment.growth
    );
    println!("   id: {}", investment.id);

    Ok(())
}
