//! Balance forecast command

use anyhow::Result;
use chrono::Utc;
use nestegg_core::{
    aggregate,
    db::Database,
    demo::demo_schedule,
    forecast::{self, ForecastSummary, RandomSpending},
    models::AccountType,
    Config,
};
use rust_decimal::Decimal;

use super::money;

/// Arguments for `forecast`
#[derive(Debug, Clone, Default)]
pub struct ForecastArgs {
    pub days: Option<u32>,
    pub max_spend: Option<Decimal>,
    pub balance: Option<Decimal>,
    pub seed: Option<u64>,
    pub demo_schedule: bool,
    pub json: bool,
}

pub fn cmd_forecast(db: &Database, config: &Config, args: ForecastArgs) -> Result<()> {
    let horizon = args.days.unwrap_or(config.forecast.horizon_days);
    let max_spend = args.max_spend.unwrap_or(config.forecast.max_daily_spend);

    let starting_balance = match args.balance {
        Some(balance) => balance,
        None => {
            let accounts = db.list_accounts()?;
            aggregate::total_balance(&aggregate::accounts_by_type(
                &accounts,
                AccountType::Checking,
            ))
        }
    };

    let schedule = if args.demo_schedule {
        demo_schedule()
    } else {
        Vec::new()
    };

    let mut source = match args.seed {
        Some(seed) => RandomSpending::seeded(seed),
        None => RandomSpending::from_entropy(),
    };

    let projection = forecast::forecast(
        Utc::now().date_naive(),
        starting_balance,
        &schedule,
        horizon,
        max_spend,
        &mut source,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
        return Ok(());
    }

    if projection.is_empty() {
        println!("Nothing to project for a horizon of 0 days.");
        return Ok(());
    }

    let currency = &config.display.currency;

    println!();
    println!("🔮 Balance Forecast ({} days)", horizon);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Starting from {}, up to {} of random spending a day",
        money(starting_balance, currency),
        money(max_spend, currency)
    );
    if !schedule.is_empty() {
        println!("   Scheduled: {} known transactions", schedule.len());
    }
    println!();

    for point in &projection {
        let flag = if point.balance < Decimal::ZERO {
            "  ⚠️"
        } else {
            ""
        };
        println!(
            "   {} │ {:>14}{}",
            point.date.format("%a %b %d"),
            money(point.balance, currency),
            flag
        );
    }

    let summary = ForecastSummary::from_projection(&projection);
    println!("   ─────────────────────────────────────────────────────────────");
    if let Some(lowest) = &summary.lowest {
        println!(
            "   Lowest:  {} on {}",
            money(lowest.balance, currency),
            lowest.date
        );
    }
    if let Some(highest) = &summary.highest {
        println!(
            "   Highest: {} on {}",
            money(highest.balance, currency),
            highest.date
        );
    }
    if let Some(ending) = summary.ending_balance {
        println!("   Ending:  {}", money(ending, currency));
    }

    if let Some(date) = summary.first_negative {
        println!();
        println!(
            "⚠️  Balance is projected to go negative on {}. Consider trimming spending.",
            date
        );
    }

    Ok(())
}
