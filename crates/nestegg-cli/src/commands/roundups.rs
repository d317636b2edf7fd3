//! Round-up command implementations

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use nestegg_core::{db::Database, roundup, Config, RoundUpMultiplier};

use super::money;

pub fn cmd_roundups(
    db: &Database,
    config: &Config,
    multiplier: Option<u8>,
    enabled: Option<bool>,
) -> Result<()> {
    let mut settings = db.round_up_settings(&config.round_ups)?;

    if multiplier.is_some() || enabled.is_some() {
        if let Some(m) = multiplier {
            settings.multiplier = RoundUpMultiplier::try_from(m)?;
        }
        if let Some(e) = enabled {
            settings.enabled = e;
        }
        db.save_round_up_settings(&settings)
            .context("Failed to save round-up settings")?;
        println!("✅ Round-up settings saved");
    }

    let transactions = db.list_transactions()?;
    let today = Utc::now().date_naive();
    let month_start = today.with_day(1).unwrap_or(today);
    let currency = &config.display.currency;

    println!();
    println!("🌱 Round-ups");
    println!("   ─────────────────────────────");
    println!(
        "   Status:      {}",
        if settings.enabled { "ON" } else { "OFF" }
    );
    println!("   Multiplier:  {}", settings.multiplier);
    println!(
        "   Total:       {}",
        money(roundup::total_round_ups(&transactions), currency)
    );
    println!(
        "   This month:  {}",
        money(
            roundup::round_ups_between(&transactions, month_start, today),
            currency
        )
    );

    match db.round_up_investment()? {
        Some(inv) => println!(
            "   Invested in: {} ({})",
            inv.name,
            money(inv.value, currency)
        ),
        None => {
            println!();
            println!("   💡 Round-ups are recorded but not invested. Create a target with:");
            println!("      nestegg investments add \"Round-ups\" --type roundups --value 0");
        }
    }

    Ok(())
}
