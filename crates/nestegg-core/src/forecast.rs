//! Balance forecasting
//!
//! Projects an end-of-day balance for each day of the horizon from known
//! scheduled transactions plus a random daily discretionary spend. The
//! randomness is supplied by a [`SpendingSource`] so callers decide between
//! a real RNG, a seeded one, or a fixed draw.

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{BalanceForecast, ScheduledTransaction};

/// Source of the daily discretionary spend
pub trait SpendingSource {
    /// A spend in `[0, max]`
    fn draw(&mut self, max: Decimal) -> Decimal;
}

/// Uniformly random spend backed by any [`Rng`]
pub struct RandomSpending<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSpending<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSpending<StdRng> {
    /// Reproducible draws for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SpendingSource for RandomSpending<R> {
    fn draw(&mut self, max: Decimal) -> Decimal {
        if max <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let fraction = Decimal::from_f64(self.rng.gen::<f64>()).unwrap_or(Decimal::ZERO);
        (fraction * max).round_dp(4).clamp(Decimal::ZERO, max)
    }
}

/// The same spend every day, clamped to `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSpending(pub Decimal);

impl SpendingSource for FixedSpending {
    fn draw(&mut self, max: Decimal) -> Decimal {
        if max <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.0.clamp(Decimal::ZERO, max)
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Project balances for `horizon_days` days starting at `start_date`.
///
/// Day 0 applies only the scheduled transactions for that day; every later
/// day also subtracts one draw from `source`.
pub fn forecast(
    start_date: NaiveDate,
    starting_balance: Decimal,
    scheduled: &[ScheduledTransaction],
    horizon_days: u32,
    max_daily_spend: Decimal,
    source: &mut dyn SpendingSource,
) -> Result<Vec<BalanceForecast>> {
    if max_daily_spend < Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "Maximum daily spend must not be negative (got {})",
            max_daily_spend
        )));
    }

    for entry in scheduled.iter().filter(|s| s.day_offset >= horizon_days) {
        debug!(
            day_offset = entry.day_offset,
            horizon_days,
            description = %entry.description,
            "Scheduled transaction outside forecast horizon"
        );
    }

    // Reject horizons past the end of the calendar before doing any work
    let overflow = || {
        Error::InvalidInput(format!(
            "Forecast horizon of {} days overflows the calendar",
            horizon_days
        ))
    };
    if horizon_days > 0 {
        start_date
            .checked_add_days(Days::new(u64::from(horizon_days - 1)))
            .ok_or_else(overflow)?;
    }

    let mut balance = starting_balance;
    let mut projection = Vec::new();

    for day in 0..horizon_days {
        balance += scheduled
            .iter()
            .filter(|s| s.day_offset == day)
            .map(|s| s.amount)
            .sum::<Decimal>();

        if day > 0 {
            balance -= source.draw(max_daily_spend);
        }

        let date = start_date
            .checked_add_days(Days::new(u64::from(day)))
            .ok_or_else(overflow)?;

        projection.push(BalanceForecast {
            date,
            balance: round_cents(balance),
        });
    }

    debug!(
        start = %start_date,
        days = projection.len(),
        scheduled = scheduled.len(),
        "Computed balance forecast"
    );

    Ok(projection)
}

/// Lowest projected balance; ties go to the earliest day
pub fn lowest_projected_balance(projection: &[BalanceForecast]) -> Option<&BalanceForecast> {
    projection.iter().reduce(|best, f| if f.balance < best.balance { f } else { best })
}

/// Highest projected balance; ties go to the earliest day
pub fn highest_projected_balance(projection: &[BalanceForecast]) -> Option<&BalanceForecast> {
    projection.iter().reduce(|best, f| if f.balance > best.balance { f } else { best })
}

pub fn has_negative_balance_projection(projection: &[BalanceForecast]) -> bool {
    projection.iter().any(|f| f.balance < Decimal::ZERO)
}

pub fn first_negative_balance_date(projection: &[BalanceForecast]) -> Option<NaiveDate> {
    projection
        .iter()
        .find(|f| f.balance < Decimal::ZERO)
        .map(|f| f.date)
}

/// Headline figures for a forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub lowest: Option<BalanceForecast>,
    pub highest: Option<BalanceForecast>,
    pub ending_balance: Option<Decimal>,
    pub first_negative: Option<NaiveDate>,
}

impl ForecastSummary {
    pub fn from_projection(projection: &[BalanceForecast]) -> Self {
        Self {
            lowest: lowest_projected_balance(projection).cloned(),
            highest: highest_projected_balance(projection).cloned(),
            ending_balance: projection.last().map(|f| f.balance),
            first_negative: first_negative_balance_date(projection),
        }
    }

    pub fn goes_negative(&self) -> bool {
        self.first_negative.is_some()
    }
}
