//! Round-up allocation
//!
//! An expense of `12.30` leaves `0.70` of spare change to the next whole
//! unit; the user's multiplier scales that amount before it is invested.
//! Round-ups are recorded on the transaction when it is created and are never
//! recomputed afterwards, so historical totals stay stable.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionType};

/// Round-up multiplier chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RoundUpMultiplier {
    #[default]
    One,
    Two,
    Three,
}

impl RoundUpMultiplier {
    pub fn factor(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.factor())
    }
}

impl TryFrom<u8> for RoundUpMultiplier {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(Error::InvalidInput(format!(
                "Round-up multiplier must be 1, 2 or 3 (got {})",
                other
            ))),
        }
    }
}

impl From<RoundUpMultiplier> for u8 {
    fn from(m: RoundUpMultiplier) -> Self {
        m.factor()
    }
}

impl std::str::FromStr for RoundUpMultiplier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_end_matches(['x', 'X']);
        let value: u8 = trimmed.parse().map_err(|_| {
            Error::InvalidInput(format!("Invalid round-up multiplier: {}", s))
        })?;
        Self::try_from(value)
    }
}

impl std::fmt::Display for RoundUpMultiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

/// User preferences that decide whether new expenses get a round-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundUpSettings {
    pub enabled: bool,
    pub multiplier: RoundUpMultiplier,
}

impl Default for RoundUpSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            multiplier: RoundUpMultiplier::One,
        }
    }
}

/// Spare change to the next whole unit, scaled by the multiplier.
///
/// Whole amounts round up by zero, not by a full unit.
pub fn round_up_for(amount: Decimal, multiplier: RoundUpMultiplier) -> Decimal {
    let magnitude = amount.abs();
    (magnitude.ceil() - magnitude) * multiplier.as_decimal()
}

/// The round-up to record on a new transaction, if any
pub fn round_up_for_transaction(
    transaction_type: TransactionType,
    amount: Decimal,
    settings: &RoundUpSettings,
) -> Option<Decimal> {
    if !settings.enabled || transaction_type != TransactionType::Expense {
        return None;
    }
    Some(round_up_for(amount, settings.multiplier))
}

/// Sum of recorded round-ups across all transactions that carry one
pub fn total_round_ups(transactions: &[Transaction]) -> Decimal {
    transactions.iter().filter_map(|t| t.round_up).sum()
}

/// Recorded round-ups for transactions dated within `from..=to` (UTC days)
pub fn round_ups_between(transactions: &[Transaction], from: NaiveDate, to: NaiveDate) -> Decimal {
    transactions
        .iter()
        .filter(|t| {
            let day = t.day();
            day >= from && day <= to
        })
        .filter_map(|t| t.round_up)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    const ALL: [RoundUpMultiplier; 3] = [
        RoundUpMultiplier::One,
        RoundUpMultiplier::Two,
        RoundUpMultiplier::Three,
    ];

    #[test]
    fn test_round_up_to_next_whole_unit() {
        assert_eq!(round_up_for(dec!(12.50), RoundUpMultiplier::One), dec!(0.50));
        assert_eq!(round_up_for(dec!(0.01), RoundUpMultiplier::One), dec!(0.99));
        assert_eq!(round_up_for(dec!(-85.47), RoundUpMultiplier::One), dec!(0.53));
    }

    #[test]
    fn test_whole_amount_rounds_up_by_zero() {
        assert_eq!(round_up_for(dec!(12.00), RoundUpMultiplier::One), Decimal::ZERO);
        assert_eq!(round_up_for(dec!(-150), RoundUpMultiplier::Three), Decimal::ZERO);
        assert_eq!(round_up_for(Decimal::ZERO, RoundUpMultiplier::Two), Decimal::ZERO);
    }

    #[test]
    fn test_multiplier_scales_linearly() {
        for amount in [dec!(12.50), dec!(0.01), dec!(-35.99), dec!(7), dec!(1234.567)] {
            let base = round_up_for(amount, RoundUpMultiplier::One);
            for m in ALL {
                assert_eq!(round_up_for(amount, m), base * m.as_decimal());
            }
        }
    }

    #[test]
    fn test_multiplier_parsing() {
        assert_eq!(RoundUpMultiplier::try_from(2).unwrap(), RoundUpMultiplier::Two);
        assert_eq!(RoundUpMultiplier::from_str("3x").unwrap(), RoundUpMultiplier::Three);
        assert!(RoundUpMultiplier::try_from(0).is_err());
        assert!(RoundUpMultiplier::try_from(4).is_err());
        assert!(RoundUpMultiplier::from_str("two").is_err());
        assert_eq!(RoundUpMultiplier::Two.to_string(), "2x");
    }

    #[test]
    fn test_round_up_only_for_enabled_expenses() {
        let settings = RoundUpSettings::default();
        assert_eq!(
            round_up_for_transaction(TransactionType::Expense, dec!(-4.25), &settings),
            Some(dec!(0.75))
        );
        assert_eq!(
            round_up_for_transaction(TransactionType::Income, dec!(4.25), &settings),
            None
        );

        let disabled = RoundUpSettings {
            enabled: false,
            ..settings
        };
        assert_eq!(
            round_up_for_transaction(TransactionType::Expense, dec!(-4.25), &disabled),
            None
        );
    }

    fn tx(id: &str, amount: Decimal, round_up: Option<Decimal>, day: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount,
            description: "Purchase".to_string(),
            category: "Shopping".to_string(),
            date: Utc.with_ymd_and_hms(2025, 5, day, 12, 0, 0).unwrap(),
            transaction_type: TransactionType::Expense,
            merchant: None,
            round_up,
        }
    }

    #[test]
    fn test_total_uses_recorded_values() {
        // The recorded value wins even if it disagrees with the formula
        let txs = vec![
            tx("1", dec!(-85.47), Some(dec!(0.53)), 22),
            tx("2", dec!(-35.99), Some(dec!(0.01)), 21),
            tx("3", dec!(-10.10), Some(dec!(1.80)), 2),
            tx("4", dec!(-3.20), None, 23),
        ];
        assert_eq!(total_round_ups(&txs), dec!(2.34));
        assert_eq!(total_round_ups(&[]), Decimal::ZERO);

        let from = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        assert_eq!(round_ups_between(&txs, from, to), dec!(0.54));
    }
}
