//! Sample ledger for `nestegg init --demo`
//!
//! The sample data is anchored at 2025-05-23 16:30 UTC and shifted so that
//! the anchor lands on `now`; relative spacing between entries is preserved.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{
    Account, AccountType, Budget, BudgetPeriod, FinancialInsight, InsightType, Investment,
    InvestmentType, LedgerSnapshot, Priority, ScheduledTransaction, Transaction, TransactionType,
};

const ANCHOR: &str = "2025-05-23T16:30:00Z";

/// Balance of the primary checking account, used as the forecast start
pub const DEMO_STARTING_BALANCE: Decimal = Decimal::from_parts(324567, 0, 0, false, 2);

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

struct Clock {
    shift: Duration,
}

impl Clock {
    fn new(now: DateTime<Utc>) -> Result<Self> {
        let anchor = parse_timestamp(ANCHOR)?;
        Ok(Self {
            shift: Duration::seconds((now - anchor).num_seconds()),
        })
    }

    fn at(&self, timestamp: &str) -> Result<DateTime<Utc>> {
        Ok(parse_timestamp(timestamp)? + self.shift)
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    s.parse()
        .map_err(|e| Error::InvalidInput(format!("Invalid demo timestamp {}: {}", s, e)))
}

fn demo_accounts() -> Vec<Account> {
    let rows: [(&str, &str, AccountType, i64, Option<&str>, &str); 5] = [
        ("1", "Primary Checking", AccountType::Checking, 324567, Some("4321"), "Chase Bank"),
        ("2", "High-Yield Savings", AccountType::Savings, 1250000, Some("8765"), "Ally Bank"),
        ("3", "Investment Portfolio", AccountType::Investment, 4575032, None, "Vanguard"),
        ("4", "Credit Card", AccountType::Credit, -234015, Some("9876"), "American Express"),
        ("5", "Round-Up Investments", AccountType::Investment, 38742, None, "WealthWizard"),
    ];

    rows.into_iter()
        .map(|(id, name, account_type, balance, last_four, institution)| Account {
            id: id.to_string(),
            name: name.to_string(),
            account_type,
            balance: money(balance),
            currency: "USD".to_string(),
            last_four: last_four.map(str::to_string),
            institution: Some(institution.to_string()),
        })
        .collect()
}

fn demo_transactions(clock: &Clock) -> Result<Vec<Transaction>> {
    use TransactionType as T;

    #[rustfmt::skip]
    let rows: [(&str, i64, &str, &str, &str, TransactionType, Option<&str>, Option<i64>); 10] = [
        ("1", 125000, "Salary Deposit", "Income", "2025-05-20T08:30:00Z", T::Income, Some("Employer Inc."), None),
        ("2", -8547, "Grocery Shopping", "Food", "2025-05-22T14:15:00Z", T::Expense, Some("Whole Foods"), Some(53)),
        ("3", -3599, "Streaming Subscription", "Entertainment", "2025-05-21T10:00:00Z", T::Expense, Some("Netflix"), Some(1)),
        ("4", -1250, "Coffee Shop", "Dining", "2025-05-23T09:20:00Z", T::Expense, Some("Starbucks"), Some(50)),
        ("5", -15000, "Electricity Bill", "Utilities", "2025-05-19T16:45:00Z", T::Expense, Some("Power Company"), None),
        ("6", -6530, "Gas Station", "Transportation", "2025-05-18T11:30:00Z", T::Expense, Some("Shell"), Some(70)),
        ("7", 50000, "Transfer to Savings", "Transfer", "2025-05-17T15:00:00Z", T::Transfer, None, None),
        ("8", -2500, "Round-up Investment", "Investment", "2025-05-16T12:00:00Z", T::Investment, None, None),
        ("9", -4299, "Online Purchase", "Shopping", "2025-05-15T13:25:00Z", T::Expense, Some("Amazon"), Some(1)),
        ("10", -999, "Music Subscription", "Entertainment", "2025-05-14T08:15:00Z", T::Expense, Some("Spotify"), Some(1)),
    ];

    rows.into_iter()
        .map(
            |(id, amount, description, category, date, transaction_type, merchant, round_up)| {
                Ok(Transaction {
                    id: id.to_string(),
                    amount: money(amount),
                    description: description.to_string(),
                    category: category.to_string(),
                    date: clock.at(date)?,
                    transaction_type,
                    merchant: merchant.map(str::to_string),
                    round_up: round_up.map(money),
                })
            },
        )
        .collect()
}

fn demo_budgets() -> Vec<Budget> {
    let rows: [(&str, &str, i64, i64, &str); 6] = [
        ("1", "Food", 50000, 32547, "#4ECDC4"),
        ("2", "Entertainment", 20000, 14598, "#A78BFA"),
        ("3", "Transportation", 30000, 26530, "#FF9F1C"),
        ("4", "Utilities", 25000, 15000, "#2EC4B6"),
        ("5", "Shopping", 30000, 14299, "#E71D36"),
        ("6", "Dining", 25000, 18750, "#8338EC"),
    ];

    rows.into_iter()
        .map(|(id, category, allocated, spent, color)| Budget {
            id: id.to_string(),
            category: category.to_string(),
            allocated: money(allocated),
            spent: money(spent),
            period: BudgetPeriod::Monthly,
            color: Some(color.to_string()),
        })
        .collect()
}

fn demo_investments(clock: &Clock) -> Result<Vec<Investment>> {
    let last_updated = clock.at(ANCHOR)?;
    let rows: [(&str, &str, i64, i64, i64, InvestmentType); 4] = [
        ("1", "Total Market ETF", 2500000, 2000000, 2500, InvestmentType::Etf),
        ("2", "Tech Stocks", 1575032, 1200000, 3125, InvestmentType::Stock),
        ("3", "Cryptocurrency", 500000, 300000, 6667, InvestmentType::Crypto),
        ("4", "Round-Up Savings", 38742, 35000, 1069, InvestmentType::Roundups),
    ];

    Ok(rows
        .into_iter()
        .map(|(id, name, value, initial, growth, investment_type)| Investment {
            id: id.to_string(),
            name: name.to_string(),
            value: money(value),
            initial_value: money(initial),
            growth: money(growth),
            investment_type,
            last_updated,
        })
        .collect())
}

fn demo_insights(clock: &Clock) -> Result<Vec<FinancialInsight>> {
    #[rustfmt::skip]
    let rows: [(&str, &str, &str, InsightType, Priority, &str, bool); 5] = [
        ("1", "Budget Alert", "You've spent 90% of your Entertainment budget this month.",
            InsightType::Alert, Priority::Medium, "2025-05-23T10:15:00Z", false),
        ("2", "Saving Opportunity", "Based on your spending patterns, you could save $150 more each month by reducing dining expenses.",
            InsightType::Tip, Priority::High, "2025-05-22T14:30:00Z", false),
        ("3", "Investment Milestone", "Congratulations! Your round-up investments have reached $350.",
            InsightType::Achievement, Priority::Medium, "2025-05-21T09:45:00Z", true),
        ("4", "Recurring Payment", "Your Netflix subscription ($35.99) will be charged tomorrow.",
            InsightType::Alert, Priority::Low, "2025-05-20T16:20:00Z", true),
        ("5", "Spending Pattern", "You spend most on groceries on weekends. Consider weekday shopping for better deals.",
            InsightType::Tip, Priority::Low, "2025-05-19T11:10:00Z", true),
    ];

    rows.into_iter()
        .map(|(id, title, description, insight_type, priority, date, read)| {
            Ok(FinancialInsight {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                insight_type,
                priority,
                date: clock.at(date)?,
                read,
            })
        })
        .collect()
}

/// The sample ledger, shifted so its most recent activity is around `now`
pub fn demo_snapshot(now: DateTime<Utc>) -> Result<LedgerSnapshot> {
    let clock = Clock::new(now)?;
    Ok(LedgerSnapshot {
        accounts: demo_accounts(),
        transactions: demo_transactions(&clock)?,
        budgets: demo_budgets(),
        investments: demo_investments(&clock)?,
        insights: demo_insights(&clock)?,
    })
}

/// Known upcoming bills and salary used as forecast input
pub fn demo_schedule() -> Vec<ScheduledTransaction> {
    [
        (2, -150, "Phone Bill"),
        (5, -1200, "Rent Payment"),
        (10, 1250, "Salary Deposit"),
        (15, -85, "Internet Bill"),
        (20, -200, "Credit Card Payment"),
        (25, 1250, "Salary Deposit"),
        (28, -120, "Utilities"),
    ]
    .into_iter()
    .map(|(day_offset, amount, description)| {
        ScheduledTransaction::new(day_offset, Decimal::from(amount), description)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, total_balance};
    use crate::roundup::total_round_ups;
    use rust_decimal_macros::dec;

    fn anchored() -> LedgerSnapshot {
        demo_snapshot(ANCHOR.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_demo_snapshot_is_valid() {
        let snapshot = anchored();
        snapshot.validate().unwrap();
        assert_eq!(snapshot.accounts.len(), 5);
        assert_eq!(snapshot.transactions.len(), 10);
        assert_eq!(snapshot.budgets.len(), 6);
        assert_eq!(snapshot.investments.len(), 4);
        assert_eq!(snapshot.insights.len(), 5);
    }

    #[test]
    fn test_demo_figures() {
        let snapshot = anchored();
        assert_eq!(total_balance(&snapshot.accounts), dec!(61883.41));
        assert_eq!(total_round_ups(&snapshot.transactions), dec!(1.76));
        assert_eq!(DEMO_STARTING_BALANCE, dec!(3245.67));

        let totals = aggregate(&snapshot.transactions, &snapshot.accounts);
        assert!(totals.skipped.is_empty());
        assert_eq!(totals.total_debt, dec!(2340.15));
        assert_eq!(totals.total_income, dec!(1250));
        assert_eq!(totals.total_expenses, dec!(402.24));
    }

    #[test]
    fn test_demo_is_shifted_to_now() {
        let now: DateTime<Utc> = "2026-01-10T16:30:00Z".parse().unwrap();
        let snapshot = demo_snapshot(now).unwrap();
        assert!(snapshot.investments.iter().all(|i| i.last_updated == now));

        let newest = snapshot.transactions.iter().map(|t| t.date).max().unwrap();
        assert_eq!(newest, "2026-01-10T09:20:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_demo_schedule() {
        let schedule = demo_schedule();
        assert_eq!(schedule.len(), 7);
        let net: Decimal = schedule.iter().map(|s| s.amount).sum();
        assert_eq!(net, dec!(745));
    }
}
