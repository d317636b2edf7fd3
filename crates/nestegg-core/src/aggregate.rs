//! Ledger aggregation: balances, cash flow, category spending and date groups
//!
//! All functions are pure over borrowed slices. Dates are bucketed by their
//! UTC calendar day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{
    Account, AccountType, Investment, InvestmentType, Transaction, TransactionType,
};

/// Headline figures derived from a ledger snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateTotals {
    pub total_balance: Decimal,
    pub total_debt: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_cash_flow: Decimal,
    pub spending_by_category: BTreeMap<String, Decimal>,
    pub groups: BTreeMap<NaiveDate, DateGroup>,
    /// Ids of entities left out because they failed validation
    pub skipped: Vec<String>,
}

/// Transactions that share a calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
    /// Signed sum of the group's amounts
    pub daily_total: Decimal,
}

/// Aggregate a snapshot's transactions and accounts.
///
/// Invalid entities are skipped rather than failing the whole aggregation;
/// their ids are reported in [`AggregateTotals::skipped`].
pub fn aggregate(transactions: &[Transaction], accounts: &[Account]) -> AggregateTotals {
    let mut skipped = Vec::new();

    let valid_accounts: Vec<Account> = accounts
        .iter()
        .filter(|a| match a.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(account = %a.id, error = %e, "Skipping invalid account");
                skipped.push(a.id.clone());
                false
            }
        })
        .cloned()
        .collect();

    let valid_transactions: Vec<Transaction> = transactions
        .iter()
        .filter(|t| match t.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!(transaction = %t.id, error = %e, "Skipping invalid transaction");
                skipped.push(t.id.clone());
                false
            }
        })
        .cloned()
        .collect();

    let total_income = total_income(&valid_transactions);
    let total_expenses = total_expenses(&valid_transactions);

    let totals = AggregateTotals {
        total_balance: total_balance(&valid_accounts),
        total_debt: total_debt(&valid_accounts),
        total_income,
        total_expenses,
        net_cash_flow: total_income - total_expenses,
        spending_by_category: spending_by_category(&valid_transactions),
        groups: group_by_date(&valid_transactions),
        skipped,
    };

    debug!(
        accounts = valid_accounts.len(),
        transactions = valid_transactions.len(),
        skipped = totals.skipped.len(),
        "Aggregation complete"
    );

    totals
}

/// Sum of balances over every non-credit account
pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .filter(|a| !a.is_credit())
        .map(|a| a.balance)
        .sum()
}

/// Amount owed across credit accounts, as a positive figure
pub fn total_debt(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .filter(|a| a.is_credit())
        .map(|a| a.balance.abs())
        .sum()
}

pub fn total_income(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Income)
        .map(|t| t.amount)
        .sum()
}

/// Sum of absolute expense amounts
pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
        .map(|t| t.amount.abs())
        .sum()
}

/// Income minus expenses; transfers and investments are excluded
pub fn net_cash_flow(transactions: &[Transaction]) -> Decimal {
    total_income(transactions) - total_expenses(transactions)
}

/// Absolute expense totals per category. Categories with no expenses are absent.
pub fn spending_by_category(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut spending: BTreeMap<String, Decimal> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::Expense)
    {
        *spending.entry(tx.category.clone()).or_insert(Decimal::ZERO) += tx.amount.abs();
    }
    spending
}

/// Bucket transactions by UTC calendar day.
///
/// Within a group, transactions keep their input order. The map's key order
/// carries no display meaning; see [`groups_newest_first`].
pub fn group_by_date(transactions: &[Transaction]) -> BTreeMap<NaiveDate, DateGroup> {
    let mut groups: BTreeMap<NaiveDate, DateGroup> = BTreeMap::new();
    for tx in transactions {
        let day = tx.day();
        let group = groups.entry(day).or_insert_with(|| DateGroup {
            date: day,
            transactions: Vec::new(),
            daily_total: Decimal::ZERO,
        });
        group.daily_total += tx.amount;
        group.transactions.push(tx.clone());
    }
    groups
}

/// Date groups ordered for display: newest day first, and within each day
/// the newest transaction first.
pub fn groups_newest_first(groups: &BTreeMap<NaiveDate, DateGroup>) -> Vec<DateGroup> {
    groups
        .values()
        .rev()
        .map(|g| {
            let mut group = g.clone();
            group.transactions.sort_by(|a, b| b.date.cmp(&a.date));
            group
        })
        .collect()
}

pub fn filter_by_type(
    transactions: &[Transaction],
    transaction_type: TransactionType,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.transaction_type == transaction_type)
        .cloned()
        .collect()
}

/// Transactions whose category matches `category`, ignoring case and
/// surrounding whitespace
pub fn transactions_by_category(transactions: &[Transaction], category: &str) -> Vec<Transaction> {
    let wanted = category.trim().to_lowercase();
    transactions
        .iter()
        .filter(|t| t.category.trim().to_lowercase() == wanted)
        .cloned()
        .collect()
}

/// The `count` most recent transactions, newest first (stable on equal dates)
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(count);
    sorted
}

pub fn accounts_by_type(accounts: &[Account], account_type: AccountType) -> Vec<Account> {
    accounts
        .iter()
        .filter(|a| a.account_type == account_type)
        .cloned()
        .collect()
}

// ========== Investments ==========

/// Portfolio-wide investment figures
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub total_initial: Decimal,
    /// Percentage; 0 when nothing was invested initially
    pub total_growth: Decimal,
    /// Current value of the round-up investment, 0 if there is none
    pub round_up_value: Decimal,
}

/// Percentage growth of `value` over `initial`, guarded against a zero base
pub fn growth_percent(value: Decimal, initial: Decimal) -> Decimal {
    if initial.is_zero() {
        return Decimal::ZERO;
    }
    (value - initial) / initial * Decimal::ONE_HUNDRED
}

pub fn investment_growth(investment: &Investment) -> Decimal {
    growth_percent(investment.value, investment.initial_value)
}

pub fn portfolio_summary(investments: &[Investment]) -> PortfolioSummary {
    let total_value: Decimal = investments.iter().map(|i| i.value).sum();
    let total_initial: Decimal = investments.iter().map(|i| i.initial_value).sum();
    let round_up_value = investments
        .iter()
        .find(|i| i.investment_type == InvestmentType::Roundups)
        .map(|i| i.value)
        .unwrap_or(Decimal::ZERO);

    PortfolioSummary {
        total_value,
        total_initial,
        total_growth: growth_percent(total_value, total_initial),
        round_up_value,
    }
}

pub fn investments_by_type(
    investments: &[Investment],
    investment_type: InvestmentType,
) -> Vec<Investment> {
    investments
        .iter()
        .filter(|i| i.investment_type == investment_type)
        .cloned()
        .collect()
}
