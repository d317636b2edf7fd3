//! Domain models for Nestegg
//!
//! Every entity here is owned by the ledger store. The engine modules only
//! ever see them through borrowed slices or a [`LedgerSnapshot`].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn require_non_empty(entity: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!(
            "{} {} must not be empty",
            entity, field
        )));
    }
    Ok(())
}

fn require_non_negative(entity: &str, field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::InvalidInput(format!(
            "{} {} must not be negative (got {})",
            entity, field, value
        )));
    }
    Ok(())
}

// ========== Transactions ==========

/// Kind of ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
    Investment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
            Self::Investment => "investment",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            "investment" => Ok(Self::Investment),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded ledger transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Signed amount: negative for money leaving the account
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    /// Spare change recorded when the transaction was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_up: Option<Decimal>,
}

impl Transaction {
    /// Structural checks only. The sign of `amount` is not policed: expense
    /// totals use its magnitude whichever way it was recorded.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("Transaction", "id", &self.id)?;
        require_non_empty("Transaction", "description", &self.description)?;
        require_non_empty("Transaction", "category", &self.category)?;
        if let Some(round_up) = self.round_up {
            require_non_negative("Transaction", "roundUp", round_up)?;
        }
        Ok(())
    }

    /// Calendar day of the transaction (UTC)
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// Request to record a new transaction (id and round-up are assigned by the store)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub merchant: Option<String>,
}

/// Partial update of a transaction. The recorded round-up cannot be changed.
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub transaction_type: Option<TransactionType>,
    pub merchant: Option<Option<String>>,
}

impl TransactionUpdate {
    pub fn apply(self, tx: &mut Transaction) {
        if let Some(amount) = self.amount {
            tx.amount = amount;
        }
        if let Some(description) = self.description {
            tx.description = description;
        }
        if let Some(category) = self.category {
            tx.category = category;
        }
        if let Some(date) = self.date {
            tx.date = date;
        }
        if let Some(t) = self.transaction_type {
            tx.transaction_type = t;
        }
        if let Some(merchant) = self.merchant {
            tx.merchant = merchant;
        }
    }
}

// ========== Accounts ==========

/// Account types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Investment,
    /// Negative balances are amounts owed
    Credit,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Investment => "investment",
            Self::Credit => "credit",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "investment" => Ok(Self::Investment),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("Unknown account type: {}", s)),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bank, card or brokerage account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Decimal,
    pub currency: String,
    /// Last 4 digits for cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_four: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

impl Account {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("Account", "id", &self.id)?;
        require_non_empty("Account", "name", &self.name)?;
        validate_currency(&self.currency)?;
        if let Some(ref last_four) = self.last_four {
            if last_four.len() != 4 || !last_four.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::InvalidInput(format!(
                    "Account {} lastFour must be 4 digits (got '{}')",
                    self.id, last_four
                )));
            }
        }
        Ok(())
    }

    pub fn is_credit(&self) -> bool {
        self.account_type == AccountType::Credit
    }
}

fn validate_currency(code: &str) -> Result<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidInput(format!(
            "Currency must be a 3-letter code (got '{}')",
            code
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Decimal,
    pub currency: String,
    #[serde(default)]
    pub last_four: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub account_type: Option<AccountType>,
    pub balance: Option<Decimal>,
    pub currency: Option<String>,
    pub last_four: Option<Option<String>>,
    pub institution: Option<Option<String>>,
}

impl AccountUpdate {
    pub fn apply(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(t) = self.account_type {
            account.account_type = t;
        }
        if let Some(balance) = self.balance {
            account.balance = balance;
        }
        if let Some(currency) = self.currency {
            account.currency = currency.to_uppercase();
        }
        if let Some(last_four) = self.last_four {
            account.last_four = last_four;
        }
        if let Some(institution) = self.institution {
            account.institution = institution;
        }
    }
}

// ========== Budgets ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!("Unknown budget period: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending allowance for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub allocated: Decimal,
    /// May exceed `allocated`; over-budget is a normal state
    pub spent: Decimal,
    pub period: BudgetPeriod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Budget {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("Budget", "id", &self.id)?;
        require_non_empty("Budget", "category", &self.category)?;
        require_non_negative("Budget", "allocated", self.allocated)?;
        require_non_negative("Budget", "spent", self.spent)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: String,
    pub allocated: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    pub period: BudgetPeriod,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub category: Option<String>,
    pub allocated: Option<Decimal>,
    pub spent: Option<Decimal>,
    pub period: Option<BudgetPeriod>,
    pub color: Option<Option<String>>,
}

impl BudgetUpdate {
    pub fn apply(self, budget: &mut Budget) {
        if let Some(category) = self.category {
            budget.category = category;
        }
        if let Some(allocated) = self.allocated {
            budget.allocated = allocated;
        }
        if let Some(spent) = self.spent {
            budget.spent = spent;
        }
        if let Some(period) = self.period {
            budget.period = period;
        }
        if let Some(color) = self.color {
            budget.color = color;
        }
    }
}

// ========== Investments ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentType {
    Stock,
    Etf,
    Crypto,
    /// Accumulates round-up spare change
    Roundups,
}

impl InvestmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Etf => "etf",
            Self::Crypto => "crypto",
            Self::Roundups => "roundups",
        }
    }
}

impl std::str::FromStr for InvestmentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stock" | "stocks" => Ok(Self::Stock),
            "etf" | "etfs" => Ok(Self::Etf),
            "crypto" => Ok(Self::Crypto),
            "roundups" | "round-ups" => Ok(Self::Roundups),
            _ => Err(format!("Unknown investment type: {}", s)),
        }
    }
}

impl std::fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub name: String,
    pub value: Decimal,
    pub initial_value: Decimal,
    /// Percentage growth over `initial_value`
    pub growth: Decimal,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
    pub last_updated: DateTime<Utc>,
}

impl Investment {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("Investment", "id", &self.id)?;
        require_non_empty("Investment", "name", &self.name)?;
        require_non_negative("Investment", "value", self.value)?;
        require_non_negative("Investment", "initialValue", self.initial_value)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub name: String,
    pub value: Decimal,
    pub initial_value: Decimal,
    #[serde(rename = "type")]
    pub investment_type: InvestmentType,
}

// ========== Insights ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Tip,
    Alert,
    Achievement,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tip => "tip",
            Self::Alert => "alert",
            Self::Achievement => "achievement",
        }
    }
}

impl std::str::FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tip" => Ok(Self::Tip),
            "alert" => Ok(Self::Alert),
            "achievement" => Ok(Self::Achievement),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

impl std::fmt::Display for InsightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Insight priority. Ordered so that `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An advisory message shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInsight {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub priority: Priority,
    pub date: DateTime<Utc>,
    pub read: bool,
}

impl FinancialInsight {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("Insight", "id", &self.id)?;
        require_non_empty("Insight", "title", &self.title)?;
        Ok(())
    }

    /// Move the insight from unread to read.
    ///
    /// Read is terminal; returns `false` when the insight was already read.
    pub fn mark_read(&mut self) -> bool {
        if self.read {
            return false;
        }
        self.read = true;
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInsight {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub priority: Priority,
    pub date: DateTime<Utc>,
}

// ========== Forecasting ==========

/// One projected end-of-day balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceForecast {
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// A known future cash-flow event used as forecast input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTransaction {
    /// Days from the forecast start (0 = start day)
    pub day_offset: u32,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

impl ScheduledTransaction {
    pub fn new(day_offset: u32, amount: Decimal, description: impl Into<String>) -> Self {
        Self {
            day_offset,
            amount,
            description: description.into(),
        }
    }
}

// ========== Snapshot ==========

/// Immutable read view of the whole ledger handed to the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub insights: Vec<FinancialInsight>,
}

impl LedgerSnapshot {
    /// Validate every entity, stopping at the first failure
    pub fn validate(&self) -> Result<()> {
        for account in &self.accounts {
            account.validate()?;
        }
        for tx in &self.transactions {
            tx.validate()?;
        }
        for budget in &self.budgets {
            budget.validate()?;
        }
        for investment in &self.investments {
            investment.validate()?;
        }
        for insight in &self.insights {
            insight.validate()?;
        }
        let roundup_targets = self
            .investments
            .iter()
            .filter(|i| i.investment_type == InvestmentType::Roundups)
            .count();
        if roundup_targets > 1 {
            return Err(Error::InvalidInput(format!(
                "Snapshot has {} round-up investments, at most one is allowed",
                roundup_targets
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn expense(amount: Decimal) -> Transaction {
        Transaction {
            id: "t1".to_string(),
            amount,
            description: "Coffee".to_string(),
            category: "Dining".to_string(),
            date: Utc::now(),
            transaction_type: TransactionType::Expense,
            merchant: None,
            round_up: None,
        }
    }

    #[test]
    fn test_enum_round_trip_strings() {
        assert_eq!(
            TransactionType::from_str("Expense").unwrap(),
            TransactionType::Expense
        );
        assert_eq!(AccountType::Credit.as_str(), "credit");
        assert_eq!(
            InvestmentType::from_str("round-ups").unwrap(),
            InvestmentType::Roundups
        );
        assert!(Priority::from_str("urgent").is_err());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_transaction_validation() {
        assert!(expense(dec!(-12.50)).validate().is_ok());
        // Sign is left to the caller
        assert!(expense(dec!(12.50)).validate().is_ok());

        let mut tx = expense(dec!(-3));
        tx.round_up = Some(dec!(-0.5));
        assert!(matches!(tx.validate(), Err(Error::InvalidInput(_))));

        let mut tx = expense(dec!(-3));
        tx.description = "  ".to_string();
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_budget_validation() {
        let mut budget = Budget {
            id: "b1".to_string(),
            category: "Food".to_string(),
            allocated: dec!(100),
            spent: dec!(150),
            period: BudgetPeriod::Monthly,
            color: None,
        };
        assert!(budget.validate().is_ok());
        budget.allocated = dec!(-1);
        assert!(budget.validate().is_err());
    }

    #[test]
    fn test_account_validation() {
        let mut account = Account {
            id: "a1".to_string(),
            name: "Card".to_string(),
            account_type: AccountType::Credit,
            balance: dec!(-20),
            currency: "USD".to_string(),
            last_four: Some("9876".to_string()),
            institution: None,
        };
        assert!(account.validate().is_ok());
        account.last_four = Some("98a6".to_string());
        assert!(account.validate().is_err());
        account.last_four = None;
        account.currency = "US".to_string();
        assert!(account.validate().is_err());
    }

    #[test]
    fn test_insight_mark_read_is_one_way() {
        let mut insight = FinancialInsight {
            id: "i1".to_string(),
            title: "Budget Alert".to_string(),
            description: String::new(),
            insight_type: InsightType::Alert,
            priority: Priority::Medium,
            date: Utc::now(),
            read: false,
        };
        assert!(insight.mark_read());
        assert!(insight.read);
        assert!(!insight.mark_read());
        assert!(insight.read);
    }

    #[test]
    fn test_transaction_json_shape() {
        let json = r#"{
            "id": "2",
            "amount": -85.47,
            "description": "Grocery Shopping",
            "category": "Food",
            "date": "2025-05-22T14:15:00Z",
            "type": "expense",
            "merchant": "Whole Foods",
            "roundUp": 0.53
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.amount, dec!(-85.47));
        assert_eq!(tx.round_up, Some(dec!(0.53)));
        assert_eq!(tx.transaction_type, TransactionType::Expense);

        let out = serde_json::to_value(&tx).unwrap();
        assert_eq!(out["type"], "expense");
        assert!(out.get("roundUp").is_some());
    }
}
