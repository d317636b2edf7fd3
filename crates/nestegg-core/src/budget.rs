//! Budget progress tracking
//!
//! Progress is `spent / allocated * 100`. A zero allocation reports a
//! progress of 0 rather than dividing by zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Budget;

/// Progress above this is a warning
const WARNING_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Good,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }

    pub fn from_progress(progress: Decimal) -> Self {
        if progress > Decimal::ONE_HUNDRED {
            Self::Over
        } else if progress > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Good
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived figures for one budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub progress: Decimal,
    /// Negative when over budget
    pub remaining: Decimal,
    pub status: BudgetStatus,
}

fn percent_of(spent: Decimal, allocated: Decimal) -> Decimal {
    if allocated.is_zero() {
        return Decimal::ZERO;
    }
    spent / allocated * Decimal::ONE_HUNDRED
}

pub fn progress(budget: &Budget) -> Decimal {
    percent_of(budget.spent, budget.allocated)
}

pub fn remaining(budget: &Budget) -> Decimal {
    budget.allocated - budget.spent
}

pub fn status(budget: &Budget) -> BudgetStatus {
    BudgetStatus::from_progress(progress(budget))
}

/// Progress, remaining amount and status for a budget
pub fn budget_status(budget: &Budget) -> Result<BudgetProgress> {
    budget.validate()?;
    let progress = progress(budget);
    Ok(BudgetProgress {
        progress,
        remaining: remaining(budget),
        status: BudgetStatus::from_progress(progress),
    })
}

/// Budgets ordered by progress, highest first. Equal progress keeps input order.
pub fn sort_by_progress(budgets: &[Budget]) -> Vec<Budget> {
    let mut sorted = budgets.to_vec();
    sorted.sort_by(|a, b| progress(b).cmp(&progress(a)));
    sorted
}

/// Case-insensitive category lookup
pub fn budget_for_category<'a>(budgets: &'a [Budget], category: &str) -> Option<&'a Budget> {
    let wanted = category.to_lowercase();
    budgets.iter().find(|b| b.category.to_lowercase() == wanted)
}

/// Totals across all budgets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetOverview {
    pub total_allocated: Decimal,
    pub total_spent: Decimal,
    pub overall_progress: Decimal,
    pub remaining: Decimal,
    pub status: BudgetStatus,
}

pub fn budget_overview(budgets: &[Budget]) -> BudgetOverview {
    let total_allocated: Decimal = budgets.iter().map(|b| b.allocated).sum();
    let total_spent: Decimal = budgets.iter().map(|b| b.spent).sum();
    let overall_progress = percent_of(total_spent, total_allocated);
    BudgetOverview {
        total_allocated,
        total_spent,
        overall_progress,
        remaining: total_allocated - total_spent,
        status: BudgetStatus::from_progress(overall_progress),
    }
}

/// Display form of a remaining amount: `"10.00 over"` when negative
pub fn remaining_label(remaining: Decimal) -> String {
    let amount = remaining.abs().round_dp(2);
    if remaining < Decimal::ZERO {
        format!("{:.2} over", amount)
    } else {
        format!("{:.2}", amount)
    }
}
