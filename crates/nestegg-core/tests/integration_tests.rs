//! Integration tests for nestegg-core
//!
//! These tests exercise the full store → snapshot → engine workflow.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use nestegg_core::{
    aggregate::{self, groups_newest_first},
    budget::{self, BudgetStatus},
    db::Database,
    demo::{demo_schedule, demo_snapshot, DEMO_STARTING_BALANCE},
    forecast::{self, FixedSpending, ForecastSummary, RandomSpending},
    ids::SequentialIds,
    insights,
    models::{NewTransaction, TransactionType},
    roundup::{self, RoundUpMultiplier, RoundUpSettings},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 23, 16, 30, 0).unwrap()
}

fn demo_db() -> Database {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    db.replace_with(&demo_snapshot(anchor()).unwrap())
        .expect("Failed to load demo ledger");
    db
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn test_dashboard_figures_from_store() {
    let db = demo_db();
    let snapshot = db.snapshot().unwrap();

    let totals = aggregate::aggregate(&snapshot.transactions, &snapshot.accounts);
    assert_eq!(totals.total_balance, dec!(61883.41));
    assert_eq!(totals.total_debt, dec!(2340.15));
    assert_eq!(totals.net_cash_flow, totals.total_income - totals.total_expenses);

    // Category spending sums to total expenses
    let category_sum: Decimal = totals.spending_by_category.values().copied().sum();
    assert_eq!(category_sum, totals.total_expenses);
    assert_eq!(totals.spending_by_category["Entertainment"], dec!(45.98));

    // Date groups come back newest first
    let groups = groups_newest_first(&totals.groups);
    assert_eq!(groups[0].date, NaiveDate::from_ymd_opt(2025, 5, 23).unwrap());
    assert_eq!(groups[0].daily_total, dec!(-12.50));

    let recent = aggregate::recent_transactions(&snapshot.transactions, 4);
    let ids: Vec<&str> = recent.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "2", "3", "1"]);
}

#[test]
fn test_credit_accounts_never_change_total_balance() {
    let snapshot = demo_db().snapshot().unwrap();
    let without_credit: Vec<_> = snapshot
        .accounts
        .iter()
        .filter(|a| !a.is_credit())
        .cloned()
        .collect();
    assert_eq!(
        aggregate::total_balance(&snapshot.accounts),
        aggregate::total_balance(&without_credit)
    );
}

// =============================================================================
// Round-ups
// =============================================================================

#[test]
fn test_new_expense_rounds_up_into_investment() {
    let db = demo_db();
    let ids = SequentialIds::new("tx");
    let settings = RoundUpSettings {
        enabled: true,
        multiplier: RoundUpMultiplier::Two,
    };
    let before = roundup::total_round_ups(&db.list_transactions().unwrap());

    let tx = db
        .add_transaction(
            NewTransaction {
                amount: dec!(-4.25),
                description: "Bagel".to_string(),
                category: "Dining".to_string(),
                date: anchor(),
                transaction_type: TransactionType::Expense,
                merchant: None,
            },
            &settings,
            &ids,
        )
        .unwrap();
    assert_eq!(tx.round_up, Some(dec!(1.50)));

    let snapshot = db.snapshot().unwrap();
    assert_eq!(roundup::total_round_ups(&snapshot.transactions), before + dec!(1.50));

    let portfolio = aggregate::portfolio_summary(&snapshot.investments);
    assert_eq!(portfolio.round_up_value, dec!(388.92));

    // Changing settings later never rewrites history
    db.save_round_up_settings(&RoundUpSettings::default()).unwrap();
    let stored = db.get_transaction(&tx.id).unwrap().unwrap();
    assert_eq!(stored.round_up, Some(dec!(1.50)));
}

// =============================================================================
// Budgets
// =============================================================================

#[test]
fn test_budget_ranking_from_store() {
    let budgets = demo_db().list_budgets().unwrap();
    let ranked = budget::sort_by_progress(&budgets);

    assert_eq!(ranked[0].category, "Transportation");
    assert_eq!(budget::status(&ranked[0]), BudgetStatus::Warning);
    assert_eq!(budget::status(&ranked[ranked.len() - 1]), BudgetStatus::Good);

    let overview = budget::budget_overview(&budgets);
    assert_eq!(overview.total_allocated, dec!(1800));
    assert_eq!(overview.total_spent, dec!(1217.24));
}

// =============================================================================
// Forecast
// =============================================================================

#[test]
fn test_demo_forecast() {
    let start = anchor().date_naive();
    let schedule = demo_schedule();

    let flat = forecast::forecast(
        start,
        DEMO_STARTING_BALANCE,
        &schedule,
        30,
        dec!(50),
        &mut FixedSpending(Decimal::ZERO),
    )
    .unwrap();
    assert_eq!(flat.len(), 30);
    assert_eq!(flat[0].balance, dec!(3245.67));
    assert_eq!(flat[29].balance, dec!(3990.67));

    let summary = ForecastSummary::from_projection(&flat);
    assert_eq!(summary.lowest.as_ref().unwrap().balance, dec!(1895.67));
    assert!(!summary.goes_negative());

    // Random spend of at most 50 a day for 29 days
    let random = forecast::forecast(
        start,
        DEMO_STARTING_BALANCE,
        &schedule,
        30,
        dec!(50),
        &mut RandomSpending::seeded(2025),
    )
    .unwrap();
    for (r, f) in random.iter().zip(&flat) {
        assert!(r.balance <= f.balance);
        assert!(r.balance >= f.balance - dec!(1450));
    }
}

// =============================================================================
// Insights
// =============================================================================

#[test]
fn test_insight_read_workflow() {
    let db = demo_db();
    let all = db.list_insights().unwrap();
    assert_eq!(insights::unread_insights(&all).len(), 2);

    let top = insights::rank_insights(&all, 3);
    assert_eq!(top[0].title, "Budget Alert");

    assert!(db.mark_insight_read(&top[0].id).unwrap());
    let all = db.list_insights().unwrap();
    assert_eq!(insights::unread_insights(&all).len(), 1);
    assert_eq!(insights::prioritized_insights(&all)[0].title, "Saving Opportunity");
}
