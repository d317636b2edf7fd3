//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ids::SequentialIds;
    use crate::roundup::{total_round_ups, RoundUpMultiplier, RoundUpSettings};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn checking() -> NewAccount {
        NewAccount {
            name: "Primary Checking".to_string(),
            account_type: AccountType::Checking,
            balance: dec!(3245.67),
            currency: "usd".to_string(),
            last_four: Some("4321".to_string()),
            institution: Some("Chase Bank".to_string()),
        }
    }

    fn expense(amount: Decimal, day: u32, hour: u32) -> NewTransaction {
        NewTransaction {
            amount,
            description: "Grocery Shopping".to_string(),
            category: "Food".to_string(),
            date: Utc.with_ymd_and_hms(2025, 5, day, hour, 0, 0).unwrap(),
            transaction_type: TransactionType::Expense,
            merchant: Some("Whole Foods".to_string()),
        }
    }

    fn round_up_savings() -> NewInvestment {
        NewInvestment {
            name: "Round-Up Savings".to_string(),
            value: dec!(387.42),
            initial_value: dec!(350),
            investment_type: InvestmentType::Roundups,
        }
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        let snapshot = db.snapshot().unwrap();
        assert_eq!(snapshot, LedgerSnapshot::default());
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
                 ('accounts', 'transactions', 'budgets', 'investments', 'insights', 'settings')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 6);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        let path = path.to_string_lossy();
        let ids = SequentialIds::new("acct");

        let db = Database::new(&path).unwrap();
        db.add_account(checking(), &ids).unwrap();
        drop(db);

        let db = Database::new(&path).unwrap();
        assert_eq!(db.list_accounts().unwrap().len(), 1);
        assert_eq!(db.path(), path);
    }

    #[test]
    fn test_account_crud() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("acct");

        let account = db.add_account(checking(), &ids).unwrap();
        assert_eq!(account.id, "acct-1");
        assert_eq!(account.currency, "USD");

        let stored = db.get_account("acct-1").unwrap().unwrap();
        assert_eq!(stored, account);
        assert_eq!(stored.balance, dec!(3245.67));

        let updated = db
            .update_account(
                "acct-1",
                AccountUpdate {
                    balance: Some(dec!(3000)),
                    last_four: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.balance, dec!(3000));
        assert_eq!(updated.last_four, None);
        assert_eq!(updated.name, "Primary Checking");

        db.delete_account("acct-1").unwrap();
        assert!(db.get_account("acct-1").unwrap().is_none());
        assert!(matches!(db.delete_account("acct-1"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_invalid_account_rejected() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("acct");

        let mut bad = checking();
        bad.last_four = Some("12".to_string());
        assert!(matches!(db.add_account(bad, &ids), Err(Error::InvalidInput(_))));
        assert!(db.list_accounts().unwrap().is_empty());

        let result = db.update_account("missing", AccountUpdate::default());
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_add_transaction_records_and_credits_round_up() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("id");
        let target = db.add_investment(round_up_savings(), &ids).unwrap();

        let tx = db
            .add_transaction(expense(dec!(-85.47), 22, 14), &RoundUpSettings::default(), &ids)
            .unwrap();
        assert_eq!(tx.round_up, Some(dec!(0.53)));

        let stored = db.get_transaction(&tx.id).unwrap().unwrap();
        assert_eq!(stored, tx);

        let credited = db.round_up_investment().unwrap().unwrap();
        assert_eq!(credited.id, target.id);
        assert_eq!(credited.value, dec!(387.95));
        assert_eq!(credited.growth, dec!(10.84));
    }

    #[test]
    fn test_round_up_uses_multiplier_and_settings() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("tx");

        let triple = RoundUpSettings {
            enabled: true,
            multiplier: RoundUpMultiplier::Three,
        };
        let tx = db.add_transaction(expense(dec!(-12.50), 23, 9), &triple, &ids).unwrap();
        assert_eq!(tx.round_up, Some(dec!(1.50)));

        let whole = db.add_transaction(expense(dec!(-12), 23, 10), &triple, &ids).unwrap();
        assert_eq!(whole.round_up, Some(Decimal::ZERO));

        let disabled = RoundUpSettings {
            enabled: false,
            ..triple
        };
        let tx = db.add_transaction(expense(dec!(-12.50), 23, 11), &disabled, &ids).unwrap();
        assert_eq!(tx.round_up, None);

        let mut salary = expense(dec!(1250), 20, 8);
        salary.transaction_type = TransactionType::Income;
        let tx = db.add_transaction(salary, &triple, &ids).unwrap();
        assert_eq!(tx.round_up, None);
    }

    #[test]
    fn test_invalid_transaction_is_not_stored() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("tx");
        db.add_investment(round_up_savings(), &ids).unwrap();

        // Blank description is invalid; nothing is credited either
        let mut blank = expense(dec!(-4.25), 22, 9);
        blank.description = "  ".to_string();
        let result = db.add_transaction(blank, &RoundUpSettings::default(), &ids);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(db.list_transactions().unwrap().is_empty());
        assert_eq!(db.round_up_investment().unwrap().unwrap().value, dec!(387.42));
    }

    #[test]
    fn test_update_keeps_recorded_round_up() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("tx");
        let tx = db
            .add_transaction(expense(dec!(-35.99), 21, 10), &RoundUpSettings::default(), &ids)
            .unwrap();

        let updated = db
            .update_transaction(
                &tx.id,
                TransactionUpdate {
                    amount: Some(dec!(-30.25)),
                    merchant: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount, dec!(-30.25));
        assert_eq!(updated.merchant, None);
        assert_eq!(updated.round_up, Some(dec!(0.01)));
        assert_eq!(db.get_transaction(&tx.id).unwrap().unwrap(), updated);

        let result = db.update_transaction(&tx.id, TransactionUpdate {
            amount: Some(dec!(30.25)),
            ..Default::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_list_transactions_newest_first() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("tx");
        let settings = RoundUpSettings::default();

        db.add_transaction(expense(dec!(-1), 21, 10), &settings, &ids).unwrap();
        db.add_transaction(expense(dec!(-2), 23, 9), &settings, &ids).unwrap();
        db.add_transaction(expense(dec!(-3), 22, 14), &settings, &ids).unwrap();
        db.add_transaction(expense(dec!(-4), 23, 9), &settings, &ids).unwrap();

        let listed: Vec<String> = db
            .list_transactions()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(listed, vec!["tx-2", "tx-4", "tx-3", "tx-1"]);

        db.delete_transaction("tx-4").unwrap();
        assert_eq!(db.list_transactions().unwrap().len(), 3);
        assert!(matches!(db.delete_transaction("tx-4"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_budget_crud() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("budget");

        let budget = db
            .add_budget(
                NewBudget {
                    category: "Food".to_string(),
                    allocated: dec!(500),
                    spent: dec!(325.47),
                    period: BudgetPeriod::Monthly,
                    color: None,
                },
                &ids,
            )
            .unwrap();

        let updated = db
            .update_budget(
                &budget.id,
                BudgetUpdate {
                    spent: Some(dec!(520)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.spent, dec!(520));
        assert_eq!(db.list_budgets().unwrap(), vec![updated]);

        let result = db.update_budget(
            &budget.id,
            BudgetUpdate {
                allocated: Some(dec!(-5)),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_single_round_up_investment() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("inv");

        let first = db.add_investment(round_up_savings(), &ids).unwrap();
        assert_eq!(first.growth, dec!(10.69));

        let result = db.add_investment(round_up_savings(), &ids);
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        db.add_investment(
            NewInvestment {
                name: "Total Market ETF".to_string(),
                value: dec!(25000),
                initial_value: dec!(20000),
                investment_type: InvestmentType::Etf,
            },
            &ids,
        )
        .unwrap();
        assert_eq!(db.list_investments().unwrap().len(), 2);
    }

    #[test]
    fn test_mark_insight_read_is_one_way() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("insight");

        let insight = db
            .add_insight(
                NewInsight {
                    title: "Budget Alert".to_string(),
                    description: "You've spent 90% of your Entertainment budget this month."
                        .to_string(),
                    insight_type: InsightType::Alert,
                    priority: Priority::Medium,
                    date: Utc.with_ymd_and_hms(2025, 5, 23, 10, 15, 0).unwrap(),
                },
                &ids,
            )
            .unwrap();
        assert!(!insight.read);

        assert!(db.mark_insight_read(&insight.id).unwrap());
        assert!(!db.mark_insight_read(&insight.id).unwrap());
        assert!(db.list_insights().unwrap()[0].read);
        assert!(matches!(db.mark_insight_read("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_round_up_settings() {
        let db = Database::in_memory().unwrap();
        let fallback = RoundUpSettings::default();
        assert_eq!(db.round_up_settings(&fallback).unwrap(), fallback);

        let saved = RoundUpSettings {
            enabled: false,
            multiplier: RoundUpMultiplier::Two,
        };
        db.save_round_up_settings(&saved).unwrap();
        assert_eq!(db.round_up_settings(&fallback).unwrap(), saved);
        assert_eq!(
            db.get_setting(ROUND_UP_MULTIPLIER_KEY).unwrap().as_deref(),
            Some("2")
        );

        db.set_setting(ROUND_UP_MULTIPLIER_KEY, "7").unwrap();
        assert!(db.round_up_settings(&fallback).is_err());
    }

    #[test]
    fn test_snapshot_replace_and_clear() {
        let db = Database::in_memory().unwrap();
        let ids = SequentialIds::new("id");
        db.add_account(checking(), &ids).unwrap();
        db.add_investment(round_up_savings(), &ids).unwrap();
        db.add_transaction(expense(dec!(-12.50), 23, 9), &RoundUpSettings::default(), &ids)
            .unwrap();

        let snapshot = db.snapshot().unwrap();
        assert_eq!(snapshot.transactions.len(), 1);

        let other = Database::in_memory().unwrap();
        other.replace_with(&snapshot).unwrap();
        assert_eq!(other.snapshot().unwrap(), snapshot);

        // An invalid snapshot leaves the ledger untouched
        let mut broken = snapshot.clone();
        broken.budgets.push(Budget {
            id: "b".to_string(),
            category: "Food".to_string(),
            allocated: dec!(-1),
            spent: Decimal::ZERO,
            period: BudgetPeriod::Monthly,
            color: None,
        });
        assert!(other.replace_with(&broken).is_err());
        assert_eq!(other.snapshot().unwrap(), snapshot);

        db.save_round_up_settings(&RoundUpSettings::default()).unwrap();
        db.clear().unwrap();
        assert_eq!(db.snapshot().unwrap(), LedgerSnapshot::default());
        assert!(db.get_setting(ROUND_UP_ENABLED_KEY).unwrap().is_some());
    }

    #[test]
    fn test_snapshot_is_consistent_during_writes() {
        let db = Database::in_memory().unwrap();
        let jar = db
            .add_investment(round_up_savings(), &SequentialIds::new("inv"))
            .unwrap();

        let writer = {
            let db = db.clone();
            std::thread::spawn(move || {
                let ids = SequentialIds::new("tx");
                for _ in 0..100 {
                    db.add_transaction(expense(dec!(-1.25), 22, 14), &RoundUpSettings::default(), &ids)
                        .unwrap();
                }
            })
        };

        let mut seen = 0;
        while !writer.is_finished() || seen == 0 {
            let snapshot = db.snapshot().unwrap();
            let credited = snapshot.investments[0].value - jar.value;
            assert_eq!(total_round_ups(&snapshot.transactions), credited);
            seen += 1;
        }
        writer.join().unwrap();

        let snapshot = db.snapshot().unwrap();
        assert_eq!(snapshot.transactions.len(), 100);
        assert_eq!(total_round_ups(&snapshot.transactions), dec!(75.00));
        assert_eq!(snapshot.investments[0].value, dec!(462.42));
    }
}
