//! Budget operations

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use super::{parse_column, Database};
use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::models::{Budget, BudgetUpdate, NewBudget};

const BUDGET_COLUMNS: &str = "id, category, allocated, spent, period, color";

fn row_to_budget(row: &Row) -> rusqlite::Result<Budget> {
    let allocated: String = row.get(2)?;
    let spent: String = row.get(3)?;
    let period: String = row.get(4)?;
    Ok(Budget {
        id: row.get(0)?,
        category: row.get(1)?,
        allocated: parse_column(2, &allocated)?,
        spent: parse_column(3, &spent)?,
        period: parse_column(4, &period)?,
        color: row.get(5)?,
    })
}

pub(super) fn insert_budget(conn: &Connection, budget: &Budget) -> Result<()> {
    conn.execute(
        "INSERT INTO budgets (id, category, allocated, spent, period, color)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            budget.id,
            budget.category,
            budget.allocated.to_string(),
            budget.spent.to_string(),
            budget.period.as_str(),
            budget.color,
        ],
    )?;
    Ok(())
}

pub(super) fn list_budgets(conn: &Connection) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM budgets ORDER BY rowid",
        BUDGET_COLUMNS
    ))?;

    let budgets = stmt
        .query_map([], row_to_budget)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(budgets)
}

impl Database {
    pub fn add_budget(&self, new: NewBudget, ids: &dyn IdGenerator) -> Result<Budget> {
        let budget = Budget {
            id: ids.next_id(),
            category: new.category,
            allocated: new.allocated,
            spent: new.spent,
            period: new.period,
            color: new.color,
        };
        budget.validate()?;

        let conn = self.conn()?;
        insert_budget(&conn, &budget)?;

        info!(id = %budget.id, category = %budget.category, "Budget added");
        Ok(budget)
    }

    pub fn update_budget(&self, id: &str, update: BudgetUpdate) -> Result<Budget> {
        let mut budget = self
            .get_budget(id)?
            .ok_or_else(|| Error::NotFound(format!("Budget {}", id)))?;
        update.apply(&mut budget);
        budget.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "UPDATE budgets SET category = ?, allocated = ?, spent = ?, period = ?, color = ?
             WHERE id = ?",
            params![
                budget.category,
                budget.allocated.to_string(),
                budget.spent.to_string(),
                budget.period.as_str(),
                budget.color,
                budget.id,
            ],
        )?;

        info!(id = %budget.id, "Budget updated");
        Ok(budget)
    }

    pub fn get_budget(&self, id: &str) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!("SELECT {} FROM budgets WHERE id = ?", BUDGET_COLUMNS),
                params![id],
                row_to_budget,
            )
            .optional()?;

        Ok(budget)
    }

    pub fn list_budgets(&self) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        list_budgets(&conn)
    }
}
