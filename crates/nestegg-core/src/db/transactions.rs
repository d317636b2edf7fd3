//! Transaction operations

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::{format_datetime, parse_column, parse_optional_column, Database};
use crate::aggregate::growth_percent;
use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::models::{NewTransaction, Transaction, TransactionUpdate};
use crate::roundup::{round_up_for_transaction, RoundUpSettings};

const TRANSACTION_COLUMNS: &str =
    "id, amount, description, category, date, transaction_type, merchant, round_up";

fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    let amount: String = row.get(1)?;
    let date: String = row.get(4)?;
    let transaction_type: String = row.get(5)?;
    Ok(Transaction {
        id: row.get(0)?,
        amount: parse_column(1, &amount)?,
        description: row.get(2)?,
        category: row.get(3)?,
        date: parse_column(4, &date)?,
        transaction_type: parse_column(5, &transaction_type)?,
        merchant: row.get(6)?,
        round_up: parse_optional_column(7, row.get(7)?)?,
    })
}

pub(super) fn insert_transaction(conn: &Connection, tx: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions
            (id, amount, description, category, date, transaction_type, merchant, round_up)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            tx.id,
            tx.amount.to_string(),
            tx.description,
            tx.category,
            format_datetime(&tx.date),
            tx.transaction_type.as_str(),
            tx.merchant,
            tx.round_up.map(|r| r.to_string()),
        ],
    )?;
    Ok(())
}

/// Add `amount` to the round-up investment, if one exists.
///
/// Returns the id of the credited investment.
fn credit_round_up(conn: &Connection, amount: Decimal) -> Result<Option<String>> {
    let target: Option<(String, String, String)> = conn
        .query_row(
            "SELECT id, value, initial_value FROM investments WHERE investment_type = 'roundups'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;

    let Some((id, value, initial_value)) = target else {
        return Ok(None);
    };

    let value: Decimal = parse_column(1, &value)?;
    let initial_value: Decimal = parse_column(2, &initial_value)?;
    let new_value = value + amount;
    let growth = growth_percent(new_value, initial_value).round_dp(2);

    conn.execute(
        "UPDATE investments SET value = ?, growth = ?, last_updated = ? WHERE id = ?",
        params![
            new_value.to_string(),
            growth.to_string(),
            format_datetime(&Utc::now()),
            id,
        ],
    )?;

    Ok(Some(id))
}

pub(super) fn list_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM transactions ORDER BY date DESC, rowid",
        TRANSACTION_COLUMNS
    ))?;

    let transactions = stmt
        .query_map([], row_to_transaction)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(transactions)
}

impl Database {
    /// Record a new transaction.
    ///
    /// Expenses get a round-up computed from `settings` and stored with the
    /// transaction; the same amount is credited to the round-up investment in
    /// the same SQL transaction.
    pub fn add_transaction(
        &self,
        new: NewTransaction,
        settings: &RoundUpSettings,
        ids: &dyn IdGenerator,
    ) -> Result<Transaction> {
        let round_up = round_up_for_transaction(new.transaction_type, new.amount, settings);
        let transaction = Transaction {
            id: ids.next_id(),
            amount: new.amount,
            description: new.description,
            category: new.category,
            date: new.date,
            transaction_type: new.transaction_type,
            merchant: new.merchant,
            round_up,
        };
        transaction.validate()?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        insert_transaction(&tx, &transaction)?;

        if let Some(amount) = round_up.filter(|r| *r > Decimal::ZERO) {
            match credit_round_up(&tx, amount)? {
                Some(investment_id) => {
                    debug!(%amount, %investment_id, "Round-up credited")
                }
                None => debug!(%amount, "No round-up investment to credit"),
            }
        }

        tx.commit()?;

        info!(
            id = %transaction.id,
            transaction_type = %transaction.transaction_type,
            amount = %transaction.amount,
            "Transaction added"
        );
        Ok(transaction)
    }

    /// Apply a partial update. The recorded round-up is left untouched.
    pub fn update_transaction(&self, id: &str, update: TransactionUpdate) -> Result<Transaction> {
        let mut transaction = self
            .get_transaction(id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;
        update.apply(&mut transaction);
        transaction.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "UPDATE transactions SET amount = ?, description = ?, category = ?, date = ?,
                transaction_type = ?, merchant = ?
             WHERE id = ?",
            params![
                transaction.amount.to_string(),
                transaction.description,
                transaction.category,
                format_datetime(&transaction.date),
                transaction.transaction_type.as_str(),
                transaction.merchant,
                transaction.id,
            ],
        )?;

        info!(id = %transaction.id, "Transaction updated");
        Ok(transaction)
    }

    pub fn delete_transaction(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Transaction {}", id)));
        }

        info!(id, "Transaction deleted");
        Ok(())
    }

    pub fn get_transaction(&self, id: &str) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let transaction = conn
            .query_row(
                &format!(
                    "SELECT {} FROM transactions WHERE id = ?",
                    TRANSACTION_COLUMNS
                ),
                params![id],
                row_to_transaction,
            )
            .optional()?;

        Ok(transaction)
    }

    /// All transactions, newest first. Equal timestamps keep insertion order.
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        list_transactions(&conn)
    }
}
