//! Account operations

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use super::{parse_column, Database};
use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::models::{Account, AccountUpdate, NewAccount};

const ACCOUNT_COLUMNS: &str =
    "id, name, account_type, balance, currency, last_four, institution";

fn row_to_account(row: &Row) -> rusqlite::Result<Account> {
    let account_type: String = row.get(2)?;
    let balance: String = row.get(3)?;
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        account_type: parse_column(2, &account_type)?,
        balance: parse_column(3, &balance)?,
        currency: row.get(4)?,
        last_four: row.get(5)?,
        institution: row.get(6)?,
    })
}

pub(super) fn insert_account(conn: &Connection, account: &Account) -> Result<()> {
    conn.execute(
        "INSERT INTO accounts (id, name, account_type, balance, currency, last_four, institution)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            account.id,
            account.name,
            account.account_type.as_str(),
            account.balance.to_string(),
            account.currency,
            account.last_four,
            account.institution,
        ],
    )?;
    Ok(())
}

pub(super) fn list_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM accounts ORDER BY rowid",
        ACCOUNT_COLUMNS
    ))?;

    let accounts = stmt
        .query_map([], row_to_account)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(accounts)
}

impl Database {
    /// Create an account with a freshly generated id
    pub fn add_account(&self, new: NewAccount, ids: &dyn IdGenerator) -> Result<Account> {
        let account = Account {
            id: ids.next_id(),
            name: new.name,
            account_type: new.account_type,
            balance: new.balance,
            currency: new.currency.to_uppercase(),
            last_four: new.last_four,
            institution: new.institution,
        };
        account.validate()?;

        let conn = self.conn()?;
        insert_account(&conn, &account)?;

        info!(id = %account.id, account_type = %account.account_type, "Account added");
        Ok(account)
    }

    /// Apply a partial update and return the stored account
    pub fn update_account(&self, id: &str, update: AccountUpdate) -> Result<Account> {
        let mut account = self
            .get_account(id)?
            .ok_or_else(|| Error::NotFound(format!("Account {}", id)))?;
        update.apply(&mut account);
        account.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "UPDATE accounts SET name = ?, account_type = ?, balance = ?, currency = ?,
                last_four = ?, institution = ?
             WHERE id = ?",
            params![
                account.name,
                account.account_type.as_str(),
                account.balance.to_string(),
                account.currency,
                account.last_four,
                account.institution,
                account.id,
            ],
        )?;

        info!(id = %account.id, "Account updated");
        Ok(account)
    }

    pub fn delete_account(&self, id: &str) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM accounts WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Account {}", id)));
        }

        info!(id, "Account deleted");
        Ok(())
    }

    /// Get an account by ID
    pub fn get_account(&self, id: &str) -> Result<Option<Account>> {
        let conn = self.conn()?;
        let account = conn
            .query_row(
                &format!("SELECT {} FROM accounts WHERE id = ?", ACCOUNT_COLUMNS),
                params![id],
                row_to_account,
            )
            .optional()?;

        Ok(account)
    }

    /// List all accounts in the order they were added
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        let conn = self.conn()?;
        list_accounts(&conn)
    }
}
