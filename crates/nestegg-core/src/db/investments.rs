//! Investment operations

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use super::{format_datetime, parse_column, Database};
use crate::aggregate::growth_percent;
use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::models::{Investment, InvestmentType, NewInvestment};

const INVESTMENT_COLUMNS: &str =
    "id, name, value, initial_value, growth, investment_type, last_updated";

fn row_to_investment(row: &Row) -> rusqlite::Result<Investment> {
    let value: String = row.get(2)?;
    let initial_value: String = row.get(3)?;
    let growth: String = row.get(4)?;
    let investment_type: String = row.get(5)?;
    let last_updated: String = row.get(6)?;
    Ok(Investment {
        id: row.get(0)?,
        name: row.get(1)?,
        value: parse_column(2, &value)?,
        initial_value: parse_column(3, &initial_value)?,
        growth: parse_column(4, &growth)?,
        investment_type: parse_column(5, &investment_type)?,
        last_updated: parse_column(6, &last_updated)?,
    })
}

pub(super) fn insert_investment(conn: &Connection, investment: &Investment) -> Result<()> {
    conn.execute(
        "INSERT INTO investments
            (id, name, value, initial_value, growth, investment_type, last_updated)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            investment.id,
            investment.name,
            investment.value.to_string(),
            investment.initial_value.to_string(),
            investment.growth.to_string(),
            investment.investment_type.as_str(),
            format_datetime(&investment.last_updated),
        ],
    )?;
    Ok(())
}

pub(super) fn list_investments(conn: &Connection) -> Result<Vec<Investment>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM investments ORDER BY rowid",
        INVESTMENT_COLUMNS
    ))?;

    let investments = stmt
        .query_map([], row_to_investment)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(investments)
}

impl Database {
    /// Add a holding. Growth is derived from value and initial value.
    ///
    /// Only one `roundups` investment may exist.
    pub fn add_investment(&self, new: NewInvestment, ids: &dyn IdGenerator) -> Result<Investment> {
        if new.investment_type == InvestmentType::Roundups && self.round_up_investment()?.is_some()
        {
            return Err(Error::InvalidInput(
                "A round-up investment already exists".to_string(),
            ));
        }

        let investment = Investment {
            id: ids.next_id(),
            growth: growth_percent(new.value, new.initial_value).round_dp(2),
            name: new.name,
            value: new.value,
            initial_value: new.initial_value,
            investment_type: new.investment_type,
            last_updated: Utc::now(),
        };
        investment.validate()?;

        let conn = self.conn()?;
        insert_investment(&conn, &investment)?;

        info!(
            id = %investment.id,
            investment_type = %investment.investment_type,
            "Investment added"
        );
        Ok(investment)
    }

    pub fn list_investments(&self) -> Result<Vec<Investment>> {
        let conn = self.conn()?;
        list_investments(&conn)
    }

    /// The investment that receives round-ups, if any
    pub fn round_up_investment(&self) -> Result<Option<Investment>> {
        let conn = self.conn()?;
        let investment = conn
            .query_row(
                &format!(
                    "SELECT {} FROM investments WHERE investment_type = 'roundups'",
                    INVESTMENT_COLUMNS
                ),
                [],
                row_to_investment,
            )
            .optional()?;

        Ok(investment)
    }
}
