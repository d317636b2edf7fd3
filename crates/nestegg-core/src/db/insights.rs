//! Financial insight operations

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use super::{format_datetime, parse_column, Database};
use crate::error::{Error, Result};
use crate::ids::IdGenerator;
use crate::models::{FinancialInsight, NewInsight};

fn row_to_insight(row: &Row) -> rusqlite::Result<FinancialInsight> {
    let insight_type: String = row.get(3)?;
    let priority: String = row.get(4)?;
    let date: String = row.get(5)?;
    Ok(FinancialInsight {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        insight_type: parse_column(3, &insight_type)?,
        priority: parse_column(4, &priority)?,
        date: parse_column(5, &date)?,
        read: row.get(6)?,
    })
}

pub(super) fn insert_insight(conn: &Connection, insight: &FinancialInsight) -> Result<()> {
    conn.execute(
        "INSERT INTO insights (id, title, description, insight_type, priority, date, read)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            insight.id,
            insight.title,
            insight.description,
            insight.insight_type.as_str(),
            insight.priority.as_str(),
            format_datetime(&insight.date),
            insight.read,
        ],
    )?;
    Ok(())
}

pub(super) fn list_insights(conn: &Connection) -> Result<Vec<FinancialInsight>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, insight_type, priority, date, read
         FROM insights ORDER BY date DESC, rowid",
    )?;

    let insights = stmt
        .query_map([], row_to_insight)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(insights)
}

impl Database {
    /// Add an unread insight
    pub fn add_insight(&self, new: NewInsight, ids: &dyn IdGenerator) -> Result<FinancialInsight> {
        let insight = FinancialInsight {
            id: ids.next_id(),
            title: new.title,
            description: new.description,
            insight_type: new.insight_type,
            priority: new.priority,
            date: new.date,
            read: false,
        };
        insight.validate()?;

        let conn = self.conn()?;
        insert_insight(&conn, &insight)?;

        info!(id = %insight.id, insight_type = %insight.insight_type, "Insight added");
        Ok(insight)
    }

    /// All insights, newest first
    pub fn list_insights(&self) -> Result<Vec<FinancialInsight>> {
        let conn = self.conn()?;
        list_insights(&conn)
    }

    /// Mark an insight as read.
    ///
    /// Returns `false` if it was already read; there is no way back to unread.
    pub fn mark_insight_read(&self, id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let read: Option<bool> = conn
            .query_row(
                "SELECT read FROM insights WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        match read {
            None => Err(Error::NotFound(format!("Insight {}", id))),
            Some(true) => Ok(false),
            Some(false) => {
                conn.execute("UPDATE insights SET read = 1 WHERE id = ?", params![id])?;
                info!(id, "Insight marked read");
                Ok(true)
            }
        }
    }
}
