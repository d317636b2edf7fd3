//! Key-value settings

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::Database;
use crate::error::{Error, Result};
use crate::roundup::{RoundUpMultiplier, RoundUpSettings};

pub const ROUND_UP_ENABLED_KEY: &str = "round_up_enabled";
pub const ROUND_UP_MULTIPLIER_KEY: &str = "round_up_multiplier";

impl Database {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        info!(key, value, "Setting saved");
        Ok(())
    }

    /// Round-up preferences, with stored values overriding `fallback`
    pub fn round_up_settings(&self, fallback: &RoundUpSettings) -> Result<RoundUpSettings> {
        let mut settings = *fallback;

        if let Some(enabled) = self.get_setting(ROUND_UP_ENABLED_KEY)? {
            settings.enabled = enabled.parse().map_err(|_| {
                Error::InvalidInput(format!(
                    "Stored {} is not a boolean: {}",
                    ROUND_UP_ENABLED_KEY, enabled
                ))
            })?;
        }
        if let Some(multiplier) = self.get_setting(ROUND_UP_MULTIPLIER_KEY)? {
            settings.multiplier = multiplier.parse::<RoundUpMultiplier>()?;
        }

        Ok(settings)
    }

    pub fn save_round_up_settings(&self, settings: &RoundUpSettings) -> Result<()> {
        self.set_setting(ROUND_UP_ENABLED_KEY, &settings.enabled.to_string())?;
        self.set_setting(
            ROUND_UP_MULTIPLIER_KEY,
            &settings.multiplier.factor().to_string(),
        )?;
        Ok(())
    }
}
