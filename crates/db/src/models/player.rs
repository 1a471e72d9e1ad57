//! Rows from the `players` table.

use playerdesk_core::normalize::{resolve_first, INFO_FIELDS};
use playerdesk_core::player::{CharacterMatch, CharacterRecord};
use serde_json::Value;
use sqlx::mysql::MySqlRow;
use sqlx::{FromRow, Row};

/// Search projection: account identifier and character name.
#[derive(Debug, Clone, FromRow)]
pub struct PlayerMatchRow {
    pub license: String,
    pub name: String,
}

impl From<PlayerMatchRow> for CharacterMatch {
    fn from(row: PlayerMatchRow) -> Self {
        Self {
            user_id: row.license,
            name: row.name,
        }
    }
}

/// A full character row. JSON columns are kept as stored.
///
/// Loaded from `SELECT *` so the personal-info column can be found under
/// either of its names.
#[derive(Debug, Clone)]
pub struct PlayerRow {
    pub citizenid: String,
    pub license: String,
    pub name: String,
    pub money: Option<Value>,
    pub job: Option<Value>,
    pub info: Option<Value>,
}

impl<'r> FromRow<'r, MySqlRow> for PlayerRow {
    fn from_row(row: &'r MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            citizenid: row.try_get("citizenid")?,
            license: row.try_get("license")?,
            name: row.try_get("name")?,
            money: json_column(row, "money"),
            job: json_column(row, "job"),
            info: resolve_first(INFO_FIELDS, |name| json_column(row, name)),
        })
    }
}

impl From<PlayerRow> for CharacterRecord {
    fn from(row: PlayerRow) -> Self {
        Self {
            citizenid: row.citizenid,
            user_id: row.license,
            name: row.name,
            money: row.money,
            job: row.job,
            info: row.info,
        }
    }
}

/// Read a JSON-shaped column as text, or as a decoded value when the
/// column has the native `JSON` type. A missing or undecodable column
/// reads as `None`.
fn json_column(row: &MySqlRow, name: &str) -> Option<Value> {
    match row.try_get::<Option<String>, _>(name) {
        Ok(text) => text.map(Value::String),
        Err(sqlx::Error::ColumnNotFound(_)) => None,
        Err(_) => row.try_get::<Option<Value>, _>(name).ok().flatten(),
    }
}
