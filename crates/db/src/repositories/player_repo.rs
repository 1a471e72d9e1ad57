//! Repository for the `players` table.

use sqlx::MySqlPool;

use crate::models::player::{PlayerMatchRow, PlayerRow};

/// Read access to characters plus the single job-column write.
pub struct PlayerRepo;

impl PlayerRepo {
    /// Characters whose `license` or `name` contains `needle`
    /// case-insensitively, in table order, at most `limit` rows.
    pub async fn search(
        pool: &MySqlPool,
        needle: &str,
        limit: i64,
    ) -> Result<Vec<PlayerMatchRow>, sqlx::Error> {
        let pattern = like_contains(&needle.to_lowercase());
        sqlx::query_as::<_, PlayerMatchRow>(
            "SELECT license, name FROM players
             WHERE LOWER(license) LIKE ? OR LOWER(name) LIKE ?
             LIMIT ?",
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// All characters owned by `license`.
    pub async fn list_by_license(
        pool: &MySqlPool,
        license: &str,
    ) -> Result<Vec<PlayerRow>, sqlx::Error> {
        sqlx::query_as::<_, PlayerRow>("SELECT * FROM players WHERE license = ?")
            .bind(license)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_citizenid(
        pool: &MySqlPool,
        citizenid: &str,
    ) -> Result<Option<PlayerRow>, sqlx::Error> {
        sqlx::query_as::<_, PlayerRow>("SELECT * FROM players WHERE citizenid = ? LIMIT 1")
            .bind(citizenid)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the `job` column of one character. Returns the number of
    /// rows changed.
    pub async fn update_job(
        pool: &MySqlPool,
        citizenid: &str,
        encoded_job: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE players SET job = ? WHERE citizenid = ? LIMIT 1")
            .bind(encoded_job)
            .bind(citizenid)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Build a `LIKE` pattern matching `text` anywhere, with `\`, `%` and `_`
/// in `text` matched literally.
pub fn like_contains(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
