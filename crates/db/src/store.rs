//! MySQL-backed implementation of the core store traits.

use async_trait::async_trait;
use playerdesk_core::error::StoreError;
use playerdesk_core::job::{GradeRecord, JobRecord};
use playerdesk_core::logs::{LogEntry, LogQuery, NewLogEntry};
use playerdesk_core::normalize::encode_column;
use playerdesk_core::player::{CharacterMatch, CharacterRecord};
use playerdesk_core::store::{EventLogStore, PlayerStore};
use playerdesk_core::types::DbId;

use crate::repositories::{EventLogRepo, JobRepo, PlayerRepo};
use crate::DbPool;

/// Store over a MySQL pool. Cheap to clone.
#[derive(Clone)]
pub struct MySqlStore {
    pool: DbPool,
}

impl MySqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Pool exhaustion and shutdown are reported as unavailability; every
/// other failure is a query error.
fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Query(other.to_string()),
    }
}

#[async_trait]
impl PlayerStore for MySqlStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(store_error)
    }

    async fn search_characters(
        &self,
        needle: &str,
        limit: i64,
    ) -> Result<Vec<CharacterMatch>, StoreError> {
        let rows = PlayerRepo::search(&self.pool, needle, limit)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(CharacterMatch::from).collect())
    }

    async fn characters_by_account(
        &self,
        user_id: &str,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        let rows = PlayerRepo::list_by_license(&self.pool, user_id)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(CharacterRecord::from).collect())
    }

    async fn character_by_citizenid(
        &self,
        citizenid: &str,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        let row = PlayerRepo::find_by_citizenid(&self.pool, citizenid)
            .await
            .map_err(store_error)?;
        Ok(row.map(CharacterRecord::from))
    }

    async fn list_jobs(&self) -> Result<Vec<JobRecord>, StoreError> {
        let rows = JobRepo::list(&self.pool).await.map_err(store_error)?;
        Ok(rows.into_iter().map(JobRecord::from).collect())
    }

    async fn list_grades(&self) -> Result<Vec<GradeRecord>, StoreError> {
        let rows = JobRepo::list_grades(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(GradeRecord::from).collect())
    }

    async fn find_job(&self, name: &str) -> Result<Option<JobRecord>, StoreError> {
        let row = JobRepo::find_by_name(&self.pool, name)
            .await
            .map_err(store_error)?;
        Ok(row.map(JobRecord::from))
    }

    async fn find_grade(
        &self,
        job_name: &str,
        level: i64,
    ) -> Result<Option<GradeRecord>, StoreError> {
        let row = JobRepo::find_grade(&self.pool, job_name, level)
            .await
            .map_err(store_error)?;
        Ok(row.map(GradeRecord::from))
    }

    async fn update_character_job(
        &self,
        citizenid: &str,
        encoded_job: &str,
    ) -> Result<(), StoreError> {
        let changed = PlayerRepo::update_job(&self.pool, citizenid, encoded_job)
            .await
            .map_err(store_error)?;
        // Zero is expected when the stored job already equals the new one.
        tracing::debug!(citizenid, changed, "Updated character job column");
        Ok(())
    }
}

#[async_trait]
impl EventLogStore for MySqlStore {
    async fn append(&self, entry: NewLogEntry) -> Result<DbId, StoreError> {
        let payload =
            encode_column(&entry.event).map_err(|e| StoreError::Query(e.to_string()))?;
        EventLogRepo::insert(&self.pool, &payload, entry.timestamp)
            .await
            .map_err(store_error)
    }

    async fn query(&self, query: &LogQuery) -> Result<Vec<LogEntry>, StoreError> {
        let rows = EventLogRepo::query(&self.pool, query)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(LogEntry::from).collect())
    }
}
