//! Store capabilities and the bounded handle services use to reach them.
//!
//! [`PlayerStore`] and [`EventLogStore`] are implemented by the MySQL
//! backend in `playerdesk-db` and by [`InMemoryStore`](crate::memory::InMemoryStore).
//! Services never hold a store directly; they receive a [`StoreHandle`],
//! which bounds every call with a timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::job::{GradeRecord, JobRecord};
use crate::logs::{LogEntry, LogQuery, NewLogEntry};
use crate::player::{CharacterMatch, CharacterRecord};
use crate::types::DbId;

/// Default per-call store timeout.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum number of rows a character search may return.
pub const SEARCH_LIMIT: i64 = 20;

/// Read/write access to the `players`, `jobs` and `job_grades` data.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Characters whose account identifier or name contains `needle`
    /// (already lowercased), case-insensitively, in store order, at most
    /// `limit` rows.
    async fn search_characters(
        &self,
        needle: &str,
        limit: i64,
    ) -> Result<Vec<CharacterMatch>, StoreError>;

    /// Every character owned by `user_id`.
    async fn characters_by_account(&self, user_id: &str)
        -> Result<Vec<CharacterRecord>, StoreError>;

    async fn character_by_citizenid(
        &self,
        citizenid: &str,
    ) -> Result<Option<CharacterRecord>, StoreError>;

    /// All jobs, ordered by label ascending.
    async fn list_jobs(&self) -> Result<Vec<JobRecord>, StoreError>;

    /// All grades, ordered by job name then level ascending.
    async fn list_grades(&self) -> Result<Vec<GradeRecord>, StoreError>;

    async fn find_job(&self, name: &str) -> Result<Option<JobRecord>, StoreError>;

    async fn find_grade(&self, job_name: &str, level: i64)
        -> Result<Option<GradeRecord>, StoreError>;

    /// Overwrite the `job` column of the single character with `citizenid`.
    async fn update_character_job(
        &self,
        citizenid: &str,
        encoded_job: &str,
    ) -> Result<(), StoreError>;
}

/// Append-only event log.
#[async_trait]
pub trait EventLogStore: Send + Sync {
    async fn append(&self, entry: NewLogEntry) -> Result<DbId, StoreError>;

    async fn query(&self, query: &LogQuery) -> Result<Vec<LogEntry>, StoreError>;
}

/// Shared, cheaply cloneable access to the stores with a per-call timeout.
///
/// Dropping a future returned by any method cancels the underlying store
/// call.
#[derive(Clone)]
pub struct StoreHandle {
    players: Arc<dyn PlayerStore>,
    logs: Arc<dyn EventLogStore>,
    call_timeout: Duration,
}

impl StoreHandle {
    pub fn new(
        players: Arc<dyn PlayerStore>,
        logs: Arc<dyn EventLogStore>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            players,
            logs,
            call_timeout,
        }
    }

    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.call_timeout, "Store call timed out");
                Err(StoreError::Timeout {
                    operation,
                    after: self.call_timeout,
                })
            }
        }
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.bounded("ping", self.players.ping()).await
    }

    pub async fn search_characters(
        &self,
        needle: &str,
        limit: i64,
    ) -> Result<Vec<CharacterMatch>, StoreError> {
        self.bounded(
            "search_characters",
            self.players.search_characters(needle, limit),
        )
        .await
    }

    pub async fn characters_by_account(
        &self,
        user_id: &str,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        self.bounded(
            "characters_by_account",
            self.players.characters_by_account(user_id),
        )
        .await
    }

    pub async fn character_by_citizenid(
        &self,
        citizenid: &str,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        self.bounded(
            "character_by_citizenid",
            self.players.character_by_citizenid(citizenid),
        )
        .await
    }

    pub async fn list_jobs(&self) -> Result<Vec<JobRecord>, StoreError> {
        self.bounded("list_jobs", self.players.list_jobs()).await
    }

    pub async fn list_grades(&self) -> Result<Vec<GradeRecord>, StoreError> {
        self.bounded("list_grades", self.players.list_grades()).await
    }

    pub async fn find_job(&self, name: &str) -> Result<Option<JobRecord>, StoreError> {
        self.bounded("find_job", self.players.find_job(name)).await
    }

    pub async fn find_grade(
        &self,
        job_name: &str,
        level: i64,
    ) -> Result<Option<GradeRecord>, StoreError> {
        self.bounded("find_grade", self.players.find_grade(job_name, level))
            .await
    }

    pub async fn update_character_job(
        &self,
        citizenid: &str,
        encoded_job: &str,
    ) -> Result<(), StoreError> {
        self.bounded(
            "update_character_job",
            self.players.update_character_job(citizenid, encoded_job),
        )
        .await
    }

    pub async fn append_log(&self, entry: NewLogEntry) -> Result<DbId, StoreError> {
        self.bounded("append_log", self.logs.append(entry)).await
    }

    pub async fn query_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, StoreError> {
        self.bounded("query_logs", self.logs.query(query)).await
    }
}
