//! In-process implementation of [`PlayerStore`] and [`EventLogStore`].
//!
//! Mirrors the ordering and limit behaviour of the MySQL store so services
//! and HTTP handlers can be exercised without a database. Latency and
//! outage can be injected to drive failure paths.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::job::{GradeRecord, JobRecord};
use crate::logs::{matches_filters, LogEntry, LogQuery, NewLogEntry, SortOrder};
use crate::player::{CharacterMatch, CharacterRecord};
use crate::store::{EventLogStore, PlayerStore, StoreHandle};
use crate::types::DbId;

#[derive(Default)]
struct Tables {
    characters: Vec<CharacterRecord>,
    jobs: Vec<JobRecord>,
    grades: Vec<GradeRecord>,
    logs: Vec<LogEntry>,
    next_log_id: DbId,
}

#[derive(Default)]
struct Faults {
    unavailable: bool,
    latency: Option<Duration>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    faults: Mutex<Faults>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this store (for both players and logs) in a [`StoreHandle`].
    pub fn into_handle(self: Arc<Self>, call_timeout: Duration) -> StoreHandle {
        StoreHandle::new(self.clone(), self, call_timeout)
    }

    pub fn insert_character(&self, record: CharacterRecord) {
        self.tables().characters.push(record);
    }

    pub fn insert_job(&self, record: JobRecord) {
        self.tables().jobs.push(record);
    }

    pub fn insert_grade(&self, record: GradeRecord) {
        self.tables().grades.push(record);
    }

    /// Raw `job` column of a character, as last written.
    pub fn stored_job(&self, citizenid: &str) -> Option<Value> {
        self.tables()
            .characters
            .iter()
            .find(|c| c.citizenid == citizenid)
            .and_then(|c| c.job.clone())
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.faults().unavailable = unavailable;
    }

    /// Delay every subsequent call by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.faults().latency = Some(latency);
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn faults(&self) -> MutexGuard<'_, Faults> {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn enter(&self) -> Result<(), StoreError> {
        let (unavailable, latency) = {
            let faults = self.faults();
            (faults.unavailable, faults.latency)
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if unavailable {
            return Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PlayerStore for InMemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.enter().await
    }

    async fn search_characters(
        &self,
        needle: &str,
        limit: i64,
    ) -> Result<Vec<CharacterMatch>, StoreError> {
        self.enter().await?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .tables()
            .characters
            .iter()
            .filter(|c| {
                c.user_id.to_lowercase().contains(needle) || c.name.to_lowercase().contains(needle)
            })
            .take(limit)
            .map(|c| CharacterMatch {
                user_id: c.user_id.clone(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn characters_by_account(
        &self,
        user_id: &str,
    ) -> Result<Vec<CharacterRecord>, StoreError> {
        self.enter().await?;
        Ok(self
            .tables()
            .characters
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn character_by_citizenid(
        &self,
        citizenid: &str,
    ) -> Result<Option<CharacterRecord>, StoreError> {
        self.enter().await?;
        Ok(self
            .tables()
            .characters
            .iter()
            .find(|c| c.citizenid == citizenid)
            .cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<JobRecord>, StoreError> {
        self.enter().await?;
        let mut jobs = self.tables().jobs.clone();
        // MySQL's default collation orders labels case-insensitively.
        jobs.sort_by_cached_key(|j| j.label.to_lowercase());
        Ok(jobs)
    }

    async fn list_grades(&self) -> Result<Vec<GradeRecord>, StoreError> {
        self.enter().await?;
        let mut grades = self.tables().grades.clone();
        grades.sort_by(|a, b| (&a.job_name, a.level).cmp(&(&b.job_name, b.level)));
        Ok(grades)
    }

    async fn find_job(&self, name: &str) -> Result<Option<JobRecord>, StoreError> {
        self.enter().await?;
        Ok(self.tables().jobs.iter().find(|j| j.name == name).cloned())
    }

    async fn find_grade(
        &self,
        job_name: &str,
        level: i64,
    ) -> Result<Option<GradeRecord>, StoreError> {
        self.enter().await?;
        Ok(self
            .tables()
            .grades
            .iter()
            .find(|g| g.job_name == job_name && g.level == level)
            .cloned())
    }

    async fn update_character_job(
        &self,
        citizenid: &str,
        encoded_job: &str,
    ) -> Result<(), StoreError> {
        self.enter().await?;
        if let Some(character) = self
            .tables()
            .characters
            .iter_mut()
            .find(|c| c.citizenid == citizenid)
        {
            character.job = Some(Value::String(encoded_job.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventLogStore for InMemoryStore {
    async fn append(&self, entry: NewLogEntry) -> Result<DbId, StoreError> {
        self.enter().await?;
        let mut tables = self.tables();
        tables.next_log_id += 1;
        let id = tables.next_log_id;
        tables.logs.push(LogEntry {
            id,
            timestamp: entry.timestamp,
            event: entry.event,
        });
        Ok(id)
    }

    async fn query(&self, query: &LogQuery) -> Result<Vec<LogEntry>, StoreError> {
        self.enter().await?;
        let mut entries: Vec<LogEntry> = self
            .tables()
            .logs
            .iter()
            .filter(|e| matches_filters(&e.event, &query.filters))
            .cloned()
            .collect();

        entries.sort_by(|a, b| (a.timestamp, a.id).cmp(&(b.timestamp, b.id)));
        if query.order == SortOrder::Desc {
            entries.reverse();
        }
        entries.truncate(usize::try_from(query.limit).unwrap_or(0));
        Ok(entries)
    }
}
