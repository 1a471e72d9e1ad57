//! Job catalog: jobs and their grade ladders.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::store::StoreHandle;

/// A row from the `jobs` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    pub name: String,
    pub label: String,
}

/// A row from the `job_grades` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeRecord {
    pub job_name: String,
    pub level: i64,
    pub name: String,
    pub payment: i64,
    pub is_boss: bool,
}

/// One rung of a job's grade ladder as exposed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub level: i64,
    pub name: String,
    /// Same text as `name`; the dashboard reads either.
    pub label: String,
    pub payment: i64,
    pub isboss: bool,
}

impl From<GradeRecord> for Grade {
    fn from(record: GradeRecord) -> Self {
        Self {
            level: record.level,
            label: record.name.clone(),
            name: record.name,
            payment: record.payment,
            isboss: record.is_boss,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub name: String,
    pub label: String,
    pub grades: Vec<Grade>,
}

/// Join grade rows onto their jobs in memory.
///
/// Job order is taken from `jobs` and grade order from `grades`, so callers
/// pass rows already sorted (jobs by label, grades by job name then level).
/// Grades whose job is missing are dropped.
pub fn build_catalog(jobs: Vec<JobRecord>, grades: Vec<GradeRecord>) -> Vec<Job> {
    let mut catalog: Vec<Job> = jobs
        .into_iter()
        .map(|job| Job {
            name: job.name,
            label: job.label,
            grades: Vec::new(),
        })
        .collect();

    let index: HashMap<String, usize> = catalog
        .iter()
        .enumerate()
        .map(|(i, job)| (job.name.clone(), i))
        .collect();

    for grade in grades {
        match index.get(&grade.job_name) {
            Some(&i) => catalog[i].grades.push(grade.into()),
            None => {
                tracing::debug!(
                    job = %grade.job_name,
                    level = grade.level,
                    "Skipping grade with no matching job"
                );
            }
        }
    }

    catalog
}

#[derive(Clone)]
pub struct JobCatalog {
    store: StoreHandle,
}

impl JobCatalog {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Every job with its grades, jobs ordered by label and grades by level.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, CoreError> {
        let jobs = self.store.list_jobs().await?;
        let grades = self.store.list_grades().await?;
        Ok(build_catalog(jobs, grades))
    }

    pub async fn job(&self, name: &str) -> Result<JobRecord, CoreError> {
        self.store
            .find_job(name)
            .await?
            .ok_or_else(|| CoreError::InvalidJob(name.to_string()))
    }

    pub async fn grade(&self, job_name: &str, level: i64) -> Result<GradeRecord, CoreError> {
        self.store
            .find_grade(job_name, level)
            .await?
            .ok_or_else(|| CoreError::InvalidGrade {
                job: job_name.to_string(),
                level,
            })
    }
}
