//! Job assignment: validate a (job, grade) pair and write it onto a
//! character.
//!
//! Validation and the write are separate store calls with no transaction
//! around them. A job or grade deleted in between is not detected; the
//! snapshot written is the one read during validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::job::{GradeRecord, JobCatalog, JobRecord};
use crate::normalize::encode_column;
use crate::store::StoreHandle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedGrade {
    pub level: i64,
    pub name: String,
}

/// The job object stored in a character's `job` column.
///
/// A copy of the job and grade taken at assignment time; later catalog
/// edits do not reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedJob {
    pub name: String,
    pub label: String,
    pub grade: AssignedGrade,
    pub payment: i64,
    pub onduty: bool,
    pub isboss: bool,
}

impl AssignedJob {
    /// Build the stored job object. Always off duty.
    pub fn snapshot(job: &JobRecord, grade: &GradeRecord) -> Self {
        Self {
            name: job.name.clone(),
            label: job.label.clone(),
            grade: AssignedGrade {
                level: grade.level,
                name: grade.name.clone(),
            },
            payment: grade.payment,
            onduty: false,
            isboss: grade.is_boss,
        }
    }
}

#[derive(Clone)]
pub struct JobAssignmentService {
    store: StoreHandle,
    catalog: JobCatalog,
}

impl JobAssignmentService {
    pub fn new(store: StoreHandle, catalog: JobCatalog) -> Self {
        Self { store, catalog }
    }

    /// Assign `job_name` at `grade_level` to the character `citizenid`.
    ///
    /// Checks run in order (character, job, grade) and the first failure
    /// is returned; nothing is written unless all pass. The character's
    /// `job` column is overwritten, not merged.
    pub async fn assign(
        &self,
        citizenid: &str,
        job_name: &str,
        grade_level: i64,
    ) -> Result<AssignedJob, CoreError> {
        if self
            .store
            .character_by_citizenid(citizenid)
            .await?
            .is_none()
        {
            return Err(CoreError::not_found("Character", citizenid));
        }

        let job = self.catalog.job(job_name).await?;
        let grade = self.catalog.grade(job_name, grade_level).await?;

        let assigned = AssignedJob::snapshot(&job, &grade);
        let encoded = encode_column(&assigned)?;
        self.store.update_character_job(citizenid, &encoded).await?;

        tracing::info!(
            citizenid,
            job = %assigned.name,
            grade = assigned.grade.level,
            "Assigned job to character"
        );

        Ok(assigned)
    }
}
