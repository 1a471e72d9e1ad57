//! Rows from the `jobs` and `job_grades` tables.

use playerdesk_core::job::{GradeRecord, JobRecord};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub name: String,
    pub label: String,
}

impl From<JobRow> for JobRecord {
    fn from(row: JobRow) -> Self {
        Self {
            name: row.name,
            label: row.label,
        }
    }
}

/// A `job_grades` row. Numeric columns are selected with
/// `CAST(.. AS SIGNED)` so they decode as `i64` whatever their declared
/// width.
#[derive(Debug, Clone, FromRow)]
pub struct GradeRow {
    pub job_name: String,
    pub grade: i64,
    pub name: String,
    pub payment: i64,
    /// Stored as a 0/1 flag.
    pub isboss: i64,
}

impl From<GradeRow> for GradeRecord {
    fn from(row: GradeRow) -> Self {
        Self {
            job_name: row.job_name,
            level: row.grade,
            name: row.name,
            payment: row.payment,
            is_boss: row.isboss != 0,
        }
    }
}
