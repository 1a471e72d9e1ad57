//! Repository for the `jobs` and `job_grades` tables.

use sqlx::MySqlPool;

use crate::models::job::{GradeRow, JobRow};

/// Column list for `job_grades` queries, normalized to `i64`.
const GRADE_COLUMNS: &str = "job_name, CAST(grade AS SIGNED) AS grade, name, \
     CAST(payment AS SIGNED) AS payment, CAST(isboss AS SIGNED) AS isboss";

pub struct JobRepo;

impl JobRepo {
    /// All jobs ordered by label ascending.
    pub async fn list(pool: &MySqlPool) -> Result<Vec<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>("SELECT name, label FROM jobs ORDER BY label ASC")
            .fetch_all(pool)
            .await
    }

    /// All grades ordered by job name, then level.
    pub async fn list_grades(pool: &MySqlPool) -> Result<Vec<GradeRow>, sqlx::Error> {
        let query =
            format!("SELECT {GRADE_COLUMNS} FROM job_grades ORDER BY job_name ASC, grade ASC");
        sqlx::query_as::<_, GradeRow>(&query).fetch_all(pool).await
    }

    pub async fn find_by_name(pool: &MySqlPool, name: &str) -> Result<Option<JobRow>, sqlx::Error> {
        sqlx::query_as::<_, JobRow>("SELECT name, label FROM jobs WHERE name = ? LIMIT 1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_grade(
        pool: &MySqlPool,
        job_name: &str,
        level: i64,
    ) -> Result<Option<GradeRow>, sqlx::Error> {
        let query = format!(
            "SELECT {GRADE_COLUMNS} FROM job_grades WHERE job_name = ? AND grade = ? LIMIT 1"
        );
        sqlx::query_as::<_, GradeRow>(&query)
            .bind(job_name)
            .bind(level)
            .fetch_optional(pool)
            .await
    }
}
