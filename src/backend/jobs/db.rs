//! Database operations for jobs

use sqlx::PgPool;
use uuid::Uuid;

use super::types::{Job, JobChanges, JobListing, NewJob};
use crate::shared::JobType;

/// `%term%` for ILIKE with the wildcard characters of `term` escaped
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Active jobs, newest first, with employer name and avatar
pub async fn list_active_jobs(
    pool: &PgPool,
    job_type: Option<JobType>,
    location: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<JobListing>, sqlx::Error> {
    sqlx::query_as::<_, JobListing>(
        r#"
        SELECT j.*,
               u.first_name AS employer_first_name,
               u.last_name AS employer_last_name,
               u.avatar_url AS employer_avatar_url,
               e.company_name AS employer_company_name
        FROM jobs j
        JOIN employers e ON e.id = j.employer_id
        JOIN users u ON u.id = e.id
        WHERE j.is_active
          AND ($1::TEXT IS NULL OR j.job_type = $1)
          AND ($2::TEXT IS NULL OR j.location ILIKE $2)
        ORDER BY j.created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(job_type.map(|t| t.as_str()))
    .bind(location.map(contains_pattern))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Get a job by id, active or not
pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

/// Insert a job for an employer
pub async fn create_job(pool: &PgPool, employer_id: Uuid, job: &NewJob) -> Result<Job, sqlx::Error> {
    sqlx::query_as::<_, Job>(
        r#"
        INSERT INTO jobs (id, employer_id, title, description, requirements,
                          responsibilities, job_type, location, salary_range)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(employer_id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.requirements)
    .bind(&job.responsibilities)
    .bind(job.job_type.as_str())
    .bind(&job.location)
    .bind(&job.salary_range)
    .fetch_one(pool)
    .await
}

/// Apply a partial update
pub async fn update_job(pool: &PgPool, job_id: Uuid, changes: &JobChanges) -> Result<Job, sqlx::Error> {
    sqlx::query_as::<_, Job>(
        r#"
        UPDATE jobs
        SET title = COALESCE($2, title),
            description = COALESCE($3, description),
            requirements = COALESCE($4, requirements),
            responsibilities = COALESCE($5, responsibilities),
            job_type = COALESCE($6, job_type),
            location = COALESCE($7, location),
            salary_range = COALESCE($8, salary_range),
            is_active = COALESCE($9, is_active),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(&changes.requirements)
    .bind(&changes.responsibilities)
    .bind(changes.job_type.map(|t| t.as_str()))
    .bind(&changes.location)
    .bind(&changes.salary_range)
    .bind(changes.is_active)
    .fetch_one(pool)
    .await
}

/// Soft delete: hide the job and close it to applications
pub async fn deactivate_job(pool: &PgPool, job_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE jobs SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Every job of an employer, newest first
pub async fn list_jobs_for_employer(pool: &PgPool, employer_id: Uuid) -> Result<Vec<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>(
        "SELECT * FROM jobs WHERE employer_id = $1 ORDER BY created_at DESC",
    )
    .bind(employer_id)
    .fetch_all(pool)
    .await
}
