//! Database operations for recruiting profiles

use sqlx::PgPool;
use uuid::Uuid;

use super::types::{EmployerProfile, JobSeekerProfile, UpdateEmployerRequest, UpdateJobSeekerRequest};

/// Get an employer profile with its account fields
pub async fn get_employer(pool: &PgPool, employer_id: Uuid) -> Result<Option<EmployerProfile>, sqlx::Error> {
    sqlx::query_as::<_, EmployerProfile>(
        r#"
        SELECT e.*, u.email, u.first_name, u.last_name, u.initials, u.avatar_url
        FROM employers e
        JOIN users u ON u.id = e.id
        WHERE e.id = $1
        "#,
    )
    .bind(employer_id)
    .fetch_optional(pool)
    .await
}

/// Apply a partial employer update
///
/// Returns `RowNotFound` when the employer does not exist.
pub async fn update_employer(
    pool: &PgPool,
    employer_id: Uuid,
    update: &UpdateEmployerRequest,
) -> Result<EmployerProfile, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE employers
        SET company_name = COALESCE($2, company_name),
            company_website = COALESCE($3, company_website),
            industry = COALESCE($4, industry),
            company_size = COALESCE($5, company_size),
            description = COALESCE($6, description),
            location = COALESCE($7, location),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(employer_id)
    .bind(&update.company_name)
    .bind(&update.company_website)
    .bind(&update.industry)
    .bind(&update.company_size)
    .bind(&update.description)
    .bind(&update.location)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound);
    }

    get_employer(pool, employer_id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Get a job seeker profile with its account fields
pub async fn get_job_seeker(pool: &PgPool, job_seeker_id: Uuid) -> Result<Option<JobSeekerProfile>, sqlx::Error> {
    sqlx::query_as::<_, JobSeekerProfile>(
        r#"
        SELECT s.*, u.email, u.first_name, u.last_name, u.initials, u.avatar_url
        FROM job_seekers s
        JOIN users u ON u.id = s.id
        WHERE s.id = $1
        "#,
    )
    .bind(job_seeker_id)
    .fetch_optional(pool)
    .await
}

/// Apply a partial job seeker update
///
/// Returns `RowNotFound` when the job seeker does not exist.
pub async fn update_job_seeker(
    pool: &PgPool,
    job_seeker_id: Uuid,
    update: &UpdateJobSeekerRequest,
) -> Result<JobSeekerProfile, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE job_seekers
        SET headline = COALESCE($2, headline),
            summary = COALESCE($3, summary),
            skills = COALESCE($4, skills),
            experience_years = COALESCE($5, experience_years),
            location = COALESCE($6, location),
            resume_url = COALESCE($7, resume_url),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(job_seeker_id)
    .bind(&update.headline)
    .bind(&update.summary)
    .bind(&update.skills)
    .bind(update.experience_years)
    .bind(&update.location)
    .bind(&update.resume_url)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound);
    }

    get_job_seeker(pool, job_seeker_id).await?.ok_or(sqlx::Error::RowNotFound)
}
