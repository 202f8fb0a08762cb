//! Database operations for applications

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use super::types::{Application, ApplicationOwner, ApplicationWithApplicant, ApplicationWithJob, PublicApplication};
use crate::backend::jobs::types::Job;
use crate::shared::ApplicationStatus;

/// Insert an application from a signed-in job seeker
///
/// A second application to the same job violates the unique constraint.
pub async fn create_application(
    pool: &PgPool,
    job_id: Uuid,
    job_seeker_id: Uuid,
    cover_letter: Option<&str>,
) -> Result<Application, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        r#"
        INSERT INTO applications (id, job_id, job_seeker_id, cover_letter)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(job_id)
    .bind(job_seeker_id)
    .bind(cover_letter)
    .fetch_one(pool)
    .await
}

/// Insert an anonymous application
pub async fn create_public_application(
    pool: &PgPool,
    application: &PublicApplication,
    resume_url: Option<&str>,
) -> Result<Application, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        r#"
        INSERT INTO applications (id, job_id, applicant_name, applicant_email, cover_letter, resume_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(application.job_id)
    .bind(&application.name)
    .bind(&application.email)
    .bind(&application.cover_letter)
    .bind(resume_url)
    .fetch_one(pool)
    .await
}

/// Get an application and the employer owning its job
pub async fn get_application_owner(
    pool: &PgPool,
    application_id: Uuid,
) -> Result<Option<ApplicationOwner>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationOwner>(
        r#"
        SELECT a.*, j.employer_id
        FROM applications a
        JOIN jobs j ON j.id = a.job_id
        WHERE a.id = $1
        "#,
    )
    .bind(application_id)
    .fetch_optional(pool)
    .await
}

/// Overwrite an application's status
pub async fn update_status(
    pool: &PgPool,
    application_id: Uuid,
    status: ApplicationStatus,
) -> Result<Application, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        r#"
        UPDATE applications
        SET status = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(application_id)
    .bind(status.as_str())
    .fetch_one(pool)
    .await
}

/// Applications to one job with the applicant's name and avatar
pub async fn list_for_job(pool: &PgPool, job_id: Uuid) -> Result<Vec<ApplicationWithApplicant>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationWithApplicant>(
        r#"
        SELECT a.*,
               u.first_name AS applicant_first_name,
               u.last_name AS applicant_last_name,
               u.avatar_url AS applicant_avatar_url
        FROM applications a
        LEFT JOIN users u ON u.id = a.job_seeker_id
        WHERE a.job_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
}

/// A job seeker's applications, each with its job
pub async fn list_for_job_seeker(
    pool: &PgPool,
    job_seeker_id: Uuid,
) -> Result<Vec<ApplicationWithJob>, sqlx::Error> {
    let applications = sqlx::query_as::<_, Application>(
        "SELECT * FROM applications WHERE job_seeker_id = $1 ORDER BY created_at DESC",
    )
    .bind(job_seeker_id)
    .fetch_all(pool)
    .await?;

    let job_ids: Vec<Uuid> = applications.iter().map(|a| a.job_id).collect();
    let jobs = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ANY($1)")
        .bind(&job_ids)
        .fetch_all(pool)
        .await?;

    let jobs_by_id: HashMap<Uuid, Job> = jobs.into_iter().map(|job| (job.id, job)).collect();

    Ok(applications
        .into_iter()
        .map(|application| {
            let job = jobs_by_id.get(&application.job_id).cloned();
            ApplicationWithJob { application, job }
        })
        .collect())
}
