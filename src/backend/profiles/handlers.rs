//! Profile HTTP Handlers
//!
//! Every route here sits behind `auth_middleware`. Reading a profile only
//! needs a valid token; changing it or listing its jobs and applications
//! is limited to the profile's owner.

use axum::extract::State;
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use super::types::{EmployerProfile, JobSeekerProfile, UpdateEmployerRequest, UpdateJobSeekerRequest};
use crate::backend::applications::db::{list_for_job, list_for_job_seeker};
use crate::backend::applications::types::{ApplicationWithApplicant, ApplicationWithJob};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::jobs::db::{get_job, list_jobs_for_employer};
use crate::backend::jobs::types::Job;
use crate::backend::middleware::AuthUser;
use crate::shared::validation::optional_trimmed;

/// Employer profile
pub async fn get_employer_profile(
    State(db_pool): State<Option<PgPool>>,
    Path(employer_id): Path<Uuid>,
) -> Result<Json<EmployerProfile>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let profile = db::get_employer(pool, employer_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Employer not found"))?;

    Ok(Json(profile))
}

/// Update the caller's employer profile
pub async fn update_employer_profile(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(employer_id): Path<Uuid>,
    Json(request): Json<UpdateEmployerRequest>,
) -> Result<Json<EmployerProfile>, BackendError> {
    auth.require_self(employer_id)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let update = UpdateEmployerRequest {
        company_name: optional_trimmed(request.company_name),
        company_website: optional_trimmed(request.company_website),
        industry: optional_trimmed(request.industry),
        company_size: optional_trimmed(request.company_size),
        description: optional_trimmed(request.description),
        location: optional_trimmed(request.location),
    };

    let profile = db::update_employer(pool, employer_id, &update).await?;

    tracing::info!("Employer {} updated profile", employer_id);

    Ok(Json(profile))
}

/// All jobs of the caller's employer profile, including inactive ones
pub async fn get_employer_jobs(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(employer_id): Path<Uuid>,
) -> Result<Json<Vec<Job>>, BackendError> {
    auth.require_self(employer_id)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    Ok(Json(list_jobs_for_employer(pool, employer_id).await?))
}

/// Applications to one of the caller's jobs
pub async fn get_job_applications(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path((employer_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<ApplicationWithApplicant>>, BackendError> {
    auth.require_self(employer_id)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    match get_job(pool, job_id).await? {
        Some(job) if job.employer_id == employer_id => {}
        _ => return Err(BackendError::not_found("Job not found")),
    }

    Ok(Json(list_for_job(pool, job_id).await?))
}

/// Job seeker profile
pub async fn get_job_seeker_profile(
    State(db_pool): State<Option<PgPool>>,
    Path(job_seeker_id): Path<Uuid>,
) -> Result<Json<JobSeekerProfile>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let profile = db::get_job_seeker(pool, job_seeker_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Job seeker not found"))?;

    Ok(Json(profile))
}

/// Update the caller's job seeker profile
pub async fn update_job_seeker_profile(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(job_seeker_id): Path<Uuid>,
    Json(request): Json<UpdateJobSeekerRequest>,
) -> Result<Json<JobSeekerProfile>, BackendError> {
    auth.require_self(job_seeker_id)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    if matches!(request.experience_years, Some(years) if years < 0) {
        return Err(BackendError::bad_request("experience_years cannot be negative"));
    }

    let update = UpdateJobSeekerRequest {
        headline: optional_trimmed(request.headline),
        summary: optional_trimmed(request.summary),
        skills: request.skills.map(|skills| {
            skills
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        }),
        experience_years: request.experience_years,
        location: optional_trimmed(request.location),
        resume_url: optional_trimmed(request.resume_url),
    };

    let profile = db::update_job_seeker(pool, job_seeker_id, &update).await?;

    tracing::info!("Job seeker {} updated profile", job_seeker_id);

    Ok(Json(profile))
}

/// The caller's applications with their jobs
pub async fn get_job_seeker_applications(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(job_seeker_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationWithJob>>, BackendError> {
    auth.require_self(job_seeker_id)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    Ok(Json(list_for_job_seeker(pool, job_seeker_id).await?))
}
