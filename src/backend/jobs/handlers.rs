//! Job HTTP Handlers
//!
//! - `GET    /api/jobs`      - public list of active jobs
//! - `GET    /api/jobs/{id}` - public job detail
//! - `POST   /api/jobs`      - employer creates a job
//! - `PUT    /api/jobs/{id}` - owning employer updates a job
//! - `DELETE /api/jobs/{id}` - owning employer deactivates a job

use axum::{extract::State, http::StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use super::types::{
    CreateJobRequest, Job, JobChanges, JobDetail, JobListing, ListJobsParams, NewJob,
    UpdateJobRequest,
};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path, Query};
use crate::backend::middleware::{AuthUser, AuthenticatedUser};
use crate::backend::profiles::db::get_employer;
use crate::shared::validation::{optional_trimmed, required};
use crate::shared::{JobType, Role};

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Validate a create request
pub fn validate_new_job(request: CreateJobRequest) -> Result<NewJob, BackendError> {
    let message = "Title and description are required";
    let title = required(request.title.as_deref(), "title", message)?.to_string();
    let description = required(request.description.as_deref(), "description", message)?.to_string();

    let job_type = match optional_trimmed(request.job_type) {
        Some(raw) => raw.parse::<JobType>()?,
        None => JobType::FullTime,
    };

    Ok(NewJob {
        title,
        description,
        requirements: clean_list(request.requirements),
        responsibilities: clean_list(request.responsibilities),
        job_type,
        location: optional_trimmed(request.location),
        salary_range: optional_trimmed(request.salary_range),
    })
}

/// Validate an update request
pub fn validate_job_changes(request: UpdateJobRequest) -> Result<JobChanges, BackendError> {
    let title = match request.title {
        Some(title) => Some(required(Some(title.as_str()), "title", "Title cannot be empty")?.to_string()),
        None => None,
    };
    let description = match request.description {
        Some(text) => Some(
            required(Some(text.as_str()), "description", "Description cannot be empty")?.to_string(),
        ),
        None => None,
    };
    let job_type = match request.job_type {
        Some(raw) => Some(raw.trim().parse::<JobType>()?),
        None => None,
    };

    Ok(JobChanges {
        title,
        description,
        requirements: request.requirements.map(clean_list),
        responsibilities: request.responsibilities.map(clean_list),
        job_type,
        location: optional_trimmed(request.location),
        salary_range: optional_trimmed(request.salary_range),
        is_active: request.is_active,
    })
}

/// Load a job and check the caller owns it
async fn owned_job(pool: &PgPool, auth: &AuthenticatedUser, job_id: Uuid) -> Result<Job, BackendError> {
    auth.require_role(Role::Employer)?;

    let job = db::get_job(pool, job_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Job not found"))?;

    if job.employer_id != auth.user_id {
        tracing::warn!("Employer {} tried to modify job {}", auth.user_id, job_id);
        return Err(BackendError::forbidden("Unauthorized"));
    }
    Ok(job)
}

/// List active jobs
pub async fn list_jobs(
    State(db_pool): State<Option<PgPool>>,
    Query(params): Query<ListJobsParams>,
) -> Result<Json<Vec<JobListing>>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let job_type = match optional_trimmed(params.job_type.clone()) {
        Some(raw) => Some(raw.parse::<JobType>()?),
        None => None,
    };
    let location = optional_trimmed(params.location.clone());

    let jobs = db::list_active_jobs(
        pool,
        job_type,
        location.as_deref(),
        params.limit(),
        params.offset(),
    )
    .await?;

    Ok(Json(jobs))
}

/// Job detail with the employer profile
pub async fn get_job(
    State(db_pool): State<Option<PgPool>>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobDetail>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let job = db::get_job(pool, job_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Job not found"))?;
    let employer = get_employer(pool, job.employer_id).await?;

    Ok(Json(JobDetail { job, employer }))
}

/// Create a job (employers only)
pub async fn create_job(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), BackendError> {
    auth.require_role(Role::Employer)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let new_job = validate_new_job(request)?;
    let job = db::create_job(pool, auth.user_id, &new_job).await?;

    tracing::info!("Employer {} created job {}", auth.user_id, job.id);

    Ok((StatusCode::CREATED, Json(job)))
}

/// Update a job (owning employer only)
pub async fn update_job(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(job_id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<Json<Job>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;
    owned_job(pool, &auth, job_id).await?;

    let changes = validate_job_changes(request)?;
    let job = db::update_job(pool, job_id, &changes).await?;

    tracing::info!("Employer {} updated job {}", auth.user_id, job_id);

    Ok(Json(job))
}

/// Deactivate a job (owning employer only)
pub async fn delete_job(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Value>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;
    owned_job(pool, &auth, job_id).await?;

    db::deactivate_job(pool, job_id).await?;

    tracing::info!("Employer {} deactivated job {}", auth.user_id, job_id);

    Ok(Json(json!({ "message": "Job deleted successfully" })))
}
