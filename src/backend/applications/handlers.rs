//! Application HTTP Handlers
//!
//! - `POST /api/applications`             - job seeker applies
//! - `POST /api/applications/public`      - anyone applies with a résumé upload
//! - `PUT  /api/applications/{id}/status` - employer sets the status

use axum::{extract::State, http::StatusCode};
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use super::types::{
    Application, PublicApplication, SubmitApplicationRequest, UpdateStatusRequest,
    MAX_RESUME_BYTES, RESUME_MIME_TYPES,
};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Multipart, Path};
use crate::backend::jobs::db::get_job;
use crate::backend::middleware::AuthUser;
use crate::backend::storage::{FormData, MediaStore, UploadedFile};
use crate::shared::validation::{is_valid_email, normalize_email, optional_trimmed, required};
use crate::shared::{ApplicationStatus, Role};

/// 404 unless the job exists and still accepts applications
async fn require_open_job(pool: &PgPool, job_id: Uuid) -> Result<(), BackendError> {
    match get_job(pool, job_id).await? {
        Some(job) if job.is_active => Ok(()),
        _ => Err(BackendError::not_found("Job not found or no longer accepting applications")),
    }
}

/// Validate the text fields of a public application
pub fn validate_public_application(form: &FormData) -> Result<PublicApplication, BackendError> {
    let message = "Job, name and email are required";
    let job_id = required(form.text("job_id"), "job_id", message)?;
    let name = required(form.text("name"), "name", message)?;
    let email = required(form.text("email"), "email", message)?;

    let job_id = Uuid::parse_str(job_id).map_err(|_| BackendError::bad_request("Invalid job_id"))?;

    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(BackendError::bad_request("Invalid email format"));
    }

    Ok(PublicApplication {
        job_id,
        name: name.to_string(),
        email,
        cover_letter: form.trimmed("cover_letter"),
    })
}

/// Check a résumé's type and size
pub fn check_resume(file: &UploadedFile) -> Result<(), BackendError> {
    if !RESUME_MIME_TYPES.contains(&file.mime()) {
        return Err(BackendError::bad_request("Only PDF, DOC, and DOCX files are allowed"));
    }
    if file.len() > MAX_RESUME_BYTES {
        return Err(BackendError::bad_request("Resume must be 5MB or smaller"));
    }
    Ok(())
}

/// Apply to a job as a signed-in job seeker
pub async fn submit_application(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<Application>), BackendError> {
    auth.require_role(Role::JobSeeker)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let job_id = request
        .job_id
        .ok_or_else(|| BackendError::bad_request("job_id is required"))?;
    require_open_job(pool, job_id).await?;

    let cover_letter = optional_trimmed(request.cover_letter);
    let application = db::create_application(pool, job_id, auth.user_id, cover_letter.as_deref())
        .await
        .map_err(|e| {
            let err = BackendError::from(e);
            if err.is_unique_violation() {
                tracing::warn!("Duplicate application by {} to {}", auth.user_id, job_id);
                BackendError::bad_request("You have already applied to this job")
            } else {
                err
            }
        })?;

    tracing::info!("Job seeker {} applied to job {}", auth.user_id, job_id);

    Ok((StatusCode::CREATED, Json(application)))
}

/// Apply to a job without an account
///
/// Multipart fields: `job_id`, `name`, `email`, optional `cover_letter`
/// and optional `resume` file.
pub async fn submit_public_application(
    State(db_pool): State<Option<PgPool>>,
    State(storage): State<MediaStore>,
    Multipart(multipart): Multipart,
) -> Result<(StatusCode, Json<Application>), BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let mut form = FormData::from_multipart(multipart).await?;
    let application = validate_public_application(&form)?;

    let resume = form.take_file("resume");
    if let Some(file) = &resume {
        check_resume(file)?;
    }

    require_open_job(pool, application.job_id).await?;

    let resume_url = match &resume {
        Some(file) => Some(storage.store_file("resumes", file).await?),
        None => None,
    };

    let created = db::create_public_application(pool, &application, resume_url.as_deref()).await?;

    tracing::info!(
        "Public application {} from {} to job {}",
        created.id,
        application.email,
        application.job_id
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Set an application's status (employer owning the job)
pub async fn update_application_status(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(application_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Application>, BackendError> {
    auth.require_role(Role::Employer)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let status: ApplicationStatus = required(request.status.as_deref(), "status", "Status is required")?
        .parse()?;

    let owner = db::get_application_owner(pool, application_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Application not found"))?;

    if owner.employer_id != auth.user_id {
        tracing::warn!(
            "Employer {} tried to update application {}",
            auth.user_id,
            application_id
        );
        return Err(BackendError::forbidden("Unauthorized"));
    }

    let application = db::update_status(pool, application_id, status).await?;

    tracing::info!("Application {} set to {}", application_id, status);

    Ok(Json(application))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    fn resume(mime: &str, size: usize) -> UploadedFile {
        UploadedFile {
            file_name: Some("cv.pdf".into()),
            content_type: Some(mime.into()),
            bytes: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn test_resume_type_and_size() {
        assert!(check_resume(&resume("application/pdf", 10)).is_ok());
        assert!(check_resume(&resume("application/msword", 10)).is_ok());
        assert!(check_resume(&resume("image/png", 10)).is_err());
        assert_eq!(
            check_resume(&resume("application/pdf", MAX_RESUME_BYTES + 1))
                .unwrap_err()
                .message(),
            "Resume must be 5MB or smaller"
        );
    }

    #[test]
    fn test_public_application_fields() {
        let job_id = Uuid::new_v4();
        let form = FormData::default()
            .with_text("job_id", &job_id.to_string())
            .with_text("name", " Ada ")
            .with_text("email", "ADA@example.com");

        let application = validate_public_application(&form).unwrap();
        assert_eq!(application.job_id, job_id);
        assert_eq!(application.name, "Ada");
        assert_eq!(application.email, "ada@example.com");
        assert_eq!(application.cover_letter, None);
    }

    #[test]
    fn test_public_application_rejects_bad_input() {
        let form = FormData::default().with_text("name", "Ada");
        assert_eq!(
            validate_public_application(&form).unwrap_err().message(),
            "Job, name and email are required"
        );

        let form = FormData::default()
            .with_text("job_id", "not-a-uuid")
            .with_text("name", "Ada")
            .with_text("email", "ada@example.com");
        assert_eq!(validate_public_application(&form).unwrap_err().message(), "Invalid job_id");
    }
}
