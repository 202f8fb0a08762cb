//! Job application types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::jobs::types::Job;
use crate::shared::ApplicationStatus;

/// Largest accepted résumé
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for résumés (PDF, DOC, DOCX)
pub const RESUME_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// An application to a job
///
/// Public applications have no `job_seeker_id`; the applicant is identified
/// by name and email instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_seeker_id: Option<Uuid>,
    pub applicant_name: Option<String>,
    pub applicant_email: Option<String>,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Name and avatar of the job seeker behind an application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Applicant {
    #[sqlx(rename = "applicant_first_name")]
    pub first_name: Option<String>,
    #[sqlx(rename = "applicant_last_name")]
    pub last_name: Option<String>,
    #[sqlx(rename = "applicant_avatar_url")]
    pub avatar_url: Option<String>,
}

/// Application as listed to the employer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ApplicationWithApplicant {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: Application,
    #[sqlx(flatten)]
    pub applicant: Applicant,
}

/// Application as listed to the job seeker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationWithJob {
    #[serde(flatten)]
    pub application: Application,
    pub job: Option<Job>,
}

/// Application together with the employer that owns its job
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApplicationOwner {
    #[sqlx(flatten)]
    pub application: Application,
    pub employer_id: Uuid,
}

/// Body of `POST /api/applications`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitApplicationRequest {
    pub job_id: Option<Uuid>,
    pub cover_letter: Option<String>,
}

/// Body of `PUT /api/applications/{id}/status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// Validated public application
#[derive(Debug, Clone, PartialEq)]
pub struct PublicApplication {
    pub job_id: Uuid,
    pub name: String,
    pub email: String,
    pub cover_letter: Option<String>,
}
