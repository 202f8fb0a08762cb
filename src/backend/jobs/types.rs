//! Job posting types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::profiles::types::EmployerProfile;
use crate::shared::JobType;

/// Default and maximum page size of the public job list
pub const DEFAULT_JOB_PAGE: i64 = 10;
pub const MAX_JOB_PAGE: i64 = 100;

/// A job posting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    /// Owning employer (same id as the employer's user)
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    #[sqlx(try_from = "String")]
    pub job_type: JobType,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    /// Inactive jobs are hidden from the public list and closed to applications
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employer name and avatar shown next to a listed job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct JobEmployer {
    #[sqlx(rename = "employer_first_name")]
    pub first_name: Option<String>,
    #[sqlx(rename = "employer_last_name")]
    pub last_name: Option<String>,
    #[sqlx(rename = "employer_avatar_url")]
    pub avatar_url: Option<String>,
    #[sqlx(rename = "employer_company_name")]
    pub company_name: Option<String>,
}

/// Row of the public job list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct JobListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: Job,
    #[sqlx(flatten)]
    pub employer: JobEmployer,
}

/// A job with its employer's full profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    pub employer: Option<EmployerProfile>,
}

/// Query string of `GET /api/jobs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListJobsParams {
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListJobsParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_JOB_PAGE).clamp(1, MAX_JOB_PAGE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Body of `POST /api/jobs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    /// Defaults to `full_time`
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
}

/// Body of `PUT /api/jobs/{id}`; absent fields are unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub is_active: Option<bool>,
}

/// Validated job fields ready for insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub job_type: JobType,
    pub location: Option<String>,
    pub salary_range: Option<String>,
}

/// Validated partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub responsibilities: Option<Vec<String>>,
    pub job_type: Option<JobType>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub is_active: Option<bool>,
}
