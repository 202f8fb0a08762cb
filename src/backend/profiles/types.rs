//! Employer and job seeker profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account fields shown with a recruiting profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ProfileUser {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub initials: Option<String>,
    pub avatar_url: Option<String>,
}

/// Employer profile joined with its account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct EmployerProfile {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub user: ProfileUser,
}

/// Job seeker profile joined with its account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct JobSeekerProfile {
    pub id: Uuid,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<i32>,
    pub location: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub user: ProfileUser,
}

/// Body of `PUT /api/employers/{id}`; absent fields are unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEmployerRequest {
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Body of `PUT /api/job-seekers/{id}`; absent fields are unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJobSeekerRequest {
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub location: Option<String>,
    pub resume_url: Option<String>,
}
