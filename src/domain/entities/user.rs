use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::password::validate_password_strength;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Student,
    Alumni,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub graduation_year: Option<i64>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub branch: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_path: Option<String>,
    pub cv_path: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    pub role: Role,

    pub graduation_year: Option<i64>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Partial profile update. Fields left out of the request keep their stored
/// value; list fields, when present, replace the child rows wholesale.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub graduation_year: Option<i64>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub branch: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,

    #[validate(custom(function = "validate_optional_http_url"))]
    pub linkedin_url: Option<String>,

    #[validate(custom(function = "validate_optional_http_url"))]
    pub github_url: Option<String>,

    #[validate(custom(function = "validate_optional_http_url"))]
    pub website_url: Option<String>,

    pub skills: Option<Vec<String>>,
    pub achievements: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
}

pub fn validate_optional_http_url(url: &str) -> Result<(), validator::ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
        _ => {
            let mut err = validator::ValidationError::new("invalid_url");
            err.message = Some("URL must start with http:// or https://".into());
            Err(err)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub is_available: bool,
}

/// Full profile as returned to the owning caller.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub graduation_year: Option<i64>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub branch: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub website_url: Option<String>,
    pub avatar_path: Option<String>,
    pub cv_path: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    pub languages: Vec<String>,
}

impl UserProfile {
    pub fn from_parts(
        user: User,
        skills: Vec<String>,
        achievements: Vec<String>,
        languages: Vec<String>,
    ) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            graduation_year: user.graduation_year,
            department: user.department,
            specialization: user.specialization,
            branch: user.branch,
            bio: user.bio,
            company: user.company,
            job_title: user.job_title,
            phone: user.phone,
            linkedin_url: user.linkedin_url,
            github_url: user.github_url,
            website_url: user.website_url,
            avatar_path: user.avatar_path,
            cv_path: user.cv_path,
            is_available: user.is_available,
            created_at: user.created_at,
            skills,
            achievements,
            languages,
        }
    }
}

/// Alumni directory entry.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AlumniSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub graduation_year: Option<i64>,
    pub department: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub avatar_path: Option<String>,
    pub is_available: bool,
}
