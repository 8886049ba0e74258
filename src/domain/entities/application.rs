use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectApplication {
    pub id: i64,
    pub project_id: i64,
    pub student_id: i64,
    pub position_id: Option<i64>,
    pub message: String,
    pub status: ApplicationStatus,
    pub has_team: bool,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ApplyRequest {
    pub position_id: Option<i64>,

    #[validate(length(max = 2000, message = "Message is too long"))]
    pub message: Option<String>,

    pub has_team: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CompleteRequest {
    #[validate(length(max = 4000, message = "Feedback is too long"))]
    pub feedback: Option<String>,
}

/// Application joined with its project, position, and student for listings.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ApplicationView {
    pub id: i64,
    pub project_id: i64,
    pub project_title: String,
    pub position_id: Option<i64>,
    pub position_title: Option<String>,
    pub student_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub message: String,
    pub status: ApplicationStatus,
    pub has_team: bool,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}
