use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MentorshipStatus {
    Pending,
    Accepted,
    Declined,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MentorshipRequest {
    pub id: i64,
    pub student_id: i64,
    pub alumni_id: i64,
    pub message: String,
    pub status: MentorshipStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewMentorshipRequest {
    pub alumni_id: i64,

    #[validate(length(max = 2000, message = "Message is too long"))]
    #[serde(default)]
    pub message: Option<String>,
}

/// Request joined with the counterparty: the alumni for a student's sent
/// list, the student for an alumni's received list.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct MentorshipRequestView {
    pub id: i64,
    pub message: String,
    pub status: MentorshipStatus,
    pub created_at: DateTime<Utc>,
    pub other_user_id: i64,
    pub other_user_name: String,
    pub other_user_email: String,
}
