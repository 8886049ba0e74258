use async_trait::async_trait;
use chrono::Utc;

use crate::{
    entities::mentorship::{MentorshipRequest, MentorshipRequestView, MentorshipStatus},
    errors::AppError,
    repositories::sqlx_repo::SqlxMentorshipRepo,
};

#[async_trait]
pub trait MentorshipRepository: Send + Sync {
    async fn insert_request(
        &self,
        student_id: i64,
        alumni_id: i64,
        message: &str,
    ) -> Result<i64, AppError>;
    async fn get(&self, id: i64) -> Result<Option<MentorshipRequest>, AppError>;
    async fn set_status(&self, id: i64, status: MentorshipStatus) -> Result<(), AppError>;
    async fn list_sent(&self, student_id: i64) -> Result<Vec<MentorshipRequestView>, AppError>;
    async fn list_received(&self, alumni_id: i64) -> Result<Vec<MentorshipRequestView>, AppError>;
}

impl SqlxMentorshipRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxMentorshipRepo { pool }
    }
}

#[async_trait]
impl MentorshipRepository for SqlxMentorshipRepo {
    async fn insert_request(
        &self,
        student_id: i64,
        alumni_id: i64,
        message: &str,
    ) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO mentorship_requests (student_id, alumni_id, message, status, created_at)
            VALUES (?, ?, ?, 'pending', ?)
            RETURNING id
            "#,
        )
        .bind(student_id)
        .bind(alumni_id)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
                "You have already sent a mentorship request to this alumni".to_string(),
            ),
            _ => AppError::from(e),
        })?;

        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<MentorshipRequest>, AppError> {
        let request = sqlx::query_as::<_, MentorshipRequest>(
            "SELECT * FROM mentorship_requests WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(request)
    }

    async fn set_status(&self, id: i64, status: MentorshipStatus) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE mentorship_requests SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Mentorship request not found".to_string()));
        }
        Ok(())
    }

    async fn list_sent(&self, student_id: i64) -> Result<Vec<MentorshipRequestView>, AppError> {
        let requests = sqlx::query_as::<_, MentorshipRequestView>(
            r#"
            SELECT mr.id, mr.message, mr.status, mr.created_at,
                   u.id AS other_user_id, u.name AS other_user_name,
                   u.email AS other_user_email
            FROM mentorship_requests mr
            JOIN users u ON u.id = mr.alumni_id
            WHERE mr.student_id = ?
            ORDER BY mr.created_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    async fn list_received(&self, alumni_id: i64) -> Result<Vec<MentorshipRequestView>, AppError> {
        let requests = sqlx::query_as::<_, MentorshipRequestView>(
            r#"
            SELECT mr.id, mr.message, mr.status, mr.created_at,
                   u.id AS other_user_id, u.name AS other_user_name,
                   u.email AS other_user_email
            FROM mentorship_requests mr
            JOIN users u ON u.id = mr.student_id
            WHERE mr.alumni_id = ?
            ORDER BY mr.created_at DESC
            "#,
        )
        .bind(alumni_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }
}
