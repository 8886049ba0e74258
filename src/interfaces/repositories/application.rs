use async_trait::async_trait;
use chrono::Utc;

use crate::{
    entities::application::{ApplicationStatus, ApplicationView, ProjectApplication},
    errors::AppError,
    repositories::sqlx_repo::SqlxApplicationRepo,
};

pub struct NewApplicationRecord {
    pub project_id: i64,
    pub student_id: i64,
    pub position_id: Option<i64>,
    pub message: String,
    pub has_team: bool,
}

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn insert_application(&self, record: &NewApplicationRecord) -> Result<i64, AppError>;
    async fn get(&self, id: i64) -> Result<Option<ProjectApplication>, AppError>;
    async fn delete_by_student_project(
        &self,
        student_id: i64,
        project_id: i64,
    ) -> Result<bool, AppError>;
    async fn applied_project_ids(&self, student_id: i64) -> Result<Vec<i64>, AppError>;
    async fn list_for_student(&self, student_id: i64) -> Result<Vec<ApplicationView>, AppError>;
    async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<ApplicationView>, AppError>;
    async fn mark_accepted(&self, id: i64) -> Result<(), AppError>;
    async fn mark_declined(&self, id: i64) -> Result<(), AppError>;
    async fn mark_completed(&self, id: i64, feedback: Option<&str>) -> Result<(), AppError>;
}

impl SqlxApplicationRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxApplicationRepo { pool }
    }
}

const VIEW_SELECT: &str = r#"
    SELECT a.id, a.project_id, p.title AS project_title,
           a.position_id, pp.title AS position_title,
           a.student_id, s.name AS student_name, s.email AS student_email,
           a.message, a.status, a.has_team, a.is_completed, a.completed_at,
           a.feedback, a.created_at
    FROM project_applications a
    JOIN projects p ON p.id = a.project_id
    JOIN users s ON s.id = a.student_id
    LEFT JOIN project_positions pp ON pp.id = a.position_id
"#;

#[async_trait]
impl ApplicationRepository for SqlxApplicationRepo {
    async fn insert_application(&self, record: &NewApplicationRecord) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO project_applications (project_id, student_id, position_id, message,
                                              status, has_team, created_at)
            VALUES (?, ?, ?, ?, 'pending', ?, ?)
            RETURNING id
            "#,
        )
        .bind(record.project_id)
        .bind(record.student_id)
        .bind(record.position_id)
        .bind(&record.message)
        .bind(record.has_team)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("You have already applied to this project".to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<ProjectApplication>, AppError> {
        let application = sqlx::query_as::<_, ProjectApplication>(
            "SELECT * FROM project_applications WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(application)
    }

    async fn delete_by_student_project(
        &self,
        student_id: i64,
        project_id: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "DELETE FROM project_applications WHERE student_id = ? AND project_id = ?",
        )
        .bind(student_id)
        .bind(project_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn applied_project_ids(&self, student_id: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT project_id FROM project_applications WHERE student_id = ?",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn list_for_student(&self, student_id: i64) -> Result<Vec<ApplicationView>, AppError> {
        let sql = format!("{} WHERE a.student_id = ? ORDER BY a.created_at DESC", VIEW_SELECT);
        let applications = sqlx::query_as::<_, ApplicationView>(&sql)
            .bind(student_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }

    async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<ApplicationView>, AppError> {
        let sql = format!("{} WHERE p.created_by = ? ORDER BY a.created_at DESC", VIEW_SELECT);
        let applications = sqlx::query_as::<_, ApplicationView>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(applications)
    }

    async fn mark_accepted(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let application = sqlx::query_as::<_, ProjectApplication>(
            "SELECT * FROM project_applications WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        sqlx::query("UPDATE project_applications SET status = 'accepted' WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // A repeated accept must not consume a second seat.
        if application.status != ApplicationStatus::Accepted {
            if let Some(position_id) = application.position_id {
                let filled = sqlx::query(
                    r#"
                    UPDATE project_positions
                    SET filled_count = filled_count + 1
                    WHERE id = ? AND filled_count < count
                    "#,
                )
                .bind(position_id)
                .execute(&mut *tx)
                .await?;

                if filled.rows_affected() == 0 {
                    return Err(AppError::BadRequest(
                        "Position has no remaining openings".to_string(),
                    ));
                }

                sqlx::query(
                    r#"
                    UPDATE project_positions
                    SET is_active = 0
                    WHERE id = ? AND filled_count >= count
                    "#,
                )
                .bind(position_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn mark_declined(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let application = sqlx::query_as::<_, ProjectApplication>(
            "SELECT * FROM project_applications WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        sqlx::query("UPDATE project_applications SET status = 'declined' WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Reversing an acceptance releases the seat and reopens the position.
        if application.status == ApplicationStatus::Accepted {
            if let Some(position_id) = application.position_id {
                sqlx::query(
                    r#"
                    UPDATE project_positions
                    SET filled_count = filled_count - 1
                    WHERE id = ? AND filled_count > 0
                    "#,
                )
                .bind(position_id)
                .execute(&mut *tx)
                .await?;

                sqlx::query("UPDATE project_positions SET is_active = 1 WHERE id = ?")
                    .bind(position_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn mark_completed(&self, id: i64, feedback: Option<&str>) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE project_applications
            SET is_completed = 1, completed_at = ?, feedback = ?
            WHERE id = ? AND status = 'accepted'
            "#,
        )
        .bind(Utc::now())
        .bind(feedback)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::BadRequest(
                "Only accepted applications can be completed".to_string(),
            ));
        }
        Ok(())
    }
}
