use async_trait::async_trait;
use chrono::Utc;

use crate::{
    entities::user::{AlumniSummary, Role, UpdateProfileRequest, User},
    errors::AppError,
    repositories::sqlx_repo::SqlxUserRepo,
};

pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub graduation_year: Option<i64>,
    pub department: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn create_user(&self, user: &NewUserRecord) -> Result<i64, AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn update_profile(&self, id: i64, update: &UpdateProfileRequest) -> Result<(), AppError>;
    async fn set_availability(&self, id: i64, is_available: bool) -> Result<(), AppError>;
    async fn list_alumni(&self) -> Result<Vec<AlumniSummary>, AppError>;
    async fn get_skills(&self, user_id: i64) -> Result<Vec<String>, AppError>;
    async fn get_achievements(&self, user_id: i64) -> Result<Vec<String>, AppError>;
    async fn get_languages(&self, user_id: i64) -> Result<Vec<String>, AppError>;
    async fn set_avatar_path(&self, user_id: i64, path: &str) -> Result<(), AppError>;
    async fn set_cv_path(&self, user_id: i64, path: &str) -> Result<(), AppError>;
}

impl SqlxUserRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxUserRepo { pool }
    }

    async fn child_names(&self, table: &str, user_id: i64) -> Result<Vec<String>, AppError> {
        // Table names come from a fixed internal set, never from input.
        let column = if table == "user_achievements" { "title" } else { "name" };
        let sql = format!("SELECT {} FROM {} WHERE user_id = ? ORDER BY id", column, table);
        let names = sqlx::query_scalar::<_, String>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn create_user(&self, user: &NewUserRecord) -> Result<i64, AppError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, email, password_hash, role, graduation_year, department,
                               created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.graduation_year)
        .bind(&user.department)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("A user with this email already exists".to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(id)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update_profile(&self, id: i64, update: &UpdateProfileRequest) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = COALESCE(?, name),
                graduation_year = COALESCE(?, graduation_year),
                department = COALESCE(?, department),
                specialization = COALESCE(?, specialization),
                branch = COALESCE(?, branch),
                bio = COALESCE(?, bio),
                company = COALESCE(?, company),
                job_title = COALESCE(?, job_title),
                phone = COALESCE(?, phone),
                linkedin_url = COALESCE(?, linkedin_url),
                github_url = COALESCE(?, github_url),
                website_url = COALESCE(?, website_url),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.name)
        .bind(update.graduation_year)
        .bind(&update.department)
        .bind(&update.specialization)
        .bind(&update.branch)
        .bind(&update.bio)
        .bind(&update.company)
        .bind(&update.job_title)
        .bind(&update.phone)
        .bind(&update.linkedin_url)
        .bind(&update.github_url)
        .bind(&update.website_url)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        // Child lists are replaced wholesale, never diffed.
        if let Some(skills) = &update.skills {
            replace_children(&mut tx, "user_skills", id, skills).await?;
        }
        if let Some(achievements) = &update.achievements {
            replace_children(&mut tx, "user_achievements", id, achievements).await?;
        }
        if let Some(languages) = &update.languages {
            replace_children(&mut tx, "user_languages", id, languages).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn set_availability(&self, id: i64, is_available: bool) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET is_available = ?, updated_at = ? WHERE id = ?")
            .bind(is_available)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    async fn list_alumni(&self) -> Result<Vec<AlumniSummary>, AppError> {
        let alumni = sqlx::query_as::<_, AlumniSummary>(
            r#"
            SELECT id, name, email, graduation_year, department, company, job_title,
                   avatar_path, is_available
            FROM users
            WHERE role = 'alumni'
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(alumni)
    }

    async fn get_skills(&self, user_id: i64) -> Result<Vec<String>, AppError> {
        self.child_names("user_skills", user_id).await
    }

    async fn get_achievements(&self, user_id: i64) -> Result<Vec<String>, AppError> {
        self.child_names("user_achievements", user_id).await
    }

    async fn get_languages(&self, user_id: i64) -> Result<Vec<String>, AppError> {
        self.child_names("user_languages", user_id).await
    }

    async fn set_avatar_path(&self, user_id: i64, path: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET avatar_path = ?, updated_at = ? WHERE id = ?")
            .bind(path)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_cv_path(&self, user_id: i64, path: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET cv_path = ?, updated_at = ? WHERE id = ?")
            .bind(path)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// user_achievements stores its text in a `title` column, the other child
/// tables in `name`; keep them uniform at the SQL level instead.
async fn replace_children(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    table: &str,
    user_id: i64,
    values: &[String],
) -> Result<(), AppError> {
    let column = if table == "user_achievements" { "title" } else { "name" };

    let delete_sql = format!("DELETE FROM {} WHERE user_id = ?", table);
    sqlx::query(&delete_sql).bind(user_id).execute(&mut **tx).await?;

    let insert_sql = format!("INSERT INTO {} (user_id, {}) VALUES (?, ?)", table, column);
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        sqlx::query(&insert_sql)
            .bind(user_id)
            .bind(value)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}
