use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;

use crate::{
    entities::project::{
        NewPositionRequest, NewProjectRequest, PositionUpsert, Project, ProjectPosition,
        ProjectStatus, UpdateProjectRequest,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Project row joined with its creator, as read by every listing.
#[derive(Debug, sqlx::FromRow)]
pub struct ProjectWithCreator {
    #[sqlx(flatten)]
    pub project: Project,
    pub created_by_name: String,
    pub created_by_email: String,
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create_project(
        &self,
        owner_id: i64,
        request: &NewProjectRequest,
    ) -> Result<i64, AppError>;
    async fn get_project(&self, id: i64) -> Result<Option<Project>, AppError>;
    async fn get_with_creator(&self, id: i64) -> Result<Option<ProjectWithCreator>, AppError>;
    async fn list_all(&self) -> Result<Vec<ProjectWithCreator>, AppError>;
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ProjectWithCreator>, AppError>;
    async fn list_active(&self) -> Result<Vec<ProjectWithCreator>, AppError>;
    async fn update_project(
        &self,
        id: i64,
        update: &UpdateProjectRequest,
    ) -> Result<(), AppError>;
    async fn get_position(&self, id: i64) -> Result<Option<ProjectPosition>, AppError>;
    async fn list_positions(&self, project_id: i64) -> Result<Vec<ProjectPosition>, AppError>;
    async fn insert_position(
        &self,
        project_id: i64,
        position: &NewPositionRequest,
    ) -> Result<i64, AppError>;
    async fn patch_position(
        &self,
        project_id: i64,
        patch: &PositionUpsert,
    ) -> Result<(), AppError>;
    async fn active_position_count(&self, project_id: i64) -> Result<i64, AppError>;
    async fn append_image(&self, project_id: i64, path: &str) -> Result<(), AppError>;
    async fn set_job_description(&self, project_id: i64, path: &str) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxProjectRepo { pool }
    }
}

const WITH_CREATOR_SELECT: &str = r#"
    SELECT p.*, u.name AS created_by_name, u.email AS created_by_email
    FROM projects p
    JOIN users u ON u.id = p.created_by
"#;

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(
        &self,
        owner_id: i64,
        request: &NewProjectRequest,
    ) -> Result<i64, AppError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let project_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO projects (title, description, category, status, created_by,
                                  team_members, tags, required_skills, is_recruiting,
                                  links, funding, partners, highlights,
                                  created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.category)
        .bind(request.status.unwrap_or(ProjectStatus::Active))
        .bind(owner_id)
        .bind(Json(&request.team_members))
        .bind(Json(&request.tags))
        .bind(Json(&request.required_skills))
        .bind(request.is_recruiting.unwrap_or(true))
        .bind(Json(&request.links))
        .bind(&request.funding)
        .bind(Json(&request.partners))
        .bind(Json(&request.highlights))
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for position in &request.positions {
            sqlx::query(
                r#"
                INSERT INTO project_positions (project_id, title, description,
                                               required_skills, count, filled_count,
                                               is_active, created_at)
                VALUES (?, ?, ?, ?, ?, 0, 1, ?)
                "#,
            )
            .bind(project_id)
            .bind(&position.title)
            .bind(&position.description)
            .bind(Json(&position.required_skills))
            .bind(position.count)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(project_id)
    }

    async fn get_project(&self, id: i64) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn get_with_creator(&self, id: i64) -> Result<Option<ProjectWithCreator>, AppError> {
        let sql = format!("{} WHERE p.id = ?", WITH_CREATOR_SELECT);
        let project = sqlx::query_as::<_, ProjectWithCreator>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn list_all(&self) -> Result<Vec<ProjectWithCreator>, AppError> {
        let sql = format!("{} ORDER BY p.created_at DESC", WITH_CREATOR_SELECT);
        let projects = sqlx::query_as::<_, ProjectWithCreator>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<ProjectWithCreator>, AppError> {
        let sql = format!(
            "{} WHERE p.created_by = ? ORDER BY p.created_at DESC",
            WITH_CREATOR_SELECT
        );
        let projects = sqlx::query_as::<_, ProjectWithCreator>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn list_active(&self) -> Result<Vec<ProjectWithCreator>, AppError> {
        let sql = format!(
            "{} WHERE p.status = 'active' ORDER BY p.created_at DESC",
            WITH_CREATOR_SELECT
        );
        let projects = sqlx::query_as::<_, ProjectWithCreator>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn update_project(
        &self,
        id: i64,
        update: &UpdateProjectRequest,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE projects SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                category = COALESCE(?, category),
                status = COALESCE(?, status),
                team_members = COALESCE(?, team_members),
                tags = COALESCE(?, tags),
                required_skills = COALESCE(?, required_skills),
                is_recruiting = COALESCE(?, is_recruiting),
                links = COALESCE(?, links),
                funding = COALESCE(?, funding),
                partners = COALESCE(?, partners),
                highlights = COALESCE(?, highlights),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.category)
        .bind(update.status)
        .bind(update.team_members.as_ref().map(Json))
        .bind(update.tags.as_ref().map(Json))
        .bind(update.required_skills.as_ref().map(Json))
        .bind(update.is_recruiting)
        .bind(update.links.as_ref().map(Json))
        .bind(&update.funding)
        .bind(update.partners.as_ref().map(Json))
        .bind(update.highlights.as_ref().map(Json))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }

    async fn get_position(&self, id: i64) -> Result<Option<ProjectPosition>, AppError> {
        let position =
            sqlx::query_as::<_, ProjectPosition>("SELECT * FROM project_positions WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(position)
    }

    async fn list_positions(&self, project_id: i64) -> Result<Vec<ProjectPosition>, AppError> {
        let positions = sqlx::query_as::<_, ProjectPosition>(
            "SELECT * FROM project_positions WHERE project_id = ? ORDER BY id",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(positions)
    }

    async fn insert_position(
        &self,
        project_id: i64,
        position: &NewPositionRequest,
    ) -> Result<i64, AppError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO project_positions (project_id, title, description, required_skills,
                                           count, filled_count, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, 0, 1, ?)
            RETURNING id
            "#,
        )
        .bind(project_id)
        .bind(&position.title)
        .bind(&position.description)
        .bind(Json(&position.required_skills))
        .bind(position.count)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn patch_position(
        &self,
        project_id: i64,
        patch: &PositionUpsert,
    ) -> Result<(), AppError> {
        let Some(position_id) = patch.id else {
            return Err(AppError::BadRequest("Position id is required".to_string()));
        };

        // The project_id guard keeps an owner from reaching into another
        // project's positions by id.
        let result = sqlx::query(
            r#"
            UPDATE project_positions SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                required_skills = COALESCE(?, required_skills),
                count = COALESCE(?, count),
                is_active = COALESCE(?, is_active)
            WHERE id = ? AND project_id = ?
            "#,
        )
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.required_skills.as_ref().map(Json))
        .bind(patch.count)
        .bind(patch.is_active)
        .bind(position_id)
        .bind(project_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "Position not found on this project".to_string(),
            ));
        }
        Ok(())
    }

    async fn active_position_count(&self, project_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM project_positions WHERE project_id = ? AND is_active = 1",
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn append_image(&self, project_id: i64, path: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET images = json_insert(images, '$[#]', ?), updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(path)
        .bind(Utc::now())
        .bind(project_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }

    async fn set_job_description(&self, project_id: i64, path: &str) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE projects SET job_description_path = ?, updated_at = ? WHERE id = ?")
                .bind(path)
                .bind(Utc::now())
                .bind(project_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        Ok(())
    }
}
