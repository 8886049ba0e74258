use std::collections::HashSet;

use validator::Validate;

use crate::domain::scoring::{relevance_score, ProjectFacts, StudentInterests};
use crate::entities::project::{
    NewPositionRequest, NewProjectRequest, ProjectView, UpdateProjectRequest,
};
use crate::entities::token::Claims;
use crate::entities::user::Role;
use crate::errors::AppError;
use crate::interfaces::repositories::application::ApplicationRepository;
use crate::interfaces::repositories::project::{ProjectRepository, ProjectWithCreator};
use crate::interfaces::repositories::user::UserRepository;

const FALLBACK_RECOMMENDATION_LIMIT: usize = 10;

pub struct ProjectService<P, A, U>
where
    P: ProjectRepository,
    A: ApplicationRepository,
    U: UserRepository,
{
    pub project_repo: P,
    pub application_repo: A,
    pub user_repo: U,
}

impl<P, A, U> ProjectService<P, A, U>
where
    P: ProjectRepository,
    A: ApplicationRepository,
    U: UserRepository,
{
    pub fn new(project_repo: P, application_repo: A, user_repo: U) -> Self {
        ProjectService {
            project_repo,
            application_repo,
            user_repo,
        }
    }

    pub async fn create_project(
        &self,
        claims: &Claims,
        request: NewProjectRequest,
    ) -> Result<ProjectView, AppError> {
        if claims.role != Role::Alumni {
            return Err(AppError::Forbidden(
                "Only alumni can create projects".to_string(),
            ));
        }
        request.validate()?;

        let project_id = self
            .project_repo
            .create_project(claims.user_id()?, &request)
            .await?;

        tracing::info!(project_id, "project created");
        self.detail(project_id).await
    }

    pub async fn update_project(
        &self,
        claims: &Claims,
        project_id: i64,
        request: UpdateProjectRequest,
    ) -> Result<ProjectView, AppError> {
        request.validate()?;

        let project = self
            .project_repo
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        if project.created_by != claims.user_id()? {
            return Err(AppError::Forbidden(
                "Only the project owner can update it".to_string(),
            ));
        }

        if !request.is_noop() {
            self.project_repo.update_project(project_id, &request).await?;
        }

        // Position payloads with an id patch in place; the rest are new.
        if let Some(positions) = &request.positions {
            for payload in positions {
                if payload.id.is_some() {
                    self.project_repo.patch_position(project_id, payload).await?;
                } else {
                    let title = payload
                        .title
                        .as_deref()
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .ok_or_else(|| {
                            AppError::BadRequest("New positions need a title".to_string())
                        })?;
                    let insert = NewPositionRequest {
                        title: title.to_string(),
                        description: payload.description.clone().unwrap_or_default(),
                        required_skills: payload.required_skills.clone().unwrap_or_default(),
                        count: payload.count.unwrap_or(1).max(1),
                    };
                    self.project_repo.insert_position(project_id, &insert).await?;
                }
            }
        }

        self.detail(project_id).await
    }

    pub async fn detail(&self, project_id: i64) -> Result<ProjectView, AppError> {
        let row = self
            .project_repo
            .get_with_creator(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        self.into_view(row).await
    }

    /// All projects, newest first. An authenticated student additionally
    /// sees `has_applied`, and `exclude_applied` drops projects they
    /// already applied to.
    pub async fn list_projects(
        &self,
        viewer: Option<&Claims>,
        exclude_applied: bool,
    ) -> Result<Vec<ProjectView>, AppError> {
        let rows = self.project_repo.list_all().await?;

        let applied: Option<HashSet<i64>> = match viewer {
            Some(claims) => {
                let ids = self
                    .application_repo
                    .applied_project_ids(claims.user_id()?)
                    .await?;
                Some(ids.into_iter().collect())
            }
            None => None,
        };

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let project_id = row.project.id;
            let mut view = self.into_view(row).await?;
            if let Some(applied) = &applied {
                let has_applied = applied.contains(&project_id);
                if exclude_applied && has_applied {
                    continue;
                }
                view.has_applied = Some(has_applied);
            }
            views.push(view);
        }

        Ok(views)
    }

    pub async fn my_projects(&self, claims: &Claims) -> Result<Vec<ProjectView>, AppError> {
        if claims.role != Role::Alumni {
            return Err(AppError::Forbidden(
                "Only alumni own projects".to_string(),
            ));
        }

        let rows = self.project_repo.list_by_owner(claims.user_id()?).await?;
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(self.into_view(row).await?);
        }
        Ok(views)
    }

    /// Scores every active, not-yet-applied project against the student's
    /// profile. Zero-scoring projects are dropped, unless nothing scores at
    /// all, in which case the most recent actives come back with score 0 so
    /// a blank profile still sees a feed.
    pub async fn recommended(&self, claims: &Claims) -> Result<Vec<ProjectView>, AppError> {
        if claims.role != Role::Student {
            return Err(AppError::Forbidden(
                "Recommendations are for students".to_string(),
            ));
        }

        let student_id = claims.user_id()?;
        let user = self
            .user_repo
            .get_user_by_id(student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let interests = StudentInterests {
            skills: self.user_repo.get_skills(student_id).await?,
            department: user.department,
            specialization: user.specialization,
            branch: user.branch,
        };

        let applied: HashSet<i64> = self
            .application_repo
            .applied_project_ids(student_id)
            .await?
            .into_iter()
            .collect();

        let rows = self.project_repo.list_active().await?;

        // Rows arrive newest-first; the stable sort keeps that order within
        // equal scores.
        let mut scored = Vec::new();
        for row in rows {
            if applied.contains(&row.project.id) {
                continue;
            }
            let mut view = self.into_view(row).await?;
            let mut required_skills = view.required_skills.clone();
            for position in &view.positions {
                required_skills.extend(position.required_skills.iter().cloned());
            }
            let facts = ProjectFacts {
                title: view.title.clone(),
                description: view.description.clone(),
                category: view.category.clone(),
                tags: view.tags.clone(),
                required_skills,
            };
            let score = relevance_score(&interests, &facts);
            view.score = Some(score);
            view.has_applied = Some(false);
            scored.push(view);
        }

        if scored.iter().any(|v| v.score.unwrap_or(0) > 0) {
            let mut relevant: Vec<ProjectView> = scored
                .into_iter()
                .filter(|v| v.score.unwrap_or(0) > 0)
                .collect();
            relevant.sort_by_key(|v| std::cmp::Reverse(v.score.unwrap_or(0)));
            Ok(relevant)
        } else {
            scored.truncate(FALLBACK_RECOMMENDATION_LIMIT);
            for view in &mut scored {
                view.score = Some(0);
            }
            Ok(scored)
        }
    }

    async fn into_view(&self, row: ProjectWithCreator) -> Result<ProjectView, AppError> {
        let positions = self.project_repo.list_positions(row.project.id).await?;
        Ok(ProjectView::from_parts(
            row.project,
            row.created_by_name,
            row.created_by_email,
            positions,
        ))
    }
}
