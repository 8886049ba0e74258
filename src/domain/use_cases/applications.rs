use validator::Validate;

use crate::entities::application::{ApplicationView, ApplyRequest, CompleteRequest};
use crate::entities::project::Project;
use crate::entities::token::Claims;
use crate::entities::user::Role;
use crate::errors::AppError;
use crate::interfaces::repositories::application::{
    ApplicationRepository, NewApplicationRecord,
};
use crate::interfaces::repositories::project::ProjectRepository;

pub struct ApplicationService<A, P>
where
    A: ApplicationRepository,
    P: ProjectRepository,
{
    pub application_repo: A,
    pub project_repo: P,
}

impl<A, P> ApplicationService<A, P>
where
    A: ApplicationRepository,
    P: ProjectRepository,
{
    pub fn new(application_repo: A, project_repo: P) -> Self {
        ApplicationService {
            application_repo,
            project_repo,
        }
    }

    /// Submits a pending application. The duplicate guard is the schema's
    /// unique constraint; everything before the insert only shapes the
    /// error the caller sees.
    pub async fn submit(
        &self,
        claims: &Claims,
        project_id: i64,
        request: ApplyRequest,
    ) -> Result<i64, AppError> {
        if claims.role != Role::Student {
            return Err(AppError::Forbidden(
                "Only students can apply to projects".to_string(),
            ));
        }
        request.validate()?;

        self.project_repo
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        match request.position_id {
            Some(position_id) => {
                let position = self
                    .project_repo
                    .get_position(position_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Position not found".to_string()))?;

                if position.project_id != project_id {
                    return Err(AppError::BadRequest(
                        "Position does not belong to this project".to_string(),
                    ));
                }
                if !position.is_active {
                    return Err(AppError::BadRequest(
                        "This position is no longer accepting applications".to_string(),
                    ));
                }
            }
            None => {
                // Once a project advertises open positions, applications
                // must target one of them.
                if self.project_repo.active_position_count(project_id).await? > 0 {
                    return Err(AppError::BadRequest(
                        "Select a position to apply to".to_string(),
                    ));
                }
            }
        }

        let record = NewApplicationRecord {
            project_id,
            student_id: claims.user_id()?,
            position_id: request.position_id,
            message: request.message.unwrap_or_default(),
            has_team: request.has_team.unwrap_or(false),
        };

        let id = self.application_repo.insert_application(&record).await?;
        tracing::info!(application_id = id, project_id, "application submitted");
        Ok(id)
    }

    pub async fn withdraw(&self, claims: &Claims, project_id: i64) -> Result<(), AppError> {
        let deleted = self
            .application_repo
            .delete_by_student_project(claims.user_id()?, project_id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound(
                "No application found for this project".to_string(),
            ));
        }
        Ok(())
    }

    /// A student sees their own applications; an alumni sees every
    /// application to their projects.
    pub async fn list(&self, claims: &Claims) -> Result<Vec<ApplicationView>, AppError> {
        match claims.role {
            Role::Student => self.application_repo.list_for_student(claims.user_id()?).await,
            Role::Alumni => self.application_repo.list_for_owner(claims.user_id()?).await,
        }
    }

    pub async fn accept(&self, claims: &Claims, application_id: i64) -> Result<(), AppError> {
        self.authorize_owner(claims, application_id).await?;
        self.application_repo.mark_accepted(application_id).await?;
        tracing::info!(application_id, "application accepted");
        Ok(())
    }

    pub async fn decline(&self, claims: &Claims, application_id: i64) -> Result<(), AppError> {
        self.authorize_owner(claims, application_id).await?;
        self.application_repo.mark_declined(application_id).await?;
        tracing::info!(application_id, "application declined");
        Ok(())
    }

    pub async fn complete(
        &self,
        claims: &Claims,
        application_id: i64,
        request: CompleteRequest,
    ) -> Result<(), AppError> {
        request.validate()?;
        self.authorize_owner(claims, application_id).await?;
        self.application_repo
            .mark_completed(application_id, request.feedback.as_deref())
            .await
    }

    /// Loads the application's project and verifies the caller owns it.
    async fn authorize_owner(
        &self,
        claims: &Claims,
        application_id: i64,
    ) -> Result<Project, AppError> {
        let application = self
            .application_repo
            .get(application_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        let project = self
            .project_repo
            .get_project(application.project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        if project.created_by != claims.user_id()? {
            return Err(AppError::Forbidden(
                "Only the project owner can manage its applications".to_string(),
            ));
        }

        Ok(project)
    }
}
