use validator::Validate;

use crate::entities::mentorship::{MentorshipRequestView, MentorshipStatus, NewMentorshipRequest};
use crate::entities::token::Claims;
use crate::entities::user::Role;
use crate::errors::AppError;
use crate::interfaces::repositories::mentorship::MentorshipRepository;
use crate::interfaces::repositories::user::UserRepository;

pub struct MentorshipService<M, U>
where
    M: MentorshipRepository,
    U: UserRepository,
{
    pub mentorship_repo: M,
    pub user_repo: U,
}

impl<M, U> MentorshipService<M, U>
where
    M: MentorshipRepository,
    U: UserRepository,
{
    pub fn new(mentorship_repo: M, user_repo: U) -> Self {
        MentorshipService {
            mentorship_repo,
            user_repo,
        }
    }

    pub async fn request(
        &self,
        claims: &Claims,
        request: NewMentorshipRequest,
    ) -> Result<i64, AppError> {
        if claims.role != Role::Student {
            return Err(AppError::Forbidden(
                "Only students can request mentorship".to_string(),
            ));
        }
        request.validate()?;

        let target = self
            .user_repo
            .get_user_by_id(request.alumni_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid alumni id".to_string()))?;

        if target.role != Role::Alumni {
            return Err(AppError::BadRequest("Invalid alumni id".to_string()));
        }

        let id = self
            .mentorship_repo
            .insert_request(
                claims.user_id()?,
                request.alumni_id,
                request.message.as_deref().unwrap_or(""),
            )
            .await?;

        tracing::info!(request_id = id, alumni_id = request.alumni_id, "mentorship requested");
        Ok(id)
    }

    pub async fn respond(
        &self,
        claims: &Claims,
        request_id: i64,
        accept: bool,
    ) -> Result<(), AppError> {
        let request = self
            .mentorship_repo
            .get(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mentorship request not found".to_string()))?;

        if request.alumni_id != claims.user_id()? {
            return Err(AppError::Forbidden(
                "Only the requested alumni can respond".to_string(),
            ));
        }

        let status = if accept {
            MentorshipStatus::Accepted
        } else {
            MentorshipStatus::Declined
        };
        self.mentorship_repo.set_status(request_id, status).await
    }

    /// Students see the requests they sent, alumni the ones they received.
    pub async fn list(&self, claims: &Claims) -> Result<Vec<MentorshipRequestView>, AppError> {
        match claims.role {
            Role::Student => self.mentorship_repo.list_sent(claims.user_id()?).await,
            Role::Alumni => self.mentorship_repo.list_received(claims.user_id()?).await,
        }
    }
}
