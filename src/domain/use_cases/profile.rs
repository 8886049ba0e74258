use validator::Validate;

use crate::entities::token::Claims;
use crate::entities::user::{AlumniSummary, Role, UpdateProfileRequest, UserProfile};
use crate::errors::AppError;
use crate::interfaces::repositories::user::UserRepository;

pub struct ProfileService<R>
where
    R: UserRepository,
{
    pub user_repo: R,
}

impl<R> ProfileService<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: R) -> Self {
        ProfileService { user_repo }
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<UserProfile, AppError> {
        let user = self
            .user_repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let skills = self.user_repo.get_skills(user_id).await?;
        let achievements = self.user_repo.get_achievements(user_id).await?;
        let languages = self.user_repo.get_languages(user_id).await?;

        Ok(UserProfile::from_parts(user, skills, achievements, languages))
    }

    pub async fn update_profile(
        &self,
        claims: &Claims,
        request: UpdateProfileRequest,
    ) -> Result<UserProfile, AppError> {
        request.validate()?;

        let user_id = claims.user_id()?;
        self.user_repo.update_profile(user_id, &request).await?;
        self.get_profile(user_id).await
    }

    pub async fn set_availability(
        &self,
        claims: &Claims,
        is_available: bool,
    ) -> Result<(), AppError> {
        if claims.role != Role::Alumni {
            return Err(AppError::Forbidden(
                "Only alumni can set availability".to_string(),
            ));
        }

        self.user_repo
            .set_availability(claims.user_id()?, is_available)
            .await
    }

    pub async fn list_alumni(&self) -> Result<Vec<AlumniSummary>, AppError> {
        self.user_repo.list_alumni().await
    }
}
