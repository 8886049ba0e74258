use validator::Validate;

use crate::auth::jwt::JwtService;
use crate::auth::password::{hash_password, verify_password};
use crate::entities::token::AuthResponse;
use crate::entities::user::{LoginRequest, RegisterRequest, Role, User, UserProfile};
use crate::errors::{AppError, AuthError, FieldError};
use crate::interfaces::repositories::user::{NewUserRecord, UserRepository};

pub struct AuthService<R>
where
    R: UserRepository,
{
    pub user_repo: R,
    pub token_service: JwtService,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: R, token_service: JwtService) -> Self {
        AuthService {
            user_repo,
            token_service,
        }
    }

    /// Registers a new user and logs them straight in.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        // Alumni carry their graduation context from day one; students fill
        // it in later through the profile.
        if request.role == Role::Alumni {
            let mut missing = Vec::new();
            if request.graduation_year.is_none() {
                missing.push(FieldError {
                    field: "graduation_year".into(),
                    message: "Graduation year is required for alumni".into(),
                });
            }
            if request.department.as_deref().map_or(true, |d| d.trim().is_empty()) {
                missing.push(FieldError {
                    field: "department".into(),
                    message: "Department is required for alumni".into(),
                });
            }
            if !missing.is_empty() {
                return Err(AppError::ValidationError(missing));
            }
        }

        let password_hash = hash_password(&request.password)?;
        let record = NewUserRecord {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            password_hash,
            role: request.role,
            graduation_year: request.graduation_year,
            department: request.department,
        };

        let user_id = self.user_repo.create_user(&record).await?;

        let user = self
            .user_repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::InternalError("Created user not found".into()))?;

        tracing::info!(user_id, "user registered");
        self.auth_response(user).await
    }

    /// Validates credentials and issues a fresh token.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        request.validate()?;

        let user = self
            .user_repo
            .get_user_by_email(&request.email.trim().to_lowercase())
            .await
            .map_err(|_| AuthError::WrongCredentials)?
            .ok_or(AuthError::WrongCredentials)?;

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        tracing::info!(user_id = user.id, "user logged in");
        self.auth_response(user).await.map_err(|e| {
            tracing::warn!("failed to assemble auth response: {}", e);
            AuthError::TokenCreation
        })
    }

    async fn auth_response(&self, user: User) -> Result<AuthResponse, AppError> {
        let token = self
            .token_service
            .create_token(&user)
            .map_err(|_| AppError::InternalError("Token creation error".into()))?;

        let skills = self.user_repo.get_skills(user.id).await?;
        let achievements = self.user_repo.get_achievements(user.id).await?;
        let languages = self.user_repo.get_languages(user.id).await?;

        Ok(AuthResponse {
            token,
            user: UserProfile::from_parts(user, skills, achievements, languages),
        })
    }
}
