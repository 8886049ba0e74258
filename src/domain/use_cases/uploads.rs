use serde::Serialize;

use crate::entities::token::Claims;
use crate::errors::AppError;
use crate::infrastructure::storage::files::{FileKind, FileStore};
use crate::interfaces::repositories::blog::{BlogRepository, MediaColumn};
use crate::interfaces::repositories::project::ProjectRepository;
use crate::interfaces::repositories::user::UserRepository;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
    pub url: String,
}

impl UploadResponse {
    fn new(path: String) -> Self {
        let url = format!("/uploads/{}", path);
        UploadResponse { path, url }
    }
}

/// Routes every upload to its entity-scoped directory after the owning
/// entity and the caller's rights have been checked.
pub struct UploadService<U, P, B>
where
    U: UserRepository,
    P: ProjectRepository,
    B: BlogRepository,
{
    pub file_store: FileStore,
    pub user_repo: U,
    pub project_repo: P,
    pub blog_repo: B,
}

impl<U, P, B> UploadService<U, P, B>
where
    U: UserRepository,
    P: ProjectRepository,
    B: BlogRepository,
{
    pub fn new(file_store: FileStore, user_repo: U, project_repo: P, blog_repo: B) -> Self {
        UploadService {
            file_store,
            user_repo,
            project_repo,
            blog_repo,
        }
    }

    pub async fn store_avatar(
        &self,
        claims: &Claims,
        filename: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, AppError> {
        let user_id = claims.user_id()?;
        let scope = format!("users/{}/avatar", user_id);
        let path = self
            .file_store
            .save(&scope, filename, FileKind::Image, bytes)
            .await?;
        self.user_repo.set_avatar_path(user_id, &path).await?;
        Ok(UploadResponse::new(path))
    }

    pub async fn store_cv(
        &self,
        claims: &Claims,
        filename: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, AppError> {
        let user_id = claims.user_id()?;
        let scope = format!("users/{}/cv", user_id);
        let path = self
            .file_store
            .save(&scope, filename, FileKind::Document, bytes)
            .await?;
        self.user_repo.set_cv_path(user_id, &path).await?;
        Ok(UploadResponse::new(path))
    }

    pub async fn store_project_image(
        &self,
        claims: &Claims,
        project_id: i64,
        filename: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, AppError> {
        self.authorize_project_owner(claims, project_id).await?;
        let scope = format!("projects/{}/images", project_id);
        let path = self
            .file_store
            .save(&scope, filename, FileKind::Image, bytes)
            .await?;
        self.project_repo.append_image(project_id, &path).await?;
        Ok(UploadResponse::new(path))
    }

    pub async fn store_project_document(
        &self,
        claims: &Claims,
        project_id: i64,
        filename: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, AppError> {
        self.authorize_project_owner(claims, project_id).await?;
        let scope = format!("projects/{}/documents", project_id);
        let path = self
            .file_store
            .save(&scope, filename, FileKind::Document, bytes)
            .await?;
        self.project_repo.set_job_description(project_id, &path).await?;
        Ok(UploadResponse::new(path))
    }

    pub async fn store_blog_image(
        &self,
        claims: &Claims,
        post_id: i64,
        filename: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, AppError> {
        self.authorize_blog_author(claims, post_id).await?;
        let scope = format!("blogs/{}/images", post_id);
        let path = self
            .file_store
            .save(&scope, filename, FileKind::Image, bytes)
            .await?;
        self.blog_repo
            .append_media(post_id, MediaColumn::Images, &path)
            .await?;
        Ok(UploadResponse::new(path))
    }

    pub async fn store_blog_pdf(
        &self,
        claims: &Claims,
        post_id: i64,
        filename: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, AppError> {
        self.authorize_blog_author(claims, post_id).await?;
        let scope = format!("blogs/{}/pdfs", post_id);
        let path = self
            .file_store
            .save(&scope, filename, FileKind::Document, bytes)
            .await?;
        self.blog_repo
            .append_media(post_id, MediaColumn::Pdfs, &path)
            .await?;
        Ok(UploadResponse::new(path))
    }

    async fn authorize_project_owner(
        &self,
        claims: &Claims,
        project_id: i64,
    ) -> Result<(), AppError> {
        let project = self
            .project_repo
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

        if project.created_by != claims.user_id()? {
            return Err(AppError::Forbidden(
                "Only the project owner can upload files for it".to_string(),
            ));
        }
        Ok(())
    }

    async fn authorize_blog_author(&self, claims: &Claims, post_id: i64) -> Result<(), AppError> {
        let post = self
            .blog_repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        if post.author_id != claims.user_id()? {
            return Err(AppError::Forbidden(
                "Only the author can upload files for this post".to_string(),
            ));
        }
        Ok(())
    }
}
