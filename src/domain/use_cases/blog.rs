use validator::Validate;

use crate::entities::blog::{
    BlogPostView, LikeResponse, NewBlogPostRequest, UpdateBlogPostRequest,
};
use crate::entities::token::Claims;
use crate::entities::user::Role;
use crate::errors::AppError;
use crate::interfaces::repositories::blog::BlogRepository;

pub struct BlogService<B>
where
    B: BlogRepository,
{
    pub blog_repo: B,
}

impl<B> BlogService<B>
where
    B: BlogRepository,
{
    pub fn new(blog_repo: B) -> Self {
        BlogService { blog_repo }
    }

    pub async fn create_post(
        &self,
        claims: &Claims,
        request: NewBlogPostRequest,
    ) -> Result<BlogPostView, AppError> {
        if claims.role != Role::Alumni {
            return Err(AppError::Forbidden(
                "Only alumni can publish blog posts".to_string(),
            ));
        }
        request.validate()?;

        let id = self.blog_repo.insert_post(claims.user_id()?, &request).await?;
        tracing::info!(post_id = id, "blog post created");
        self.get_post(None, id).await
    }

    pub async fn list_posts(&self) -> Result<Vec<BlogPostView>, AppError> {
        let rows = self.blog_repo.list_posts().await?;
        Ok(rows
            .into_iter()
            .map(|row| BlogPostView::from_parts(row.post, row.author_name, row.like_count))
            .collect())
    }

    pub async fn get_post(
        &self,
        viewer: Option<&Claims>,
        post_id: i64,
    ) -> Result<BlogPostView, AppError> {
        let row = self
            .blog_repo
            .get_with_author(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        let mut view = BlogPostView::from_parts(row.post, row.author_name, row.like_count);

        if let Some(claims) = viewer {
            view.liked_by_me = Some(self.blog_repo.liked_by(post_id, claims.user_id()?).await?);
        }

        Ok(view)
    }

    pub async fn update_post(
        &self,
        claims: &Claims,
        post_id: i64,
        request: UpdateBlogPostRequest,
    ) -> Result<BlogPostView, AppError> {
        request.validate()?;
        self.authorize_author(claims, post_id).await?;
        self.blog_repo.update_post(post_id, &request).await?;
        self.get_post(Some(claims), post_id).await
    }

    pub async fn delete_post(&self, claims: &Claims, post_id: i64) -> Result<(), AppError> {
        self.authorize_author(claims, post_id).await?;
        self.blog_repo.delete_post(post_id).await
    }

    /// Like is a toggle on the (post, user) pair: a second call unlikes.
    pub async fn toggle_like(
        &self,
        claims: &Claims,
        post_id: i64,
    ) -> Result<LikeResponse, AppError> {
        self.blog_repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        let liked = self.blog_repo.toggle_like(post_id, claims.user_id()?).await?;
        let like_count = self.blog_repo.like_count(post_id).await?;

        Ok(LikeResponse { liked, like_count })
    }

    async fn authorize_author(&self, claims: &Claims, post_id: i64) -> Result<(), AppError> {
        let post = self
            .blog_repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

        if post.author_id != claims.user_id()? {
            return Err(AppError::Forbidden(
                "Only the author can modify this post".to_string(),
            ));
        }
        Ok(())
    }
}
