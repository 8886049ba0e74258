use async_trait::async_trait;
use chrono::Utc;

use crate::{
    entities::blog::{BlogPost, NewBlogPostRequest, UpdateBlogPostRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxBlogRepo,
};

/// Post row joined with its author and like count.
#[derive(Debug, sqlx::FromRow)]
pub struct BlogPostWithAuthor {
    #[sqlx(flatten)]
    pub post: BlogPost,
    pub author_name: String,
    pub like_count: i64,
}

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn insert_post(&self, author_id: i64, post: &NewBlogPostRequest)
        -> Result<i64, AppError>;
    async fn get_post(&self, id: i64) -> Result<Option<BlogPost>, AppError>;
    async fn get_with_author(&self, id: i64) -> Result<Option<BlogPostWithAuthor>, AppError>;
    async fn list_posts(&self) -> Result<Vec<BlogPostWithAuthor>, AppError>;
    async fn update_post(&self, id: i64, update: &UpdateBlogPostRequest) -> Result<(), AppError>;
    async fn delete_post(&self, id: i64) -> Result<(), AppError>;
    async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<bool, AppError>;
    async fn like_count(&self, post_id: i64) -> Result<i64, AppError>;
    async fn liked_by(&self, post_id: i64, user_id: i64) -> Result<bool, AppError>;
    async fn append_media(&self, post_id: i64, column: MediaColumn, path: &str)
        -> Result<(), AppError>;
}

#[derive(Debug, Clone, Copy)]
pub enum MediaColumn {
    Images,
    Pdfs,
}

impl MediaColumn {
    fn name(&self) -> &'static str {
        match self {
            MediaColumn::Images => "images",
            MediaColumn::Pdfs => "pdfs",
        }
    }
}

impl SqlxBlogRepo {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        SqlxBlogRepo { pool }
    }
}

const WITH_AUTHOR_SELECT: &str = r#"
    SELECT b.*, u.name AS author_name,
           (SELECT COUNT(*) FROM blog_likes bl WHERE bl.post_id = b.id) AS like_count
    FROM blog_posts b
    JOIN users u ON u.id = b.author_id
"#;

#[async_trait]
impl BlogRepository for SqlxBlogRepo {
    async fn insert_post(
        &self,
        author_id: i64,
        post: &NewBlogPostRequest,
    ) -> Result<i64, AppError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO blog_posts (author_id, title, content, category, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(author_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.category)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn get_post(&self, id: i64) -> Result<Option<BlogPost>, AppError> {
        let post = sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn get_with_author(&self, id: i64) -> Result<Option<BlogPostWithAuthor>, AppError> {
        let sql = format!("{} WHERE b.id = ?", WITH_AUTHOR_SELECT);
        let post = sqlx::query_as::<_, BlogPostWithAuthor>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<BlogPostWithAuthor>, AppError> {
        let sql = format!("{} ORDER BY b.created_at DESC", WITH_AUTHOR_SELECT);
        let posts = sqlx::query_as::<_, BlogPostWithAuthor>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(posts)
    }

    async fn update_post(&self, id: i64, update: &UpdateBlogPostRequest) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE blog_posts SET
                title = COALESCE(?, title),
                content = COALESCE(?, content),
                category = COALESCE(?, category),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.title)
        .bind(&update.content)
        .bind(&update.category)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Blog post not found".to_string()));
        }
        Ok(())
    }

    async fn delete_post(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM blog_likes WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Blog post not found".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM blog_likes WHERE post_id = ? AND user_id = ?")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let liked = if removed.rows_affected() == 0 {
            sqlx::query(
                "INSERT INTO blog_likes (post_id, user_id, created_at) VALUES (?, ?, ?)",
            )
            .bind(post_id)
            .bind(user_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
            true
        } else {
            false
        };

        tx.commit().await?;
        Ok(liked)
    }

    async fn like_count(&self, post_id: i64) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_likes WHERE post_id = ?")
                .bind(post_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn liked_by(&self, post_id: i64, user_id: i64) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM blog_likes WHERE post_id = ? AND user_id = ?",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn append_media(
        &self,
        post_id: i64,
        column: MediaColumn,
        path: &str,
    ) -> Result<(), AppError> {
        let sql = format!(
            "UPDATE blog_posts SET {col} = json_insert({col}, '$[#]', ?), updated_at = ? WHERE id = ?",
            col = column.name()
        );
        let result = sqlx::query(&sql)
            .bind(path)
            .bind(Utc::now())
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Blog post not found".to_string()));
        }
        Ok(())
    }
}
