use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::Validate;

const MAX_TITLE_LENGTH: u64 = 200;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogPost {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub images: Json<Vec<String>>,
    pub pdfs: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewBlogPostRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 1, max = MAX_TITLE_LENGTH, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,

    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlogPostView {
    pub id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub pdfs: Vec<String>,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_by_me: Option<bool>,
}

impl BlogPostView {
    pub fn from_parts(post: BlogPost, author_name: String, like_count: i64) -> Self {
        BlogPostView {
            id: post.id,
            author_id: post.author_id,
            author_name,
            title: post.title,
            content: post.content,
            category: post.category,
            images: post.images.0,
            pdfs: post.pdfs.0,
            like_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            liked_by_me: None,
        }
    }
}

/// Result of a like toggle.
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
    pub like_count: i64,
}
