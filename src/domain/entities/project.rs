use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use validator::Validate;

use crate::entities::user::validate_optional_http_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Paused,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ProjectStatus,
    pub created_by: i64,
    pub team_members: Json<Vec<String>>,
    pub tags: Json<Vec<String>>,
    pub required_skills: Json<Vec<String>>,
    pub is_recruiting: bool,
    pub images: Json<Vec<String>>,
    pub links: Json<Vec<String>>,
    pub job_description_path: Option<String>,
    pub funding: Option<String>,
    pub partners: Json<Vec<String>>,
    pub highlights: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectPosition {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub required_skills: Json<Vec<String>>,
    pub count: i64,
    pub filled_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewPositionRequest {
    #[validate(length(min = 1, message = "Position title is required"))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub required_skills: Vec<String>,

    #[validate(range(min = 1, message = "Position must have at least one seat"))]
    #[serde(default = "default_count")]
    pub count: i64,
}

fn default_count() -> i64 {
    1
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    pub status: Option<ProjectStatus>,

    #[serde(default)]
    pub team_members: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub required_skills: Vec<String>,

    pub is_recruiting: Option<bool>,

    #[validate(custom(function = "validate_links"))]
    #[serde(default)]
    pub links: Vec<String>,

    pub funding: Option<String>,

    #[serde(default)]
    pub partners: Vec<String>,

    #[serde(default)]
    pub highlights: Vec<String>,

    #[validate(nested)]
    #[serde(default)]
    pub positions: Vec<NewPositionRequest>,
}

/// Position payload inside a project update. A payload with an id patches
/// that position in place; without an id it inserts a new one (title
/// required then, enforced in the use case).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PositionUpsert {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub count: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,

    pub status: Option<ProjectStatus>,
    pub team_members: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub required_skills: Option<Vec<String>>,
    pub is_recruiting: Option<bool>,

    #[validate(custom(function = "validate_links"))]
    pub links: Option<Vec<String>>,
    pub funding: Option<String>,
    pub partners: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub positions: Option<Vec<PositionUpsert>>,
}

impl UpdateProjectRequest {
    /// True when nothing in the payload would change the project row itself.
    pub fn is_noop(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.team_members.is_none()
            && self.tags.is_none()
            && self.required_skills.is_none()
            && self.is_recruiting.is_none()
            && self.links.is_none()
            && self.funding.is_none()
            && self.partners.is_none()
            && self.highlights.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct PositionView {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub count: i64,
    pub filled_count: i64,
    pub is_active: bool,
}

impl From<ProjectPosition> for PositionView {
    fn from(p: ProjectPosition) -> Self {
        PositionView {
            id: p.id,
            project_id: p.project_id,
            title: p.title,
            description: p.description,
            required_skills: p.required_skills.0,
            count: p.count,
            filled_count: p.filled_count,
            is_active: p.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ProjectStatus,
    pub created_by: i64,
    pub created_by_name: String,
    pub created_by_email: String,
    pub team_members: Vec<String>,
    pub tags: Vec<String>,
    pub required_skills: Vec<String>,
    pub is_recruiting: bool,
    pub images: Vec<String>,
    pub links: Vec<String>,
    pub job_description_path: Option<String>,
    pub funding: Option<String>,
    pub partners: Vec<String>,
    pub highlights: Vec<String>,
    pub positions: Vec<PositionView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_applied: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

impl ProjectView {
    pub fn from_parts(
        project: Project,
        created_by_name: String,
        created_by_email: String,
        positions: Vec<ProjectPosition>,
    ) -> Self {
        ProjectView {
            id: project.id,
            title: project.title,
            description: project.description,
            category: project.category,
            status: project.status,
            created_by: project.created_by,
            created_by_name,
            created_by_email,
            team_members: project.team_members.0,
            tags: project.tags.0,
            required_skills: project.required_skills.0,
            is_recruiting: project.is_recruiting,
            images: project.images.0,
            links: project.links.0,
            job_description_path: project.job_description_path,
            funding: project.funding,
            partners: project.partners.0,
            highlights: project.highlights.0,
            positions: positions.into_iter().map(PositionView::from).collect(),
            created_at: project.created_at,
            updated_at: project.updated_at,
            has_applied: None,
            score: None,
        }
    }
}

pub fn validate_links(links: &[String]) -> Result<(), validator::ValidationError> {
    for link in links {
        validate_optional_http_url(link)?;
    }
    Ok(())
}
