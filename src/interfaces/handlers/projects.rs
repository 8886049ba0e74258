use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::entities::application::ApplyRequest;
use crate::entities::project::{NewProjectRequest, UpdateProjectRequest};
use crate::errors::AppError;
use crate::use_cases::extractors::{AuthClaims, MaybeClaims};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    #[serde(default)]
    pub exclude_applied: bool,
}

#[post("/projects")]
#[instrument(skip(claims, state, request))]
pub async fn create_project(
    claims: AuthClaims,
    state: web::Data<AppState>,
    request: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state
        .projects
        .create_project(&claims.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(project))
}

#[get("/projects")]
#[instrument(skip(viewer, state, query))]
pub async fn list_projects(
    viewer: MaybeClaims,
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state
        .projects
        .list_projects(viewer.0.as_ref(), query.exclude_applied)
        .await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[get("/projects/recommended")]
#[instrument(skip(claims, state))]
pub async fn recommended_projects(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.projects.recommended(&claims.0).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[get("/projects/mine")]
#[instrument(skip(claims, state))]
pub async fn my_projects(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state.projects.my_projects(&claims.0).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[get("/projects/{id}")]
#[instrument(skip(state))]
pub async fn project_detail(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let project = state.projects.detail(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[put("/projects/{id}")]
#[instrument(skip(claims, state, request))]
pub async fn update_project(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state
        .projects
        .update_project(&claims.0, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

#[post("/projects/{id}/apply")]
#[instrument(skip(claims, state, request))]
pub async fn apply_to_project(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<ApplyRequest>,
) -> Result<impl Responder, AppError> {
    let application_id = state
        .applications
        .submit(&claims.0, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": application_id,
        "message": "Application submitted successfully"
    })))
}

#[delete("/projects/{id}/apply")]
#[instrument(skip(claims, state))]
pub async fn withdraw_application(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.applications.withdraw(&claims.0, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Application withdrawn"
    })))
}
