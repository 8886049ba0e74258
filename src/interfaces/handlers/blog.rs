use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::blog::{NewBlogPostRequest, UpdateBlogPostRequest};
use crate::errors::AppError;
use crate::use_cases::extractors::{AuthClaims, MaybeClaims};
use crate::AppState;

#[post("/blog")]
#[instrument(skip(claims, state, request))]
pub async fn create_blog_post(
    claims: AuthClaims,
    state: web::Data<AppState>,
    request: web::Json<NewBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let post = state.blog.create_post(&claims.0, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(post))
}

#[get("/blog")]
#[instrument(skip(state))]
pub async fn list_blog_posts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let posts = state.blog.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[get("/blog/{id}")]
#[instrument(skip(viewer, state))]
pub async fn get_blog_post(
    viewer: MaybeClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let post = state
        .blog
        .get_post(viewer.0.as_ref(), id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

#[put("/blog/{id}")]
#[instrument(skip(claims, state, request))]
pub async fn update_blog_post(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<UpdateBlogPostRequest>,
) -> Result<impl Responder, AppError> {
    let post = state
        .blog
        .update_post(&claims.0, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

#[delete("/blog/{id}")]
#[instrument(skip(claims, state))]
pub async fn delete_blog_post(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.blog.delete_post(&claims.0, id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/blog/{id}/like")]
#[instrument(skip(claims, state))]
pub async fn toggle_like(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let result = state.blog.toggle_like(&claims.0, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}
