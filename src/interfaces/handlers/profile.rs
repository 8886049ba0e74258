use actix_web::{get, put, web, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::user::{AvailabilityRequest, UpdateProfileRequest};
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[get("/profile")]
#[instrument(skip(claims, state))]
pub async fn get_profile(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profile = state.profiles.get_profile(claims.0.user_id()?).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/profile")]
#[instrument(skip(claims, state, request))]
pub async fn update_profile(
    claims: AuthClaims,
    state: web::Data<AppState>,
    request: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, AppError> {
    let profile = state
        .profiles
        .update_profile(&claims.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/profile/availability")]
#[instrument(skip(claims, state, request))]
pub async fn set_availability(
    claims: AuthClaims,
    state: web::Data<AppState>,
    request: web::Json<AvailabilityRequest>,
) -> Result<impl Responder, AppError> {
    state
        .profiles
        .set_availability(&claims.0, request.is_available)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "is_available": request.is_available
    })))
}

#[get("/users/{id}")]
#[instrument(skip(state))]
pub async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let profile = state.profiles.get_profile(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/alumni")]
#[instrument(skip(state))]
pub async fn list_alumni(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let alumni = state.profiles.list_alumni().await?;
    Ok(HttpResponse::Ok().json(alumni))
}
