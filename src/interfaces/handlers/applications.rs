use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::application::CompleteRequest;
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[get("/applications")]
#[instrument(skip(claims, state))]
pub async fn list_applications(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let applications = state.applications.list(&claims.0).await?;
    Ok(HttpResponse::Ok().json(applications))
}

#[post("/applications/{id}/accept")]
#[instrument(skip(claims, state))]
pub async fn accept_application(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.applications.accept(&claims.0, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "accepted"})))
}

#[post("/applications/{id}/decline")]
#[instrument(skip(claims, state))]
pub async fn decline_application(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.applications.decline(&claims.0, id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "declined"})))
}

#[post("/applications/{id}/complete")]
#[instrument(skip(claims, state, request))]
pub async fn complete_application(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<CompleteRequest>,
) -> Result<impl Responder, AppError> {
    state
        .applications
        .complete(&claims.0, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"is_completed": true})))
}
