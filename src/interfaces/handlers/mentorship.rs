use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::mentorship::NewMentorshipRequest;
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[post("/requests")]
#[instrument(skip(claims, state, request))]
pub async fn request_mentorship(
    claims: AuthClaims,
    state: web::Data<AppState>,
    request: web::Json<NewMentorshipRequest>,
) -> Result<impl Responder, AppError> {
    let id = state
        .mentorship
        .request(&claims.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": id,
        "message": "Mentorship request sent successfully"
    })))
}

#[get("/requests")]
#[instrument(skip(claims, state))]
pub async fn list_mentorship_requests(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let requests = state.mentorship.list(&claims.0).await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[post("/requests/{id}/accept")]
#[instrument(skip(claims, state))]
pub async fn accept_mentorship(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.mentorship.respond(&claims.0, id.into_inner(), true).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "accepted"})))
}

#[post("/requests/{id}/decline")]
#[instrument(skip(claims, state))]
pub async fn decline_mentorship(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    state.mentorship.respond(&claims.0, id.into_inner(), false).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "declined"})))
}
