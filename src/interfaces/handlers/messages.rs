use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::message::{OpenConversationRequest, SendMessageRequest};
use crate::errors::AppError;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

#[post("/conversations")]
#[instrument(skip(claims, state, request))]
pub async fn open_conversation(
    claims: AuthClaims,
    state: web::Data<AppState>,
    request: web::Json<OpenConversationRequest>,
) -> Result<impl Responder, AppError> {
    let conversation = state
        .messaging
        .open_conversation(&claims.0, request.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(conversation))
}

#[get("/conversations")]
#[instrument(skip(claims, state))]
pub async fn list_conversations(
    claims: AuthClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let conversations = state.messaging.list_conversations(&claims.0).await?;
    Ok(HttpResponse::Ok().json(conversations))
}

#[get("/conversations/{id}/messages")]
#[instrument(skip(claims, state))]
pub async fn fetch_messages(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let messages = state
        .messaging
        .fetch_messages(&claims.0, id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(messages))
}

#[post("/conversations/{id}/messages")]
#[instrument(skip(claims, state, request))]
pub async fn send_message(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<SendMessageRequest>,
) -> Result<impl Responder, AppError> {
    let message = state
        .messaging
        .send_message(&claims.0, id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(message))
}
