use actix_web::{post, web, HttpResponse, Responder};

use crate::entities::user::{LoginRequest, RegisterRequest};
use crate::AppState;

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> impl Responder {
    match state.auth.register(request.into_inner()).await {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.to_http_response(),
    }
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> impl Responder {
    match state.auth.login(request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => actix_web::error::ResponseError::error_response(&e),
    }
}
