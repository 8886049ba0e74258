use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use tracing::instrument;

use crate::errors::AppError;
use crate::infrastructure::storage::files::content_type_for;
use crate::use_cases::extractors::AuthClaims;
use crate::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Drains the first file field out of a multipart payload.
async fn read_upload(mut payload: Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|name| name.to_string())
        else {
            continue;
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
        {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::BadRequest("File is too large".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        return Ok((filename, bytes));
    }

    Err(AppError::BadRequest("No file in request".to_string()))
}

#[post("/uploads/avatar")]
#[instrument(skip(claims, state, payload))]
pub async fn upload_avatar(
    claims: AuthClaims,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let (filename, bytes) = read_upload(payload).await?;
    let stored = state.uploads.store_avatar(&claims.0, &filename, &bytes).await?;
    Ok(HttpResponse::Created().json(stored))
}

#[post("/uploads/cv")]
#[instrument(skip(claims, state, payload))]
pub async fn upload_cv(
    claims: AuthClaims,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let (filename, bytes) = read_upload(payload).await?;
    let stored = state.uploads.store_cv(&claims.0, &filename, &bytes).await?;
    Ok(HttpResponse::Created().json(stored))
}

#[post("/projects/{id}/images")]
#[instrument(skip(claims, state, payload))]
pub async fn upload_project_image(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let (filename, bytes) = read_upload(payload).await?;
    let stored = state
        .uploads
        .store_project_image(&claims.0, id.into_inner(), &filename, &bytes)
        .await?;
    Ok(HttpResponse::Created().json(stored))
}

#[post("/projects/{id}/document")]
#[instrument(skip(claims, state, payload))]
pub async fn upload_project_document(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let (filename, bytes) = read_upload(payload).await?;
    let stored = state
        .uploads
        .store_project_document(&claims.0, id.into_inner(), &filename, &bytes)
        .await?;
    Ok(HttpResponse::Created().json(stored))
}

#[post("/blog/{id}/images")]
#[instrument(skip(claims, state, payload))]
pub async fn upload_blog_image(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let (filename, bytes) = read_upload(payload).await?;
    let stored = state
        .uploads
        .store_blog_image(&claims.0, id.into_inner(), &filename, &bytes)
        .await?;
    Ok(HttpResponse::Created().json(stored))
}

#[post("/blog/{id}/pdfs")]
#[instrument(skip(claims, state, payload))]
pub async fn upload_blog_pdf(
    claims: AuthClaims,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    let (filename, bytes) = read_upload(payload).await?;
    let stored = state
        .uploads
        .store_blog_pdf(&claims.0, id.into_inner(), &filename, &bytes)
        .await?;
    Ok(HttpResponse::Created().json(stored))
}

/// Serves stored files back by their generated path.
#[get("/uploads/{path:.*}")]
#[instrument(skip(state))]
pub async fn serve_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let relative = path.into_inner();
    let full_path = state.uploads.file_store.resolve(&relative)?;

    let bytes = tokio::fs::read(&full_path)
        .await
        .map_err(|_| AppError::NotFound("File not found".to_string()))?;

    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&relative))
        .body(bytes))
}
