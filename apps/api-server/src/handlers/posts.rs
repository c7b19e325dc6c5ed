//! Post handlers.
//!
//! A missing post is always a 404. Every other failure uses the handler's
//! own status: 500 for list/get/delete, 400 for create/update.

use actix_web::{HttpResponse, web};

use quill_core::domain::ImageUpload;
use quill_shared::MessageResponse;

use super::form::PostSubmission;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .list()
        .await
        .map_err(|e| AppError::from_domain(e, AppError::Internal))?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get(&path)
        .await
        .map_err(|e| AppError::from_domain(e, AppError::Internal))?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    submission: PostSubmission,
) -> AppResult<HttpResponse> {
    let PostSubmission { mut fields, image } = submission;

    // The file is stored before the record; a failed insert leaves it behind.
    if let Some(upload) = image {
        fields.image = Some(store_image(&state, upload).await?);
    }

    let post = state
        .posts
        .create(fields)
        .await
        .map_err(|e| AppError::from_domain(e, AppError::BadRequest))?;

    tracing::info!(post_id = %post.id, "Post created");
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    submission: PostSubmission,
) -> AppResult<HttpResponse> {
    let PostSubmission { mut fields, image } = submission;

    if let Some(upload) = image {
        fields.image = Some(store_image(&state, upload).await?);
    }

    let post = state
        .posts
        .update(&path, fields)
        .await
        .map_err(|e| AppError::from_domain(e, AppError::BadRequest))?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete(&path)
        .await
        .map_err(|e| AppError::from_domain(e, AppError::Internal))?;

    tracing::info!(post_id = %path.as_str(), "Post deleted");
    Ok(HttpResponse::Ok().json(MessageResponse::post_deleted()))
}

async fn store_image(state: &AppState, upload: ImageUpload) -> AppResult<String> {
    state
        .images
        .save(upload)
        .await
        .map_err(|e| AppError::from_domain(e, AppError::BadRequest))
}
