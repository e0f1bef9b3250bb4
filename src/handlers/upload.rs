use crate::error::AppError;
use crate::models::UploadResponse;
use crate::services::uploads::allowed_file;
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};

/// POST /upload
///
/// Accepts a multipart form with an `image` field, validates its filename
/// against the image-extension allow-list, and persists the bytes under the
/// upload directory. Contents are not inspected beyond the extension; a file
/// with an image extension and arbitrary bytes is accepted.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        if original_name.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!("No selected file")));
        }

        if !allowed_file(&original_name) {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "File type not allowed"
            )));
        }

        let data = field.bytes().await?;

        let stored = state.uploads.save(&original_name, &data).await?;

        tracing::info!(
            filename = %stored.stored_name,
            size = data.len(),
            "Upload stored"
        );

        return Ok(Json(UploadResponse {
            url: format!("/static/uploads/{}", stored.stored_name),
            filename: stored.stored_name,
            message: "Upload successful".to_string(),
        }));
    }

    Err(AppError::BadRequest(anyhow::anyhow!(
        "No image field in request"
    )))
}
