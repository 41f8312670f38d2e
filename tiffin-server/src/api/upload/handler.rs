//! Image Upload Handler

use axum::extract::{Extension, Multipart, State};
use shared::client::UploadResponse;

use crate::audit_log;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::ImageUpload;
use crate::services::image_host::validate_image;
use crate::utils::{ApiResult, AppError, ErrorCode, ok};

/// Upload image handler
pub async fn upload(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> ApiResult<UploadResponse> {
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        if f.name() == Some("file") {
            original_filename = f.file_name().map(str::to_string);
            field_data = Some(
                f.bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::NoFileProvided,
            "No 'file' field found. Field name must be 'file'",
        )
    })?;
    let file_name = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field"))?;

    let content_type = validate_image(
        &file_name,
        &data,
        state.config.image_host.max_upload_bytes,
    )?;
    let size = data.len();

    let url = state
        .image_host
        .upload(ImageUpload {
            file_name: file_name.clone(),
            content_type,
            bytes: data,
        })
        .await?;

    audit_log!(user.uid, "upload", format!("image:{file_name}"), url);
    tracing::info!(original_name = %file_name, size = size, "Image uploaded");

    Ok(ok(UploadResponse { url }))
}
