use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{extract_image_pair, sanitize_filename, UploadedImage};
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use pixmerge_core::AppError;
use pixmerge_processing::BlendOperation;
use pixmerge_storage::{generate_upload_key, LocalStorage};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use utoipa::ToSchema;
use uuid::Uuid;

/// Public URL of every operation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CombineResponse {
    pub xor_result: String,
    pub add_result: String,
    pub sub_result: String,
    pub avg_result: String,
    pub max_result: String,
    pub min_result: String,
    pub and_result: String,
    pub or_result: String,
}

impl CombineResponse {
    /// Build the response by asking `url_for` for each operation's URL
    pub fn from_urls(url_for: impl Fn(BlendOperation) -> String) -> Self {
        Self {
            xor_result: url_for(BlendOperation::Xor),
            add_result: url_for(BlendOperation::Add),
            sub_result: url_for(BlendOperation::Sub),
            avg_result: url_for(BlendOperation::Avg),
            max_result: url_for(BlendOperation::Max),
            min_result: url_for(BlendOperation::Min),
            and_result: url_for(BlendOperation::And),
            or_result: url_for(BlendOperation::Or),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/combine",
    tag = "combine",
    request_body(content = inline(Object), description = "Multipart form with `image1` and `image2` file fields", content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "All eight operations completed", body = CombineResponse),
        (status = 400, description = "Missing or invalid upload", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Image combination failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "combine_images", request_id))]
pub async fn combine(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let start = Instant::now();
    let (image1, image2) =
        extract_image_pair(multipart, state.config.max_file_size_bytes()).await?;

    let request_id = Uuid::new_v4();
    tracing::Span::current().record("request_id", tracing::field::display(request_id));
    tracing::info!(
        image1 = %image1.filename,
        image1_bytes = image1.data.len(),
        image2 = %image2.filename,
        image2_bytes = image2.data.len(),
        "Received images for combination"
    );

    let key1 = store_upload(&state.uploads, request_id, "image1", &image1).await?;
    let key2 = match store_upload(&state.uploads, request_id, "image2", &image2).await {
        Ok(key) => key,
        Err(e) => {
            discard_uploads(&state, &[&key1]).await;
            return Err(e);
        }
    };

    let result = run_combination(&state, &key1, &key2).await;
    discard_uploads(&state, &[&key1, &key2]).await;
    result?;

    tracing::info!(
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Combination request completed"
    );

    let response = CombineResponse::from_urls(|op| state.outputs.url_for(&op.output_filename()));
    Ok(Json(response))
}

async fn store_upload(
    uploads: &LocalStorage,
    request_id: Uuid,
    slot: &str,
    image: &UploadedImage,
) -> Result<String, HttpAppError> {
    let filename = sanitize_filename(&image.filename)?;
    let key = generate_upload_key(request_id, slot, &filename);
    uploads.upload_with_key(&key, image.data.clone()).await?;
    Ok(key)
}

async fn run_combination(state: &AppState, key1: &str, key2: &str) -> Result<(), HttpAppError> {
    let path1 = state.uploads.path_for(key1)?;
    let path2 = state.uploads.path_for(key2)?;
    let output_dir = state.outputs.base_path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        pixmerge_processing::combine_images(&path1, &path2, &output_dir)
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to spawn blocking task");
        AppError::Internal(e.to_string())
    })??;

    tracing::debug!(
        width = output.width,
        height = output.height,
        artifacts = output.artifacts.len(),
        "Combination written to output directory"
    );
    Ok(())
}

async fn discard_uploads(state: &AppState, keys: &[&str]) {
    if state.config.keep_uploads() {
        return;
    }
    for key in keys {
        if let Err(e) = state.uploads.delete(key).await {
            tracing::warn!(error = %e, key = %key, "Failed to remove uploaded input");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_field_names() {
        let response = CombineResponse::from_urls(|op| format!("http://h/output/{}", op.output_filename()));
        let json = serde_json::to_value(&response).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        for op in BlendOperation::ALL {
            let key = op.result_key();
            assert_eq!(
                obj[&key],
                format!("http://h/output/{}_result.png", op.name())
            );
        }
    }
}
