//! Image HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::GenerateImage;
use crate::infrastructure::http::dto::{ApiResponse, GenerateImageRequest, ImageResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/image/generate - 只生成一张插图
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateImageRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ImageResponse>>, ApiError> {
    let Json(req) = payload?;
    let prompt = req.prompt.clone();
    let image = state
        .generate_image_handler
        .handle(GenerateImage { prompt: req.prompt })
        .await?;

    Ok(Json(ApiResponse::success(ImageResponse::new(image, prompt))))
}
