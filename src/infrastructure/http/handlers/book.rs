//! Book HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::GenerateBook;
use crate::infrastructure::http::dto::{ApiResponse, BookResponse, GenerateBookRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/book/generate - 生成完整故事书
///
/// 单张插图失败不影响整体结果，对应页面 image_available 为 false
pub async fn generate_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateBookRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BookResponse>>, ApiError> {
    let Json(req) = payload?;
    let length = req.length();
    let cmd = GenerateBook {
        prompt: req.prompt,
        genre: req.genre,
        length,
    };

    let assembled = state.generate_book_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(BookResponse::from(assembled))))
}
