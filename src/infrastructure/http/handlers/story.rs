//! Story HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::GenerateStory;
use crate::infrastructure::http::dto::{ApiResponse, GenerateStoryRequest, StoryResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /api/story/generate - 只生成故事正文
pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateStoryRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<StoryResponse>>, ApiError> {
    let Json(req) = payload?;
    let length = req.length();
    let cmd = GenerateStory {
        prompt: req.prompt,
        genre: req.genre,
        length,
    };

    let resp = state.generate_story_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(StoryResponse::from(resp))))
}
