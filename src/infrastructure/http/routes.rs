//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping             GET   健康检查
//! - /api/book/generate    POST  生成故事并为每个段落配图
//! - /api/story/generate   POST  只生成故事正文
//! - /api/image/generate   POST  只生成一张插图

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/book/generate", post(handlers::generate_book))
        .route("/story/generate", post(handlers::generate_story))
        .route("/image/generate", post(handlers::generate_image))
}
