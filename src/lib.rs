//! Storybook - AI 插图故事书生成服务
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book Context: 生成请求、段落、书页、组装状态机
//! - 段落分割器
//!
//! 应用层 (application/):
//! - Ports: 端口定义（StoryProvider, ImageProvider, ImageStorage）
//! - Commands: 故事书组装、单独生成故事/插图
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 插图静态文件
//! - Adapters: OpenRouter / Hugging Face 客户端、Fake 客户端、文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
