//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::book::StoryLength;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 故事生成服务配置
    #[serde(default)]
    pub story: StoryConfig,

    /// 插图生成服务配置
    #[serde(default)]
    pub image: ImageConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 组装配置
    #[serde(default)]
    pub book: BookConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置（前端页面）
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,

    /// URL 路径前缀（如 "/" 表示根路径托管）
    #[serde(default = "default_static_path")]
    pub path: String,
}

fn default_static_enabled() -> bool {
    false
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

fn default_static_path() -> String {
    "/".to_string()
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
            path: default_static_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 故事生成服务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryProviderKind {
    #[default]
    OpenRouter,
    Fake,
}

/// 故事生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StoryConfig {
    /// 服务类型
    #[serde(default)]
    pub provider: StoryProviderKind,

    /// 服务基础 URL
    #[serde(default = "default_story_url")]
    pub base_url: String,

    /// API Key（也可通过 OPENROUTER_API_KEY 提供）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 模型名
    #[serde(default = "default_story_model")]
    pub model: String,

    /// HTTP-Referer 请求头
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// X-Title 请求头
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_story_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_story_model() -> String {
    "deepseek/deepseek-chat-v3-0324:free".to_string()
}

fn default_site_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_app_title() -> String {
    "AI Story Generator".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.8
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            provider: StoryProviderKind::default(),
            base_url: default_story_url(),
            api_key: None,
            model: default_story_model(),
            site_url: default_site_url(),
            app_title: default_app_title(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
        }
    }
}

/// 插图生成服务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageProviderKind {
    #[default]
    HuggingFace,
    Fake,
}

/// 插图生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// 服务类型
    #[serde(default)]
    pub provider: ImageProviderKind,

    /// 推理服务基础 URL
    #[serde(default = "default_image_url")]
    pub base_url: String,

    /// Access Token（也可通过 HF_TOKEN 提供）
    #[serde(default)]
    pub api_key: Option<String>,

    /// 模型路径
    #[serde(default = "default_image_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_image_url() -> String {
    "https://router.huggingface.co/hf-inference/models".to_string()
}

fn default_image_model() -> String {
    "black-forest-labs/FLUX.1-schnell".to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            provider: ImageProviderKind::default(),
            base_url: default_image_url(),
            api_key: None,
            model: default_image_model(),
            timeout_secs: default_timeout(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 插图存储目录
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    /// 插图对外访问路径
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("public/generated_images")
}

fn default_public_path() -> String {
    "/generated_images".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
            public_path: default_public_path(),
        }
    }
}

/// 故事书组装配置
#[derive(Debug, Clone, Deserialize)]
pub struct BookConfig {
    /// 请求未指定篇幅时使用
    #[serde(default = "default_book_length")]
    pub default_length: StoryLength,

    /// 插图提示词中段落前缀的最大字符数
    #[serde(default = "default_scene_prefix_chars")]
    pub scene_prefix_chars: usize,

    /// 同时进行的插图请求上限，0 表示不限制
    #[serde(default)]
    pub max_concurrent_images: usize,
}

fn default_book_length() -> StoryLength {
    StoryLength::Short
}

fn default_scene_prefix_chars() -> usize {
    100
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            default_length: default_book_length(),
            scene_prefix_chars: default_scene_prefix_chars(),
            max_concurrent_images: 0,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.story.provider, StoryProviderKind::OpenRouter);
        assert_eq!(config.image.provider, ImageProviderKind::HuggingFace);
        assert_eq!(config.book.default_length, StoryLength::Short);
        assert_eq!(config.book.scene_prefix_chars, 100);
        assert_eq!(config.storage.public_path, "/generated_images");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }
}
