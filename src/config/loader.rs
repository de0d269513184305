//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, ImageProviderKind, StoryProviderKind};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 约定俗成的凭据环境变量
const OPENROUTER_KEY_VAR: &str = "OPENROUTER_API_KEY";
const HF_TOKEN_VAR: &str = "HF_TOKEN";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `STORYBOOK_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值（`OPENROUTER_API_KEY` / `HF_TOKEN` 作为凭据默认值）
///
/// # 环境变量示例
/// - `STORYBOOK_SERVER__PORT=8080`
/// - `STORYBOOK_STORY__MODEL=openai/gpt-4o-mini`
/// - `STORYBOOK_IMAGE__PROVIDER=fake`
/// - `STORYBOOK_BOOK__MAX_CONCURRENT_IMAGES=4`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("story.provider", "openrouter")?
        .set_default("story.base_url", "https://openrouter.ai/api/v1")?
        .set_default("story.model", "deepseek/deepseek-chat-v3-0324:free")?
        .set_default("story.timeout_secs", 120)?
        .set_default("image.provider", "huggingface")?
        .set_default("image.base_url", "https://router.huggingface.co/hf-inference/models")?
        .set_default("image.model", "black-forest-labs/FLUX.1-schnell")?
        .set_default("image.timeout_secs", 120)?
        .set_default("storage.image_dir", "public/generated_images")?
        .set_default("storage.public_path", "/generated_images")?
        .set_default("book.default_length", "short")?
        .set_default("book.scene_prefix_chars", 100)?
        .set_default("book.max_concurrent_images", 0)?
        .set_default("log.level", "info")?;

    // 凭据默认值
    if let Ok(key) = std::env::var(OPENROUTER_KEY_VAR) {
        builder = builder.set_default("story.api_key", key)?;
    }
    if let Ok(token) = std::env::var(HF_TOKEN_VAR) {
        builder = builder.set_default("image.api_key", token)?;
    }

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: STORYBOOK_STORY__API_KEY=sk-...
    builder = builder.add_source(
        Environment::with_prefix("STORYBOOK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// 缺少凭据不视为错误：请求时返回 NotConfigured
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.story.provider == StoryProviderKind::OpenRouter && config.story.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Story base URL cannot be empty".to_string(),
        ));
    }

    if config.image.provider == ImageProviderKind::HuggingFace && config.image.base_url.is_empty()
    {
        return Err(ConfigError::ValidationError(
            "Image base URL cannot be empty".to_string(),
        ));
    }

    if config.book.scene_prefix_chars == 0 {
        return Err(ConfigError::ValidationError(
            "Scene prefix length cannot be 0".to_string(),
        ));
    }

    let public_path = config.storage.public_path.trim_end_matches('/');
    if !config.storage.public_path.starts_with('/') || public_path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Storage public path must start with '/' and not be the root".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Story Provider: {:?}", config.story.provider);
    tracing::info!("Story Model: {}", config.story.model);
    tracing::info!(
        "Story Credential: {}",
        if config.story.api_key.is_some() { "configured" } else { "missing" }
    );
    tracing::info!("Image Provider: {:?}", config.image.provider);
    tracing::info!("Image Model: {}", config.image.model);
    tracing::info!(
        "Image Credential: {}",
        if config.image.api_key.is_some() { "configured" } else { "missing" }
    );
    tracing::info!("Image Directory: {:?}", config.storage.image_dir);
    tracing::info!("Image Public Path: {}", config.storage.public_path);
    tracing::info!("Default Length: {}", config.book.default_length);
    tracing::info!("Scene Prefix Chars: {}", config.book.scene_prefix_chars);
    if config.book.max_concurrent_images > 0 {
        tracing::info!("Max Concurrent Images: {}", config.book.max_concurrent_images);
    } else {
        tracing::info!("Max Concurrent Images: unbounded");
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
