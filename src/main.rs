//! Storybook - AI 插图故事书生成服务
//!
//! 一个提示词 -> 一篇故事 -> 每段一张插图

use std::sync::Arc;

use storybook::application::{
    BookAssemblyConfig, ImageProviderPort, ImageStoragePort, StoryProviderPort,
};
use storybook::config::{load_config, print_config, ImageProviderKind, StoryProviderKind};
use storybook::infrastructure::adapters::{
    FakeImageClient, FakeStoryClient, FileImageStorage, HfImageClient, HfImageClientConfig,
    OpenRouterStoryClient, OpenRouterStoryClientConfig,
};
use storybook::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},storybook={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Storybook - AI 插图故事书生成服务");
    print_config(&config);

    // 插图存储
    let storage: Arc<dyn ImageStoragePort> = Arc::new(
        FileImageStorage::new(&config.storage.image_dir, config.storage.public_path.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to prepare image directory: {}", e))?,
    );

    // 故事生成服务
    let story_provider: Arc<dyn StoryProviderPort> = match config.story.provider {
        StoryProviderKind::OpenRouter => {
            let story_config = OpenRouterStoryClientConfig {
                base_url: config.story.base_url.clone(),
                api_key: config.story.api_key.clone(),
                model: config.story.model.clone(),
                site_url: config.story.site_url.clone(),
                app_title: config.story.app_title.clone(),
                timeout_secs: config.story.timeout_secs,
                temperature: config.story.temperature,
            };
            Arc::new(OpenRouterStoryClient::new(story_config)?)
        }
        StoryProviderKind::Fake => Arc::new(FakeStoryClient::with_defaults()),
    };

    // 插图生成服务
    let image_provider: Arc<dyn ImageProviderPort> = match config.image.provider {
        ImageProviderKind::HuggingFace => {
            let image_config = HfImageClientConfig {
                base_url: config.image.base_url.clone(),
                api_key: config.image.api_key.clone(),
                model: config.image.model.clone(),
                timeout_secs: config.image.timeout_secs,
            };
            Arc::new(HfImageClient::new(image_config, storage.clone())?)
        }
        ImageProviderKind::Fake => Arc::new(FakeImageClient::new(storage.clone(), 300)),
    };

    let book_config = BookAssemblyConfig {
        default_length: config.book.default_length,
        scene_prefix_chars: config.book.scene_prefix_chars,
        max_concurrent_images: config.book.max_concurrent_images,
    };

    let state = AppState::new(story_provider, image_provider, book_config);

    let mut server_config = ServerConfig::new(config.server.host.clone(), config.server.port)
        .with_images(&config.storage.image_dir, config.storage.public_path.clone());
    let static_files = &config.server.static_files;
    if static_files.enabled {
        server_config =
            server_config.with_static_files(static_files.path.clone(), static_files.dir.clone());
    }

    let server = HttpServer::new(server_config, state);

    tracing::info!("Server starting on {}", config.server.addr());
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
