//! Application State
//!
//! 持有端口实现与所有 Command Handlers

use std::sync::Arc;

use crate::application::{
    BookAssemblyConfig, GenerateBookHandler, GenerateImageHandler, GenerateStoryHandler,
    ImageProviderPort, StoryProviderPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub story_provider: Arc<dyn StoryProviderPort>,
    pub image_provider: Arc<dyn ImageProviderPort>,

    // ========== Command Handlers ==========
    pub generate_book_handler: GenerateBookHandler,
    pub generate_story_handler: GenerateStoryHandler,
    pub generate_image_handler: GenerateImageHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        story_provider: Arc<dyn StoryProviderPort>,
        image_provider: Arc<dyn ImageProviderPort>,
        book_config: BookAssemblyConfig,
    ) -> Self {
        Self {
            story_provider: story_provider.clone(),
            image_provider: image_provider.clone(),

            generate_book_handler: GenerateBookHandler::new(
                story_provider.clone(),
                image_provider.clone(),
                book_config,
            ),
            generate_story_handler: GenerateStoryHandler::new(story_provider),
            generate_image_handler: GenerateImageHandler::new(image_provider),
        }
    }
}
