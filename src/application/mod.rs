//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（StoryProvider、ImageProvider、ImageStorage）
//! - commands: 命令及处理器（故事书组装、单独生成故事/插图）
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    GenerateBook,
    GenerateImage,
    GenerateStory,
    // Handlers
    handlers::{
        AssembledBook, BookAssemblyConfig, GenerateBookHandler, GenerateImageHandler,
        GenerateStoryHandler, GenerateStoryResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Image provider
    IllustrationRequest,
    ImageProviderPort,
    // Image storage
    ImageStoragePort,
    StorageError,
    // Story provider
    StoryProviderPort,
    StoryResult,
    UpstreamError,
};
