//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod image_provider;
mod image_storage;
mod story_provider;

pub use image_provider::{IllustrationRequest, ImageProviderPort};
pub use image_storage::{
    sanitize_prompt_fragment, ImageStoragePort, StorageError, MAX_PROMPT_FRAGMENT_CHARS,
};
pub use story_provider::{StoryProviderPort, StoryResult, UpstreamError};
