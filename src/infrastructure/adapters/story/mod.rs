//! Story Adapter - 故事生成客户端实现

mod fake_story_client;
mod openrouter_client;

pub use fake_story_client::{FakeStoryClient, FakeStoryClientConfig};
pub use openrouter_client::*;
