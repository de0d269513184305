//! Fake Story Client - 离线使用的故事客户端
//!
//! 不调用上游服务，根据提示词生成固定结构的正文

use async_trait::async_trait;

use crate::application::ports::{StoryProviderPort, StoryResult, UpstreamError};
use crate::domain::book::GenerationRequest;

/// Fake Story Client 配置
#[derive(Debug, Clone)]
pub struct FakeStoryClientConfig {
    /// 生成的段落数
    pub paragraphs: usize,
    /// 模拟延迟（毫秒）
    pub latency_ms: u64,
}

impl Default for FakeStoryClientConfig {
    fn default() -> Self {
        Self {
            paragraphs: 4,
            latency_ms: 200,
        }
    }
}

/// Fake Story Client
pub struct FakeStoryClient {
    config: FakeStoryClientConfig,
}

impl FakeStoryClient {
    pub fn new(config: FakeStoryClientConfig) -> Self {
        tracing::info!(paragraphs = config.paragraphs, "FakeStoryClient initialized");
        Self { config }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeStoryClientConfig::default())
    }
}

#[async_trait]
impl StoryProviderPort for FakeStoryClient {
    async fn generate_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<StoryResult, UpstreamError> {
        tracing::debug!(prompt = %request.prompt(), "FakeStoryClient: returning canned story");

        // 模拟推理延迟
        tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;

        let text = (1..=self.config.paragraphs)
            .map(|i| {
                format!(
                    "Part {} of a {} {} tale about {}.",
                    i,
                    request.length(),
                    request.genre_or_default(),
                    request.prompt().trim()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        StoryResult::new(text)
    }
}
