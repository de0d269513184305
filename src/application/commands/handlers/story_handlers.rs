//! Story Command Handlers - 单独生成故事正文

use std::sync::Arc;

use crate::application::commands::GenerateStory;
use crate::application::error::ApplicationError;
use crate::application::ports::StoryProviderPort;
use crate::domain::book::{GenerationRequest, StoryLength};

/// 故事生成响应
#[derive(Debug, Clone)]
pub struct GenerateStoryResponse {
    pub story: String,
    pub prompt: String,
    pub genre: String,
    pub length: StoryLength,
    pub word_count: usize,
}

/// GenerateStory Handler
pub struct GenerateStoryHandler {
    story_provider: Arc<dyn StoryProviderPort>,
}

impl GenerateStoryHandler {
    pub fn new(story_provider: Arc<dyn StoryProviderPort>) -> Self {
        Self { story_provider }
    }

    pub async fn handle(
        &self,
        command: GenerateStory,
    ) -> Result<GenerateStoryResponse, ApplicationError> {
        let request = GenerationRequest::new(command.prompt, command.genre, command.length)?;

        let story = self.story_provider.generate_story(&request).await.map_err(|e| {
            tracing::error!(error = %e, "Story generation failed");
            ApplicationError::from(e)
        })?;

        let word_count = story.word_count();
        tracing::info!(
            length = %request.length(),
            genre = %request.genre_or_default(),
            word_count = word_count,
            "Story generated"
        );

        Ok(GenerateStoryResponse {
            word_count,
            genre: request.genre_or_default().to_string(),
            length: request.length(),
            prompt: request.prompt().to_string(),
            story: story.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::application::ports::{StoryResult, UpstreamError};

    struct EchoStory;

    #[async_trait]
    impl StoryProviderPort for EchoStory {
        async fn generate_story(
            &self,
            request: &GenerationRequest,
        ) -> Result<StoryResult, UpstreamError> {
            StoryResult::new(format!("Story about {}", request.prompt()))
        }
    }

    struct RejectingStory;

    #[async_trait]
    impl StoryProviderPort for RejectingStory {
        async fn generate_story(
            &self,
            _request: &GenerationRequest,
        ) -> Result<StoryResult, UpstreamError> {
            Err(UpstreamError::InvalidCredential)
        }
    }

    #[tokio::test]
    async fn test_story_response_fields() {
        let handler = GenerateStoryHandler::new(Arc::new(EchoStory));
        let resp = handler
            .handle(GenerateStory {
                prompt: "a fox".into(),
                genre: None,
                length: StoryLength::Medium,
            })
            .await
            .unwrap();

        assert_eq!(resp.story, "Story about a fox");
        assert_eq!(resp.genre, "general");
        assert_eq!(resp.length, StoryLength::Medium);
        assert_eq!(resp.word_count, 4);
    }

    #[tokio::test]
    async fn test_blank_prompt_rejected() {
        let handler = GenerateStoryHandler::new(Arc::new(EchoStory));
        let err = handler
            .handle(GenerateStory {
                prompt: " ".into(),
                genre: None,
                length: StoryLength::Short,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_upstream_error_mapped() {
        let handler = GenerateStoryHandler::new(Arc::new(RejectingStory));
        let err = handler
            .handle(GenerateStory {
                prompt: "a fox".into(),
                genre: None,
                length: StoryLength::Short,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ApplicationError::InvalidCredential);
    }
}
