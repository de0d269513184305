//! Image Command Handlers - 单独生成插图

use std::sync::Arc;

use crate::application::commands::GenerateImage;
use crate::application::error::ApplicationError;
use crate::application::ports::{IllustrationRequest, ImageProviderPort};
use crate::domain::book::ImageRef;

/// GenerateImage Handler
pub struct GenerateImageHandler {
    image_provider: Arc<dyn ImageProviderPort>,
}

impl GenerateImageHandler {
    pub fn new(image_provider: Arc<dyn ImageProviderPort>) -> Self {
        Self { image_provider }
    }

    /// 与组装流程不同，这里插图失败直接返回给调用方
    pub async fn handle(&self, command: GenerateImage) -> Result<ImageRef, ApplicationError> {
        if command.prompt.trim().is_empty() {
            return Err(ApplicationError::invalid_input("Prompt is required"));
        }

        let request = IllustrationRequest::standalone(command.prompt);
        let image = self
            .image_provider
            .generate_image(&request)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Image generation failed");
                ApplicationError::from(e)
            })?;

        tracing::info!(filename = %image.filename, "Image generated");
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::application::ports::UpstreamError;

    #[derive(Default)]
    struct CountingImages {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ImageProviderPort for CountingImages {
        async fn generate_image(
            &self,
            request: &IllustrationRequest,
        ) -> Result<ImageRef, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(UpstreamError::QuotaExceeded);
            }
            Ok(ImageRef::new(format!("/img/{}", request.prompt), request.prompt.clone()))
        }
    }

    #[tokio::test]
    async fn test_generates_image() {
        let provider = Arc::new(CountingImages::default());
        let handler = GenerateImageHandler::new(provider.clone());

        let image = handler
            .handle(GenerateImage { prompt: "fox".into() })
            .await
            .unwrap();

        assert_eq!(image.url, "/img/fox");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_prompt_skips_upstream() {
        let provider = Arc::new(CountingImages::default());
        let handler = GenerateImageHandler::new(provider.clone());

        let err = handler
            .handle(GenerateImage { prompt: "  ".into() })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::InvalidInput(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_is_surfaced() {
        let provider = Arc::new(CountingImages {
            fail: true,
            ..Default::default()
        });
        let handler = GenerateImageHandler::new(provider);

        let err = handler
            .handle(GenerateImage { prompt: "fox".into() })
            .await
            .unwrap_err();
        assert_eq!(err, ApplicationError::QuotaExceeded);
    }
}
