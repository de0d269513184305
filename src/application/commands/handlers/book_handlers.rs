//! Book Command Handlers - 故事书组装
//!
//! 流程：故事生成 -> 段落分割 -> 并发插图 -> 按段落顺序组装

use futures_util::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::application::commands::GenerateBook;
use crate::application::error::ApplicationError;
use crate::application::ports::{IllustrationRequest, ImageProviderPort, StoryProviderPort};
use crate::domain::book::{AssemblyStage, Book, GenerationRequest, Page, Paragraph, StoryLength};
use crate::domain::segment_paragraphs;

/// 组装配置
#[derive(Debug, Clone)]
pub struct BookAssemblyConfig {
    /// 请求未指定篇幅时使用
    pub default_length: StoryLength,
    /// 插图提示词中段落前缀的最大字符数
    pub scene_prefix_chars: usize,
    /// 同时进行的插图请求上限，0 表示不限制
    pub max_concurrent_images: usize,
}

impl Default for BookAssemblyConfig {
    fn default() -> Self {
        Self {
            default_length: StoryLength::Short,
            scene_prefix_chars: 100,
            max_concurrent_images: 0,
        }
    }
}

/// 组装结果
#[derive(Debug, Clone)]
pub struct AssembledBook {
    pub id: Uuid,
    pub book: Book,
    /// 缺少插图的页数
    pub degraded_count: usize,
}

/// GenerateBook Handler - 故事书组装器
pub struct GenerateBookHandler {
    story_provider: Arc<dyn StoryProviderPort>,
    image_provider: Arc<dyn ImageProviderPort>,
    config: BookAssemblyConfig,
}

impl GenerateBookHandler {
    pub fn new(
        story_provider: Arc<dyn StoryProviderPort>,
        image_provider: Arc<dyn ImageProviderPort>,
        config: BookAssemblyConfig,
    ) -> Self {
        Self {
            story_provider,
            image_provider,
            config,
        }
    }

    pub async fn handle(&self, command: GenerateBook) -> Result<AssembledBook, ApplicationError> {
        let book_id = Uuid::new_v4();
        let mut stage = AssemblyStage::Idle;

        let length = command.length.unwrap_or(self.config.default_length);
        let request = match GenerationRequest::new(command.prompt, command.genre, length) {
            Ok(request) => request,
            Err(e) => return Err(Self::abort(book_id, &mut stage, e.into())),
        };

        // Idle -> GeneratingStory
        Self::advance(book_id, &mut stage, AssemblyStage::GeneratingStory)?;
        let story = match self.story_provider.generate_story(&request).await {
            Ok(story) => story,
            Err(e) => return Err(Self::abort(book_id, &mut stage, e.into())),
        };

        // GeneratingStory -> Segmenting
        Self::advance(book_id, &mut stage, AssemblyStage::Segmenting)?;
        let paragraphs = segment_paragraphs(&story.text);
        if paragraphs.is_empty() {
            return Err(Self::abort(
                book_id,
                &mut stage,
                ApplicationError::EmptyContent,
            ));
        }

        // Segmenting -> GeneratingImages
        Self::advance(book_id, &mut stage, AssemblyStage::GeneratingImages)?;
        let total = paragraphs.len();
        let pages = self.illustrate(book_id, &request, paragraphs).await;

        // GeneratingImages -> Assembled
        let book = Book::assemble(pages)?;
        Self::advance(book_id, &mut stage, AssemblyStage::Assembled)?;

        let degraded_count = book.degraded_count();
        tracing::info!(
            book_id = %book_id,
            total_pages = total,
            degraded_count = degraded_count,
            "Book assembled"
        );

        Ok(AssembledBook {
            id: book_id,
            book,
            degraded_count,
        })
    }

    /// 每段发起一次插图请求并等待全部完成
    ///
    /// 每个请求只写入自己 ordinal 对应的槽位；失败降级为无插图的书页
    async fn illustrate(
        &self,
        book_id: Uuid,
        request: &GenerationRequest,
        paragraphs: Vec<Paragraph>,
    ) -> Vec<Page> {
        let total = paragraphs.len();
        let limiter = (self.config.max_concurrent_images > 0)
            .then(|| Semaphore::new(self.config.max_concurrent_images));

        tracing::info!(
            book_id = %book_id,
            paragraphs = total,
            max_concurrent = self.config.max_concurrent_images,
            "Generating illustrations"
        );

        let tasks = paragraphs.into_iter().map(|paragraph| {
            let illustration = IllustrationRequest::for_paragraph(
                request.prompt(),
                &paragraph,
                self.config.scene_prefix_chars,
            );
            let limiter = limiter.as_ref();
            async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire().await.ok(),
                    None => None,
                };
                let outcome = self.image_provider.generate_image(&illustration).await;
                (paragraph, outcome)
            }
        });

        let mut slots: Vec<Option<Page>> = vec![None; total];
        for (paragraph, outcome) in join_all(tasks).await {
            let ordinal = paragraph.ordinal;
            let page = match outcome {
                Ok(image) => {
                    tracing::debug!(book_id = %book_id, ordinal = ordinal, url = %image.url, "Illustration ready");
                    Page::illustrated(paragraph, image)
                }
                Err(e) => {
                    tracing::warn!(
                        book_id = %book_id,
                        ordinal = ordinal,
                        error = %e,
                        "Illustration failed, page degraded"
                    );
                    Page::degraded(paragraph)
                }
            };
            if let Some(slot) = slots.get_mut(ordinal) {
                *slot = Some(page);
            }
        }

        slots.into_iter().flatten().collect()
    }

    fn advance(
        book_id: Uuid,
        stage: &mut AssemblyStage,
        next: AssemblyStage,
    ) -> Result<(), ApplicationError> {
        let from = *stage;
        stage.transition(next)?;
        tracing::debug!(book_id = %book_id, from = %from, to = %next, "Assembly stage changed");
        Ok(())
    }

    /// 进入 Errored 并返回错误
    fn abort(book_id: Uuid, stage: &mut AssemblyStage, error: ApplicationError) -> ApplicationError {
        tracing::error!(
            book_id = %book_id,
            stage = %stage,
            error = %error,
            retryable = error.is_retryable(),
            "Book generation failed"
        );
        *stage = AssemblyStage::Errored;
        error
    }
}
