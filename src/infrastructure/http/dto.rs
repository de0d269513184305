//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{AssembledBook, GenerateStoryResponse};
use crate::domain::book::{ImageRef, Page, StoryLength};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 解析篇幅参数，无法识别时返回 None
fn parse_length(length: Option<&str>) -> Option<StoryLength> {
    length.and_then(StoryLength::from_str)
}

// ============================================================================
// Book DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateBookRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
}

impl GenerateBookRequest {
    /// 未指定或无法识别时由组装器使用默认篇幅
    pub fn length(&self) -> Option<StoryLength> {
        parse_length(self.length.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub index: usize,
    pub text: String,
    pub image_url: Option<String>,
    /// false 时前端显示“插图不可用”
    pub image_available: bool,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            index: page.ordinal,
            image_available: page.image.is_some(),
            image_url: page.image.map(|i| i.url),
            text: page.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: Uuid,
    pub total_pages: usize,
    pub degraded_count: usize,
    pub full_text: String,
    pub pages: Vec<PageResponse>,
}

impl From<AssembledBook> for BookResponse {
    fn from(assembled: AssembledBook) -> Self {
        let full_text = assembled.book.full_text();
        let pages: Vec<PageResponse> = assembled
            .book
            .into_pages()
            .into_iter()
            .map(PageResponse::from)
            .collect();

        Self {
            id: assembled.id,
            total_pages: pages.len(),
            degraded_count: assembled.degraded_count,
            full_text,
            pages,
        }
    }
}

// ============================================================================
// Story DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateStoryRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
}

impl GenerateStoryRequest {
    /// 未指定或无法识别时为 medium
    pub fn length(&self) -> StoryLength {
        parse_length(self.length.as_deref()).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub story: String,
    pub prompt: String,
    pub genre: String,
    pub length: StoryLength,
    pub word_count: usize,
}

impl From<GenerateStoryResponse> for StoryResponse {
    fn from(resp: GenerateStoryResponse) -> Self {
        Self {
            story: resp.story,
            prompt: resp.prompt,
            genre: resp.genre,
            length: resp.length,
            word_count: resp.word_count,
        }
    }
}

// ============================================================================
// Image DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image_url: String,
    pub filename: String,
    pub prompt: String,
}

impl ImageResponse {
    pub fn new(image: ImageRef, prompt: String) -> Self {
        Self {
            image_url: image.url,
            filename: image.filename,
            prompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{Book, Paragraph};

    #[test]
    fn test_length_parsing() {
        let req = GenerateStoryRequest {
            prompt: "p".into(),
            genre: None,
            length: Some("epic".into()),
        };
        assert_eq!(req.length(), StoryLength::Medium);

        let req = GenerateBookRequest {
            prompt: "p".into(),
            genre: None,
            length: Some("Long".into()),
        };
        assert_eq!(req.length(), Some(StoryLength::Long));
    }

    #[test]
    fn test_book_response_marks_degraded_pages() {
        let paragraph = |ordinal: usize, text: &str| Paragraph {
            ordinal,
            text: text.to_string(),
        };
        let book = Book::assemble(vec![
            Page::illustrated(paragraph(0, "a"), ImageRef::new("/img/a.jpg", "a.jpg")),
            Page::degraded(paragraph(1, "b")),
        ])
        .unwrap();
        let resp = BookResponse::from(AssembledBook {
            id: Uuid::nil(),
            book,
            degraded_count: 1,
        });

        assert_eq!(resp.total_pages, 2);
        assert_eq!(resp.full_text, "a\n\nb");
        assert_eq!(resp.pages[0].image_url.as_deref(), Some("/img/a.jpg"));
        assert!(resp.pages[0].image_available);
        assert_eq!(resp.pages[1].image_url, None);
        assert!(!resp.pages[1].image_available);
    }
}
