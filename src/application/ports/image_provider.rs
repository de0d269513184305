//! Image Provider Port - 插图生成抽象

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::book::{ImageRef, Paragraph};

/// 插图生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllustrationRequest {
    /// 对应段落的位置
    pub ordinal: usize,
    /// 发送给图像模型的提示词
    pub prompt: String,
}

impl IllustrationRequest {
    /// 单独生成插图时使用
    pub fn standalone(prompt: impl Into<String>) -> Self {
        Self {
            ordinal: 0,
            prompt: prompt.into(),
        }
    }

    /// 由原始提示词与段落前缀生成：`{prompt}, scene: {prefix}`
    ///
    /// 前缀按字符计数截断，不会切断多字节字符
    pub fn for_paragraph(story_prompt: &str, paragraph: &Paragraph, prefix_chars: usize) -> Self {
        let scene: String = paragraph.text.chars().take(prefix_chars).collect();
        Self {
            ordinal: paragraph.ordinal,
            prompt: format!("{}, scene: {}", story_prompt, scene),
        }
    }
}

/// Image Provider Port
///
/// 成功时图像已由存储协作方持久化，返回的是引用而不是字节
#[async_trait]
pub trait ImageProviderPort: Send + Sync {
    async fn generate_image(&self, request: &IllustrationRequest)
        -> Result<ImageRef, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_uses_bounded_prefix() {
        let paragraph = Paragraph {
            ordinal: 3,
            text: "abcdefghij".to_string(),
        };
        let req = IllustrationRequest::for_paragraph("A fox", &paragraph, 4);
        assert_eq!(req.ordinal, 3);
        assert_eq!(req.prompt, "A fox, scene: abcd");
    }

    #[test]
    fn test_prefix_respects_char_boundaries() {
        let paragraph = Paragraph {
            ordinal: 0,
            text: "狐狸跳过了篱笆".to_string(),
        };
        let req = IllustrationRequest::for_paragraph("狐狸", &paragraph, 2);
        assert_eq!(req.prompt, "狐狸, scene: 狐狸");
    }

    #[test]
    fn test_short_paragraph_kept_whole() {
        let paragraph = Paragraph {
            ordinal: 1,
            text: "Short.".to_string(),
        };
        let req = IllustrationRequest::for_paragraph("p", &paragraph, 100);
        assert_eq!(req.prompt, "p, scene: Short.");
    }
}
