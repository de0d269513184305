//! Book Context - Entities

use serde::{Deserialize, Serialize};

use super::ImageRef;

/// 段落（分段器输出）
///
/// 文本已去除首尾空白且非空，`ordinal` 为其在故事中的位置（从 0 开始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub ordinal: usize,
    pub text: String,
}

/// 书页
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub ordinal: usize,
    pub text: String,
    /// 插图生成失败时为 None
    pub image: Option<ImageRef>,
}

impl Page {
    pub fn illustrated(paragraph: Paragraph, image: ImageRef) -> Self {
        Self {
            ordinal: paragraph.ordinal,
            text: paragraph.text,
            image: Some(image),
        }
    }

    pub fn degraded(paragraph: Paragraph) -> Self {
        Self {
            ordinal: paragraph.ordinal,
            text: paragraph.text,
            image: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.image.is_none()
    }
}
