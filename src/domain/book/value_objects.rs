//! Book Context - Value Objects

use serde::{Deserialize, Serialize};

use super::BookError;

/// 故事篇幅
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl StoryLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryLength::Short => "short",
            StoryLength::Medium => "medium",
            StoryLength::Long => "long",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Some(StoryLength::Short),
            "medium" => Some(StoryLength::Medium),
            "long" => Some(StoryLength::Long),
            _ => None,
        }
    }

    /// 期望字数区间（写入系统提示词）
    pub fn word_range(&self) -> &'static str {
        match self {
            StoryLength::Short => "200-400",
            StoryLength::Medium => "500-800",
            StoryLength::Long => "1000-1500",
        }
    }

    /// 上游响应 token 预算
    pub fn max_tokens(&self) -> u32 {
        match self {
            StoryLength::Short => 600,
            StoryLength::Medium => 1200,
            StoryLength::Long => 2000,
        }
    }
}

impl std::fmt::Display for StoryLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未指定题材时使用的默认值
pub const DEFAULT_GENRE: &str = "general";

/// 故事生成请求
///
/// 只能通过 [`GenerationRequest::new`] 构造，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    genre: Option<String>,
    length: StoryLength,
}

impl GenerationRequest {
    /// 创建请求，prompt 为空或只含空白时返回 `BookError::EmptyPrompt`
    pub fn new(
        prompt: impl Into<String>,
        genre: Option<String>,
        length: StoryLength,
    ) -> Result<Self, BookError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(BookError::EmptyPrompt);
        }

        let genre = genre
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());

        Ok(Self {
            prompt,
            genre,
            length,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    /// 题材，缺省为 `general`
    pub fn genre_or_default(&self) -> &str {
        self.genre.as_deref().unwrap_or(DEFAULT_GENRE)
    }

    pub fn length(&self) -> StoryLength {
        self.length
    }
}

/// 已存储插图的引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// 可访问的路径或 URL
    pub url: String,
    /// 存储文件名
    pub filename: String,
}

impl ImageRef {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_prompt_rejected() {
        assert!(GenerationRequest::new("", None, StoryLength::Short).is_err());
        assert!(GenerationRequest::new(" \n\t", None, StoryLength::Short).is_err());
    }

    #[test]
    fn test_blank_genre_treated_as_absent() {
        let req = GenerationRequest::new("a dragon", Some("  ".into()), StoryLength::Long).unwrap();
        assert_eq!(req.genre(), None);
        assert_eq!(req.genre_or_default(), "general");

        let req = GenerationRequest::new("a dragon", Some(" fantasy ".into()), StoryLength::Long)
            .unwrap();
        assert_eq!(req.genre(), Some("fantasy"));
    }

    #[test]
    fn test_length_parsing_and_budgets() {
        assert_eq!(StoryLength::from_str("SHORT"), Some(StoryLength::Short));
        assert_eq!(StoryLength::from_str("epic"), None);
        assert_eq!(StoryLength::default(), StoryLength::Medium);
        assert_eq!(StoryLength::Short.max_tokens(), 600);
        assert_eq!(StoryLength::Medium.max_tokens(), 1200);
        assert_eq!(StoryLength::Long.max_tokens(), 2000);
        assert_eq!(StoryLength::Long.word_range(), "1000-1500");
    }
}
