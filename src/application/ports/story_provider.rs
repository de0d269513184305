//! Story Provider Port - 故事生成抽象
//!
//! 定义故事生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::book::GenerationRequest;

/// 上游服务错误
///
/// 故事与插图两类提供方共用同一分类
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// 未配置凭据
    #[error("Upstream credential not configured")]
    NotConfigured,

    /// 配额耗尽或被限流
    #[error("Upstream quota exceeded")]
    QuotaExceeded,

    /// 凭据被拒绝
    #[error("Upstream rejected credential")]
    InvalidCredential,

    /// 上游返回了空内容
    #[error("Upstream returned no usable output")]
    EmptyOutput,

    #[error("Upstream error: {0}")]
    Unknown(String),
}

impl UpstreamError {
    /// 根据 HTTP 状态码与响应体对上游失败分类
    pub fn classify(status: u16, body: &str) -> Self {
        let lowered = body.to_ascii_lowercase();
        if status == 429
            || status == 402
            || lowered.contains("insufficient_quota")
            || lowered.contains("rate_limit")
        {
            UpstreamError::QuotaExceeded
        } else if status == 401 || status == 403 || lowered.contains("invalid_api_key") {
            UpstreamError::InvalidCredential
        } else {
            UpstreamError::Unknown(format!("HTTP {}: {}", status, body))
        }
    }
}

/// 故事生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryResult {
    /// 正文，非空
    pub text: String,
}

impl StoryResult {
    /// 空白正文返回 `UpstreamError::EmptyOutput`
    pub fn new(text: impl Into<String>) -> Result<Self, UpstreamError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(UpstreamError::EmptyOutput);
        }
        Ok(Self { text })
    }

    /// 以空白分隔的词数
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Story Provider Port
///
/// 外部文本生成服务的抽象接口。本层不做重试
#[async_trait]
pub trait StoryProviderPort: Send + Sync {
    async fn generate_story(&self, request: &GenerationRequest)
        -> Result<StoryResult, UpstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_status() {
        assert_eq!(UpstreamError::classify(429, ""), UpstreamError::QuotaExceeded);
        assert_eq!(UpstreamError::classify(402, ""), UpstreamError::QuotaExceeded);
        assert_eq!(UpstreamError::classify(401, ""), UpstreamError::InvalidCredential);
        assert!(matches!(
            UpstreamError::classify(500, "boom"),
            UpstreamError::Unknown(_)
        ));
    }

    #[test]
    fn test_classify_by_body() {
        let body = r#"{"error":{"code":"insufficient_quota"}}"#;
        assert_eq!(UpstreamError::classify(400, body), UpstreamError::QuotaExceeded);
        let body = r#"{"error":{"code":"invalid_api_key"}}"#;
        assert_eq!(UpstreamError::classify(400, body), UpstreamError::InvalidCredential);
    }

    #[test]
    fn test_story_result_rejects_blank() {
        assert_eq!(StoryResult::new("  \n"), Err(UpstreamError::EmptyOutput));
        let story = StoryResult::new("one two  three\nfour").unwrap();
        assert_eq!(story.word_count(), 4);
    }
}
