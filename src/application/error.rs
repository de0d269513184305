//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::UpstreamError;
use crate::domain::book::BookError;

/// 应用层错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationError {
    /// 输入无效（调用方错误，未发起任何上游调用）
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 缺少上游凭据
    #[error("Service not configured")]
    NotConfigured,

    /// 上游配额耗尽或限流
    #[error("Quota exceeded, please try again later")]
    QuotaExceeded,

    /// 上游拒绝凭据
    #[error("Invalid credential configuration")]
    InvalidCredential,

    /// 故事生成成功但没有可用段落
    #[error("Story had no usable content")]
    EmptyContent,

    /// 其他上游失败
    #[error("Generation failed: {0}")]
    Unknown(String),
}

impl ApplicationError {
    /// 创建输入无效错误
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// 稍后重试可能成功（区分“稍后再试”与“服务不可用”）
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::QuotaExceeded | Self::EmptyContent)
    }
}

impl From<UpstreamError> for ApplicationError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotConfigured => Self::NotConfigured,
            UpstreamError::QuotaExceeded => Self::QuotaExceeded,
            UpstreamError::InvalidCredential => Self::InvalidCredential,
            UpstreamError::EmptyOutput => Self::EmptyContent,
            UpstreamError::Unknown(msg) => Self::Unknown(msg),
        }
    }
}

impl From<BookError> for ApplicationError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::EmptyPrompt => Self::InvalidInput(err.to_string()),
            BookError::NoParagraphs => Self::EmptyContent,
            BookError::InvalidTransition { .. } => Self::Unknown(err.to_string()),
        }
    }
}
