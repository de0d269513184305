//! Image Storage Port - 出站端口
//!
//! 定义插图文件存储的抽象接口

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::book::ImageRef;

/// 插图存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// 文件名中提示词片段的最大长度
pub const MAX_PROMPT_FRAGMENT_CHARS: usize = 50;

/// 清洗提示词片段：非 ASCII 字母数字替换为 `_`，截断到 50 个字符
pub fn sanitize_prompt_fragment(prompt: &str) -> String {
    prompt
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_PROMPT_FRAGMENT_CHARS)
        .collect()
}

/// Image Storage Port - 出站端口
#[async_trait]
pub trait ImageStoragePort: Send + Sync {
    /// 保存图像字节，返回可访问的引用
    ///
    /// 文件名由时间戳与清洗后的提示词片段组成
    async fn save_image(&self, prompt: &str, data: &[u8]) -> Result<ImageRef, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_non_alphanumeric() {
        assert_eq!(sanitize_prompt_fragment("A fox, scene: run!"), "A_fox__scene__run_");
        assert_eq!(sanitize_prompt_fragment("狐狸"), "__");
    }

    #[test]
    fn test_sanitize_caps_length() {
        let long = "x".repeat(120);
        assert_eq!(sanitize_prompt_fragment(&long).len(), MAX_PROMPT_FRAGMENT_CHARS);
    }
}
