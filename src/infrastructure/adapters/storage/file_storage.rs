//! File Storage - 文件系统插图存储实现
//!
//! 实现 ImageStoragePort trait

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{sanitize_prompt_fragment, ImageStoragePort, StorageError};
use crate::domain::book::ImageRef;

/// 文件系统插图存储
pub struct FileImageStorage {
    /// 存储根目录
    base_dir: PathBuf,
    /// 对外访问路径前缀（如 `/generated_images`）
    public_path: String,
}

impl FileImageStorage {
    /// 创建新的文件存储
    pub async fn new(
        base_dir: impl AsRef<Path>,
        public_path: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        let public_path = public_path.into().trim_end_matches('/').to_string();

        Ok(Self {
            base_dir,
            public_path,
        })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 生成文件名：`{毫秒时间戳}_{提示词片段}_{随机后缀}.jpg`
    ///
    /// 随机后缀避免并发请求在同一毫秒、同一提示词前缀下相互覆盖
    fn generate_filename(prompt: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{}_{}_{}.jpg",
            Utc::now().timestamp_millis(),
            sanitize_prompt_fragment(prompt),
            &suffix[..8]
        )
    }
}

#[async_trait]
impl ImageStoragePort for FileImageStorage {
    async fn save_image(&self, prompt: &str, data: &[u8]) -> Result<ImageRef, StorageError> {
        let filename = Self::generate_filename(prompt);
        let path = self.base_dir.join(&filename);

        fs::write(&path, data)
            .await
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        tracing::debug!(
            filename = %filename,
            size = data.len(),
            "Saved image"
        );

        Ok(ImageRef::new(
            format!("{}/{}", self.public_path, filename),
            filename,
        ))
    }
}
