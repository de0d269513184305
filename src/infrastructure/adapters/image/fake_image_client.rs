//! Fake Image Client - 离线使用的插图客户端
//!
//! 不调用推理服务，始终存储一张占位图

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::{
    IllustrationRequest, ImageProviderPort, ImageStoragePort, UpstreamError,
};
use crate::domain::book::ImageRef;

/// 占位图（1x1 GIF）
const PLACEHOLDER_IMAGE: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xFF, 0xFF,
    0xFF, 0x00, 0x00, 0x00, 0x21, 0xF9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3B,
];

/// Fake Image Client
pub struct FakeImageClient {
    storage: Arc<dyn ImageStoragePort>,
    latency_ms: u64,
}

impl FakeImageClient {
    pub fn new(storage: Arc<dyn ImageStoragePort>, latency_ms: u64) -> Self {
        tracing::info!(latency_ms = latency_ms, "FakeImageClient initialized");
        Self {
            storage,
            latency_ms,
        }
    }
}

#[async_trait]
impl ImageProviderPort for FakeImageClient {
    async fn generate_image(
        &self,
        request: &IllustrationRequest,
    ) -> Result<ImageRef, UpstreamError> {
        tokio::time::sleep(tokio::time::Duration::from_millis(self.latency_ms)).await;

        self.storage
            .save_image(&request.prompt, PLACEHOLDER_IMAGE)
            .await
            .map_err(|e| UpstreamError::Unknown(format!("Failed to store image: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FileImageStorage;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_placeholder_is_stored() {
        let dir = tempdir().unwrap();
        let storage = Arc::new(FileImageStorage::new(dir.path(), "/img").await.unwrap());
        let client = FakeImageClient::new(storage.clone(), 0);

        let image = client
            .generate_image(&IllustrationRequest::standalone("fox"))
            .await
            .unwrap();

        let stored = std::fs::read(dir.path().join(&image.filename)).unwrap();
        assert_eq!(stored, PLACEHOLDER_IMAGE);
    }
}
