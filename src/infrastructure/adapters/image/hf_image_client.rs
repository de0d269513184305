//! Hugging Face Image Client - 调用文生图推理服务
//!
//! 实现 ImageProviderPort trait，生成的图像交给 ImageStoragePort 持久化
//!
//! 外部 API:
//! POST {base_url}/{model}
//! Request: {"inputs": "..."}  (JSON)
//! Response: image binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    IllustrationRequest, ImageProviderPort, ImageStoragePort, UpstreamError,
};
use crate::domain::book::ImageRef;

/// 推理请求体 (JSON)
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Hugging Face 客户端配置
#[derive(Debug, Clone)]
pub struct HfImageClientConfig {
    /// 推理服务基础 URL
    pub base_url: String,
    /// Access Token，未配置时每次调用返回 NotConfigured
    pub api_key: Option<String>,
    /// 模型路径
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HfImageClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.huggingface.co/hf-inference/models".to_string(),
            api_key: None,
            model: "black-forest-labs/FLUX.1-schnell".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HfImageClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Hugging Face 文生图客户端
pub struct HfImageClient {
    client: Client,
    config: HfImageClientConfig,
    storage: Arc<dyn ImageStoragePort>,
}

impl HfImageClient {
    pub fn new(
        config: HfImageClientConfig,
        storage: Arc<dyn ImageStoragePort>,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Unknown(e.to_string()))?;

        if config.api_key.is_none() {
            tracing::warn!("Hugging Face token not configured, image generation will be unavailable");
        }

        Ok(Self {
            client,
            config,
            storage,
        })
    }

    /// 获取推理 URL
    fn inference_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn api_key(&self) -> Result<&str, UpstreamError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(UpstreamError::NotConfigured)
    }
}

#[async_trait]
impl ImageProviderPort for HfImageClient {
    async fn generate_image(
        &self,
        request: &IllustrationRequest,
    ) -> Result<ImageRef, UpstreamError> {
        let api_key = self.api_key()?;

        tracing::debug!(
            url = %self.inference_url(),
            ordinal = request.ordinal,
            prompt_len = request.prompt.len(),
            "Sending image inference request"
        );

        let response = self
            .client
            .post(self.inference_url())
            .bearer_auth(api_key)
            .json(&InferenceRequest {
                inputs: &request.prompt,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Unknown("Request timeout".to_string())
                } else if e.is_connect() {
                    UpstreamError::Unknown(format!("Cannot connect to image service: {}", e))
                } else {
                    UpstreamError::Unknown(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::classify(status.as_u16(), &error_text));
        }

        // 直接获取图像字节
        let image_data = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Unknown(format!("Failed to read image: {}", e)))?;

        if image_data.is_empty() {
            return Err(UpstreamError::EmptyOutput);
        }

        let image = self
            .storage
            .save_image(&request.prompt, &image_data)
            .await
            .map_err(|e| UpstreamError::Unknown(format!("Failed to store image: {}", e)))?;

        tracing::info!(
            ordinal = request.ordinal,
            filename = %image.filename,
            image_size = image_data.len(),
            "Image inference completed"
        );

        Ok(image)
    }
}
