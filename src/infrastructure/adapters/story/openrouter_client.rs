//! OpenRouter Story Client - 调用 OpenAI 兼容的对话补全服务
//!
//! 实现 StoryProviderPort trait
//!
//! 外部 API:
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [...], "max_tokens": 600, "temperature": 0.8}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{StoryProviderPort, StoryResult, UpstreamError};
use crate::domain::book::GenerationRequest;

/// 对话补全请求体
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    /// 部分错误以 200 + error 字段返回
    #[serde(default)]
    error: Option<ChatErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: String,
}

/// 系统提示词
pub fn system_prompt(request: &GenerationRequest) -> String {
    format!(
        "You are a creative storyteller. Generate an engaging {} story based on the user's prompt. \
         The story should be {} length ({} words approximately). Make it creative, engaging, \
         and well-structured with a clear beginning, middle, and end.",
        request.genre_or_default(),
        request.length(),
        request.length().word_range()
    )
}

/// 用户消息
pub fn user_prompt(request: &GenerationRequest) -> String {
    format!("Generate a story based on this prompt: {}", request.prompt())
}

/// OpenRouter 客户端配置
#[derive(Debug, Clone)]
pub struct OpenRouterStoryClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// API Key，未配置时每次调用返回 NotConfigured
    pub api_key: Option<String>,
    /// 模型名
    pub model: String,
    /// HTTP-Referer 请求头
    pub site_url: String,
    /// X-Title 请求头
    pub app_title: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 采样温度
    pub temperature: f32,
}

impl Default for OpenRouterStoryClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            api_key: None,
            model: "deepseek/deepseek-chat-v3-0324:free".to_string(),
            site_url: "http://localhost:3000".to_string(),
            app_title: "AI Story Generator".to_string(),
            timeout_secs: 120,
            temperature: 0.8,
        }
    }
}

impl OpenRouterStoryClientConfig {
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

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// OpenRouter 故事客户端
pub struct OpenRouterStoryClient {
    client: Client,
    config: OpenRouterStoryClientConfig,
}

impl OpenRouterStoryClient {
    /// 创建新的客户端
    pub fn new(config: OpenRouterStoryClientConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Unknown(e.to_string()))?;

        if config.api_key.is_none() {
            tracing::warn!("OpenRouter API key not configured, story generation will be unavailable");
        }

        Ok(Self { client, config })
    }

    /// 获取补全 URL
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
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
impl StoryProviderPort for OpenRouterStoryClient {
    async fn generate_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<StoryResult, UpstreamError> {
        let api_key = self.api_key()?;

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(request),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt(request),
                },
            ],
            max_tokens: request.length().max_tokens(),
            temperature: self.config.temperature,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            length = %request.length(),
            max_tokens = body.max_tokens,
            "Sending story completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.site_url)
            .header("X-Title", &self.config.app_title)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Unknown("Request timeout".to_string())
                } else if e.is_connect() {
                    UpstreamError::Unknown(format!("Cannot connect to story service: {}", e))
                } else {
                    UpstreamError::Unknown(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %error_text, "Story service returned error");
            return Err(UpstreamError::classify(status.as_u16(), &error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Unknown(format!("Invalid response: {}", e)))?;

        if let Some(error) = completion.error {
            let code = error
                .code
                .as_ref()
                .and_then(|c| c.as_u64())
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(500);
            let detail = match &error.code {
                Some(code) => format!("{} {}", code, error.message),
                None => error.message,
            };
            return Err(UpstreamError::classify(code, &detail));
        }

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        let story = StoryResult::new(content)?;

        tracing::info!(
            model = %self.config.model,
            chars = story.text.chars().count(),
            "Story completion received"
        );

        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::StoryLength;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(length: StoryLength) -> GenerationRequest {
        GenerationRequest::new("a brave fox", None, length).unwrap()
    }

    fn client(server: &MockServer) -> OpenRouterStoryClient {
        let config = OpenRouterStoryClientConfig::new(server.uri()).with_api_key("test-key");
        OpenRouterStoryClient::new(config).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = OpenRouterStoryClientConfig::default();
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.timeout_secs, 120);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_prompt_templates() {
        let req = GenerationRequest::new("a fox", Some("mystery".into()), StoryLength::Long).unwrap();
        let system = system_prompt(&req);
        assert!(system.contains("engaging mystery story"));
        assert!(system.contains("long length (1000-1500 words approximately)"));
        assert_eq!(user_prompt(&req), "Generate a story based on this prompt: a fox");

        let req = request(StoryLength::Short);
        assert!(system_prompt(&req).contains("engaging general story"));
    }

    #[tokio::test]
    async fn test_successful_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("x-title", "AI Story Generator"))
            .and(body_string_contains("\"max_tokens\":600"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "One.\n\nTwo."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let story = client(&server)
            .generate_story(&request(StoryLength::Short))
            .await
            .unwrap();
        assert_eq!(story.text, "One.\n\nTwo.");
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client =
            OpenRouterStoryClient::new(OpenRouterStoryClientConfig::new(server.uri())).unwrap();
        let err = client
            .generate_story(&request(StoryLength::Medium))
            .await
            .unwrap_err();
        assert_eq!(err, UpstreamError::NotConfigured);
    }

    #[tokio::test]
    async fn test_status_classification() {
        let cases: [(u16, UpstreamError); 3] = [
            (429, UpstreamError::QuotaExceeded),
            (402, UpstreamError::QuotaExceeded),
            (401, UpstreamError::InvalidCredential),
        ];

        for (status, expected) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&server)
                .await;

            let err = client(&server)
                .generate_story(&request(StoryLength::Medium))
                .await
                .unwrap_err();
            assert_eq!(err, expected, "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_server_error_is_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_story(&request(StoryLength::Medium))
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Unknown(_)));
    }

    #[tokio::test]
    async fn test_error_in_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"code": 429, "message": "Rate limit exceeded"}
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_story(&request(StoryLength::Medium))
            .await
            .unwrap_err();
        assert_eq!(err, UpstreamError::QuotaExceeded);
    }

    #[tokio::test]
    async fn test_blank_content_is_empty_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "   "}}]
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_story(&request(StoryLength::Medium))
            .await
            .unwrap_err();
        assert_eq!(err, UpstreamError::EmptyOutput);
    }

    #[tokio::test]
    async fn test_missing_choices_is_empty_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client(&server)
            .generate_story(&request(StoryLength::Medium))
            .await
            .unwrap_err();
        assert_eq!(err, UpstreamError::EmptyOutput);
    }
}
