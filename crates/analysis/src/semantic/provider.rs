use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timed out after {0} seconds")]
    Timeout(u64),
}

#[derive(Debug, Clone)]
pub struct CritiqueRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// A text-generation backend. Implementations are expected to be cheap to
/// share behind an `Arc` and safe to call concurrently.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send one prompt and return the raw reply text.
    async fn generate(&self, request: CritiqueRequest) -> Result<String, ProviderError>;

    fn model_name(&self) -> &str;
}

pub struct OpenAIProvider {
    client: Client<OpenAIConfig>,
    model: String,
    max_retries: u32,
}

impl OpenAIProvider {
    pub fn new(api_key: String, model: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model,
            max_retries: 3,
        }
    }

    /// Reads `OPENAI_API_KEY`; `None` when the credential is absent.
    pub fn from_env(model: String) -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        Some(Self::new(api_key, model))
    }
}

#[async_trait]
impl TextProvider for OpenAIProvider {
    async fn generate(&self, request: CritiqueRequest) -> Result<String, ProviderError> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system_prompt.clone())
                .build()
                .map_err(|e| ProviderError::Api(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user_prompt.clone())
                .build()
                .map_err(|e| ProviderError::Api(e.to_string()))?
                .into(),
        ];

        let api_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(request.temperature)
            .max_tokens(request.max_tokens)
            .build()
            .map_err(|e| ProviderError::Api(e.to_string()))?;

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            debug!(model = %self.model, attempt, "sending critique request");

            match self.client.chat().create(api_request.clone()).await {
                Ok(response) => break response,
                Err(e) => {
                    let message = e.to_string();
                    warn!(attempt, error = %message, "critique provider call failed");

                    if attempt >= self.max_retries {
                        return if message.contains("rate") {
                            Err(ProviderError::RateLimited)
                        } else {
                            Err(ProviderError::Api(message))
                        };
                    }

                    let wait = if message.contains("rate") {
                        Duration::from_secs(2_u64.pow(attempt))
                    } else {
                        Duration::from_millis(100 * attempt as u64)
                    };
                    tokio::time::sleep(wait).await;
                }
            }
        };

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ProviderError::InvalidResponse("no content in reply".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
